//! Run-time behaviour of symbols.
//!
//! A [`RuntimeTable`] maps symbol ids to [`Implementation`]s: a closed enum
//! with one variant per category, each carrying its own operation enum. The
//! compiler stores the implementation in each call node, so evaluation is a
//! single exhaustive `match` with no lookups.
//!
//! The table is separate from the symbol catalog: another back end can
//! register different implementations under the same symbol surface.

mod atom_set;
mod combinators;
mod filters;
mod generators;
mod modifiers;
mod properties;
mod scalar;

use std::sync::OnceLock;

use mq_ir::catalog::{core as c, structure as s};
use mq_ir::SymbolId;
use mq_structure::{AtomSelection, AtomSet, LinearBuilder, SelectionBuilder, UniqueBuilder};
use rustc_hash::FxHashMap;

use crate::compiler::Call;
use crate::errors::{too_many_results, EvalResult};
use crate::Environment;

pub use self::atom_set::AtomSetOp;
pub use self::combinators::CombinatorOp;
pub use self::scalar::{Control, Conversion, Logic, MathOp, Relation, SetOp, TextOp};
pub use self::filters::FilterOp;
pub use self::generators::GeneratorOp;
pub use self::modifiers::ModifierOp;
pub use self::properties::{AtomProperty, BondProperty};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Implementation {
    Conversion(Conversion),
    Logic(Logic),
    Control(Control),
    Relation(Relation),
    Math(MathOp),
    Text(TextOp),
    Set(SetOp),
    Generator(GeneratorOp),
    Modifier(ModifierOp),
    Filter(FilterOp),
    Combinator(CombinatorOp),
    AtomSet(AtomSetOp),
    AtomProperty(AtomProperty),
    BondProperty(BondProperty),
}

impl Implementation {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        match self {
            Implementation::Conversion(op) => op.invoke(call, env),
            Implementation::Logic(op) => op.invoke(call, env),
            Implementation::Control(op) => op.invoke(call, env),
            Implementation::Relation(op) => op.invoke(call, env),
            Implementation::Math(op) => op.invoke(call, env),
            Implementation::Text(op) => op.invoke(call, env),
            Implementation::Set(op) => op.invoke(call, env),
            Implementation::Generator(op) => op.invoke(call, env),
            Implementation::Modifier(op) => op.invoke(call, env),
            Implementation::Filter(op) => op.invoke(call, env),
            Implementation::Combinator(op) => op.invoke(call, env),
            Implementation::AtomSet(op) => op.invoke(call, env),
            Implementation::AtomProperty(op) => op.read(env),
            Implementation::BondProperty(op) => op.read(env),
        }
    }
}

/// Symbol id to implementation.
#[derive(Clone, Debug, Default)]
pub struct RuntimeTable {
    by_id: FxHashMap<SymbolId, Implementation>,
}

impl RuntimeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Implementations for every symbol of the built-in catalog.
    pub fn with_standard_implementations() -> Self {
        let mut table = RuntimeTable::new();
        for (id, implementation) in standard_entries() {
            table.register(SymbolId::new(id), implementation);
        }
        tracing::debug!(implementations = table.len(), "built runtime table");
        table
    }

    /// Process-wide table of the built-in implementations.
    pub fn standard() -> &'static RuntimeTable {
        static STANDARD: OnceLock<RuntimeTable> = OnceLock::new();
        STANDARD.get_or_init(RuntimeTable::with_standard_implementations)
    }

    /// Returns the implementation previously registered under `id`, if any.
    pub fn register(&mut self, id: SymbolId, implementation: Implementation) -> Option<Implementation> {
        self.by_id.insert(id, implementation)
    }

    pub fn get(&self, id: SymbolId) -> Option<Implementation> {
        self.by_id.get(&id).copied()
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn standard_entries() -> Vec<(&'static str, Implementation)> {
    use Implementation as I;
    vec![
        (c::TYPE_BOOL, I::Conversion(Conversion::Bool)),
        (c::TYPE_NUM, I::Conversion(Conversion::Num)),
        (c::TYPE_STR, I::Conversion(Conversion::Str)),
        (c::TYPE_LIST, I::Conversion(Conversion::List)),
        (c::TYPE_SET, I::Conversion(Conversion::Set)),
        (c::NOT, I::Logic(Logic::Not)),
        (c::AND, I::Logic(Logic::And)),
        (c::OR, I::Logic(Logic::Or)),
        (c::IF, I::Control(Control::If)),
        (c::EQ, I::Relation(Relation::Eq)),
        (c::NEQ, I::Relation(Relation::Neq)),
        (c::LT, I::Relation(Relation::Lt)),
        (c::LTE, I::Relation(Relation::Lte)),
        (c::GR, I::Relation(Relation::Gr)),
        (c::GRE, I::Relation(Relation::Gre)),
        (c::IN_RANGE, I::Relation(Relation::InRange)),
        (c::ADD, I::Math(MathOp::Add)),
        (c::SUB, I::Math(MathOp::Sub)),
        (c::MULT, I::Math(MathOp::Mult)),
        (c::DIV, I::Math(MathOp::Div)),
        (c::ABS, I::Math(MathOp::Abs)),
        (c::MIN, I::Math(MathOp::Min)),
        (c::MAX, I::Math(MathOp::Max)),
        (c::CONCAT, I::Text(TextOp::Concat)),
        (c::TO_UPPER_CASE, I::Text(TextOp::ToUpperCase)),
        (c::SET_HAS, I::Set(SetOp::Has)),
        (c::SET_IS_SUBSET, I::Set(SetOp::IsSubset)),
        (s::TYPE_ELEMENT_SYMBOL, I::Conversion(Conversion::ElementSymbol)),
        (s::TYPE_ENTITY_TYPE, I::Conversion(Conversion::EntityType)),
        (s::TYPE_RING_FINGERPRINT, I::Conversion(Conversion::RingFingerprint)),
        (s::GENERATOR_ALL, I::Generator(GeneratorOp::All)),
        (s::GENERATOR_EMPTY, I::Generator(GeneratorOp::Empty)),
        (s::GENERATOR_ATOM_GROUPS, I::Generator(GeneratorOp::AtomGroups)),
        (s::GENERATOR_RINGS, I::Generator(GeneratorOp::Rings)),
        (s::MODIFIER_QUERY_EACH, I::Modifier(ModifierOp::QueryEach)),
        (s::MODIFIER_INTERSECT_BY, I::Modifier(ModifierOp::IntersectBy)),
        (s::MODIFIER_EXCEPT_BY, I::Modifier(ModifierOp::ExceptBy)),
        (s::MODIFIER_UNION, I::Modifier(ModifierOp::Union)),
        (s::MODIFIER_WHOLE_RESIDUES, I::Modifier(ModifierOp::WholeResidues)),
        (s::MODIFIER_INCLUDE_SURROUNDINGS, I::Modifier(ModifierOp::IncludeSurroundings)),
        (s::MODIFIER_INCLUDE_CONNECTED, I::Modifier(ModifierOp::IncludeConnected)),
        (s::FILTER_PICK, I::Filter(FilterOp::Pick)),
        (s::FILTER_FIRST, I::Filter(FilterOp::First)),
        (s::FILTER_WITHIN, I::Filter(FilterOp::Within)),
        (s::FILTER_IS_CONNECTED_TO, I::Filter(FilterOp::IsConnectedTo)),
        (s::COMBINATOR_INTERSECT, I::Combinator(CombinatorOp::Intersect)),
        (s::COMBINATOR_MERGE, I::Combinator(CombinatorOp::Merge)),
        (s::ATOM_SET_ATOM_COUNT, I::AtomSet(AtomSetOp::AtomCount)),
        (s::ATOM_SET_COUNT_QUERY, I::AtomSet(AtomSetOp::CountQuery)),
        (s::ATOM_SET_PROPERTY_SET, I::AtomSet(AtomSetOp::PropertySet)),
        (s::ELEMENT_SYMBOL, I::AtomProperty(AtomProperty::ElementSymbol)),
        (s::X, I::AtomProperty(AtomProperty::X)),
        (s::Y, I::AtomProperty(AtomProperty::Y)),
        (s::Z, I::AtomProperty(AtomProperty::Z)),
        (s::ATOM_KEY, I::AtomProperty(AtomProperty::AtomKey)),
        (s::ATOM_NAME, I::AtomProperty(AtomProperty::AtomName)),
        (s::RES_NAME, I::AtomProperty(AtomProperty::ResName)),
        (s::RES_SEQ_NUMBER, I::AtomProperty(AtomProperty::ResSeqNumber)),
        (s::INS_CODE, I::AtomProperty(AtomProperty::InsCode)),
        (s::CHAIN_NAME, I::AtomProperty(AtomProperty::ChainName)),
        (s::ENTITY_TYPE, I::AtomProperty(AtomProperty::EntityType)),
        (s::SECONDARY_STRUCTURE, I::AtomProperty(AtomProperty::SecondaryStructure)),
        (s::B_FACTOR, I::AtomProperty(AtomProperty::BFactor)),
        (s::OCCUPANCY, I::AtomProperty(AtomProperty::Occupancy)),
        (s::IS_HET, I::AtomProperty(AtomProperty::IsHet)),
        (s::RESIDUE_KEY, I::AtomProperty(AtomProperty::ResidueKey)),
        (s::CHAIN_KEY, I::AtomProperty(AtomProperty::ChainKey)),
        (s::ENTITY_KEY, I::AtomProperty(AtomProperty::EntityKey)),
        (s::CONNECTED_COMPONENT_KEY, I::AtomProperty(AtomProperty::ConnectedComponentKey)),
        (s::IN_RING, I::AtomProperty(AtomProperty::InRing)),
        (s::BOND_ORDER, I::BondProperty(BondProperty::Order)),
        (s::BOND_FLAGS, I::BondProperty(BondProperty::Flags)),
        (s::BOND_IS_COVALENT, I::BondProperty(BondProperty::IsCovalent)),
    ]
}

/// Wraps a [`SelectionBuilder`] with the configured result cap.
pub(crate) struct Collector<B> {
    builder: B,
    limit: Option<usize>,
}

impl<B: SelectionBuilder> Collector<B> {
    pub(crate) fn new(builder: B, env: &Environment<'_>) -> Self {
        Collector {
            builder,
            limit: env.config().max_result_sets(),
        }
    }

    pub(crate) fn add(&mut self, set: AtomSet) -> EvalResult<()> {
        self.builder.add(set);
        match self.limit {
            Some(limit) if self.builder.len() > limit => Err(too_many_results(limit)),
            _ => Ok(()),
        }
    }

    /// Adds `set` unless it is empty.
    pub(crate) fn add_non_empty(&mut self, set: AtomSet) -> EvalResult<()> {
        if set.is_empty() {
            Ok(())
        } else {
            self.add(set)
        }
    }

    pub(crate) fn finish(self) -> AtomSelection {
        self.builder.finish()
    }
}

/// Order-preserving collector that keeps duplicates.
pub(crate) fn linear(env: &Environment<'_>) -> Collector<LinearBuilder> {
    Collector::new(LinearBuilder::new(env.model().atom_count()), env)
}

/// Deduplicating collector over the environment's model.
pub(crate) fn unique(env: &Environment<'_>) -> Collector<UniqueBuilder> {
    Collector::new(UniqueBuilder::new(env.model().atom_count()), env)
}
