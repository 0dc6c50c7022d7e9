//! `struct.*`: generators, modifiers, filters, combinators and properties
//! over a structural model.

use super::{define, entity_type, secondary_structure_type};
use crate::{Argument, Arguments, Literal, RegistrationError, SymbolTable, Type};

pub const TYPE_ELEMENT_SYMBOL: &str = "struct.type.elementSymbol";
pub const TYPE_ENTITY_TYPE: &str = "struct.type.entityType";
pub const TYPE_RING_FINGERPRINT: &str = "struct.type.ringFingerprint";

pub const GENERATOR_ALL: &str = "struct.generator.all";
pub const GENERATOR_EMPTY: &str = "struct.generator.empty";
pub const GENERATOR_ATOM_GROUPS: &str = "struct.generator.atomGroups";
pub const GENERATOR_RINGS: &str = "struct.generator.rings";

pub const MODIFIER_QUERY_EACH: &str = "struct.modifier.queryEach";
pub const MODIFIER_INTERSECT_BY: &str = "struct.modifier.intersectBy";
pub const MODIFIER_EXCEPT_BY: &str = "struct.modifier.exceptBy";
pub const MODIFIER_UNION: &str = "struct.modifier.union";
pub const MODIFIER_WHOLE_RESIDUES: &str = "struct.modifier.wholeResidues";
pub const MODIFIER_INCLUDE_SURROUNDINGS: &str = "struct.modifier.includeSurroundings";
pub const MODIFIER_INCLUDE_CONNECTED: &str = "struct.modifier.includeConnected";

pub const FILTER_PICK: &str = "struct.filter.pick";
pub const FILTER_FIRST: &str = "struct.filter.first";
pub const FILTER_WITHIN: &str = "struct.filter.within";
pub const FILTER_IS_CONNECTED_TO: &str = "struct.filter.isConnectedTo";

pub const COMBINATOR_INTERSECT: &str = "struct.combinator.intersect";
pub const COMBINATOR_MERGE: &str = "struct.combinator.merge";

pub const ATOM_SET_ATOM_COUNT: &str = "struct.atomSet.atomCount";
pub const ATOM_SET_COUNT_QUERY: &str = "struct.atomSet.countQuery";
pub const ATOM_SET_PROPERTY_SET: &str = "struct.atomSet.propertySet";

pub const ELEMENT_SYMBOL: &str = "struct.atomProperty.core.elementSymbol";
pub const X: &str = "struct.atomProperty.core.x";
pub const Y: &str = "struct.atomProperty.core.y";
pub const Z: &str = "struct.atomProperty.core.z";
pub const ATOM_KEY: &str = "struct.atomProperty.core.atomKey";

pub const ATOM_NAME: &str = "struct.atomProperty.macromolecular.atomName";
pub const RES_NAME: &str = "struct.atomProperty.macromolecular.resName";
pub const RES_SEQ_NUMBER: &str = "struct.atomProperty.macromolecular.resSeqNumber";
pub const INS_CODE: &str = "struct.atomProperty.macromolecular.insCode";
pub const CHAIN_NAME: &str = "struct.atomProperty.macromolecular.chainName";
pub const ENTITY_TYPE: &str = "struct.atomProperty.macromolecular.entityType";
pub const SECONDARY_STRUCTURE: &str = "struct.atomProperty.macromolecular.secondaryStructure";
pub const B_FACTOR: &str = "struct.atomProperty.macromolecular.bFactor";
pub const OCCUPANCY: &str = "struct.atomProperty.macromolecular.occupancy";
pub const IS_HET: &str = "struct.atomProperty.macromolecular.isHet";
pub const RESIDUE_KEY: &str = "struct.atomProperty.macromolecular.residueKey";
pub const CHAIN_KEY: &str = "struct.atomProperty.macromolecular.chainKey";
pub const ENTITY_KEY: &str = "struct.atomProperty.macromolecular.entityKey";

pub const CONNECTED_COMPONENT_KEY: &str = "struct.atomProperty.topology.connectedComponentKey";
pub const IN_RING: &str = "struct.atomProperty.topology.inRing";

pub const BOND_ORDER: &str = "struct.bondProperty.order";
pub const BOND_FLAGS: &str = "struct.bondProperty.flags";
pub const BOND_IS_COVALENT: &str = "struct.bondProperty.isCovalent";

fn selection() -> Argument {
    Argument::new(Type::AtomSelection)
}

fn flag(default: bool) -> Argument {
    Argument::new(Type::Bool).with_default(Literal::Bool(default))
}

pub(super) fn register(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    register_types(table)?;
    register_generators(table)?;
    register_modifiers(table)?;
    register_filters(table)?;
    register_atom_set(table)?;
    register_properties(table)?;
    Ok(())
}

fn register_types(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    define(
        table,
        TYPE_ELEMENT_SYMBOL,
        Arguments::dictionary([("0", Argument::new(Type::Str))]),
        Type::ElementSymbol,
        "Case-normalized element symbol.",
    )?;
    define(
        table,
        TYPE_ENTITY_TYPE,
        Arguments::dictionary([("0", Argument::new(Type::Str))]),
        entity_type(),
        "Normalize an entity type name.",
    )?;
    define(
        table,
        TYPE_RING_FINGERPRINT,
        Arguments::non_empty_list(Type::ElementSymbol),
        Type::Str,
        "Canonical fingerprint of a ring given its element symbols in ring order.",
    )
}

fn register_generators(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    define(
        table,
        GENERATOR_ALL,
        Arguments::none(),
        Type::AtomSelection,
        "Every atom as one atom set.",
    )?;
    define(
        table,
        GENERATOR_EMPTY,
        Arguments::none(),
        Type::AtomSelection,
        "The empty selection.",
    )?;
    define(
        table,
        GENERATOR_ATOM_GROUPS,
        Arguments::dictionary([
            ("entity-test", Argument::new(Type::Bool).optional()),
            ("chain-test", Argument::new(Type::Bool).optional()),
            ("residue-test", Argument::new(Type::Bool).optional()),
            ("atom-test", Argument::new(Type::Bool).optional()),
            ("group-by", Argument::new(Type::Any).optional()),
        ]),
        Type::AtomSelection,
        "Atoms passing every test; grouped by the `group-by` value when present.",
    )?;
    define(
        table,
        GENERATOR_RINGS,
        Arguments::dictionary([
            ("only-aromatic", flag(false)),
            (
                "fingerprint",
                Argument::new(Type::Str)
                    .rest()
                    .describe("ring fingerprints to keep; every ring when empty"),
            ),
        ]),
        Type::AtomSelection,
        "One atom set per ring.",
    )
}

fn register_modifiers(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    define(
        table,
        MODIFIER_QUERY_EACH,
        Arguments::dictionary([("0", selection()), ("query", selection())]),
        Type::AtomSelection,
        "Run `query` inside every atom set of `0`.",
    )?;
    define(
        table,
        MODIFIER_INTERSECT_BY,
        Arguments::dictionary([("0", selection()), ("by", selection())]),
        Type::AtomSelection,
        "Intersect every atom set with the atoms of `by`; drop empty results.",
    )?;
    define(
        table,
        MODIFIER_EXCEPT_BY,
        Arguments::dictionary([("0", selection()), ("by", selection())]),
        Type::AtomSelection,
        "Remove the atoms of `by` from every atom set; drop empty results.",
    )?;
    define(
        table,
        MODIFIER_UNION,
        Arguments::dictionary([("0", selection())]),
        Type::AtomSelection,
        "Collapse the selection into a single atom set.",
    )?;
    define(
        table,
        MODIFIER_WHOLE_RESIDUES,
        Arguments::dictionary([("0", selection())]),
        Type::AtomSelection,
        "Extend every atom set to complete residues.",
    )?;
    define(
        table,
        MODIFIER_INCLUDE_SURROUNDINGS,
        Arguments::dictionary([
            ("0", selection()),
            ("radius", Argument::new(Type::Num)),
            ("as-whole-residues", flag(false)),
        ]),
        Type::AtomSelection,
        "Extend every atom set by atoms within `radius`.",
    )?;
    define(
        table,
        MODIFIER_INCLUDE_CONNECTED,
        Arguments::dictionary([
            ("0", selection()),
            ("bond-test", Argument::new(Type::Bool).optional()),
            ("layer-count", Argument::new(Type::Num).with_default(Literal::Num(1.0))),
            ("as-whole-residues", flag(false)),
        ]),
        Type::AtomSelection,
        "Extend every atom set by `layer-count` layers of bonded atoms.",
    )
}

fn register_filters(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    define(
        table,
        FILTER_PICK,
        Arguments::dictionary([("0", selection()), ("test", Argument::new(Type::Bool))]),
        Type::AtomSelection,
        "Keep atom sets for which `test` holds.",
    )?;
    define(
        table,
        FILTER_FIRST,
        Arguments::dictionary([("0", selection())]),
        Type::AtomSelection,
        "Keep only the first atom set.",
    )?;
    define(
        table,
        FILTER_WITHIN,
        Arguments::dictionary([
            ("0", selection()),
            ("target", selection()),
            ("max-radius", Argument::new(Type::Num)),
            ("min-radius", Argument::new(Type::Num).with_default(Literal::Num(0.0))),
            ("invert", flag(false)),
        ]),
        Type::AtomSelection,
        "Keep atom sets whose distance to the target lies in [min-radius, max-radius].",
    )?;
    define(
        table,
        FILTER_IS_CONNECTED_TO,
        Arguments::dictionary([
            ("0", selection()),
            ("target", selection()),
            ("bond-test", Argument::new(Type::Bool).optional()),
            ("disjunct", flag(true)),
            ("invert", flag(false)),
        ]),
        Type::AtomSelection,
        "Keep atom sets bonded to an atom of the target.",
    )?;
    define(
        table,
        COMBINATOR_INTERSECT,
        Arguments::non_empty_list(Type::AtomSelection),
        Type::AtomSelection,
        "Atom sets present in every operand.",
    )?;
    define(
        table,
        COMBINATOR_MERGE,
        Arguments::non_empty_list(Type::AtomSelection),
        Type::AtomSelection,
        "Distinct atom sets of all operands, in first-seen order.",
    )
}

fn register_atom_set(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    define(
        table,
        ATOM_SET_ATOM_COUNT,
        Arguments::none(),
        Type::Num,
        "Size of the current atom set.",
    )?;
    define(
        table,
        ATOM_SET_COUNT_QUERY,
        Arguments::dictionary([("0", selection())]),
        Type::Num,
        "Number of atom sets `0` yields inside the current atom set.",
    )?;
    define(
        table,
        ATOM_SET_PROPERTY_SET,
        Arguments::dictionary([("0", Argument::new(Type::Any))]),
        Type::set(Type::Any),
        "Distinct values of an atom property over the current atom set.",
    )
}

fn register_properties(table: &mut SymbolTable) -> Result<(), RegistrationError> {
    let properties = [
        (ELEMENT_SYMBOL, Type::ElementSymbol, "Element symbol."),
        (X, Type::Num, "Cartesian x coordinate."),
        (Y, Type::Num, "Cartesian y coordinate."),
        (Z, Type::Num, "Cartesian z coordinate."),
        (ATOM_KEY, Type::Num, "Atom index within the model."),
        (ATOM_NAME, Type::Str, "Atom name, e.g. `CA`."),
        (RES_NAME, Type::Str, "Residue name, e.g. `ALA`."),
        (RES_SEQ_NUMBER, Type::Num, "Residue sequence number."),
        (INS_CODE, Type::Str, "Residue insertion code."),
        (CHAIN_NAME, Type::Str, "Chain identifier."),
        (ENTITY_TYPE, entity_type(), "Type of the atom's entity."),
        (SECONDARY_STRUCTURE, secondary_structure_type(), "Secondary structure of the residue."),
        (B_FACTOR, Type::Num, "Isotropic temperature factor."),
        (OCCUPANCY, Type::Num, "Occupancy."),
        (IS_HET, Type::Bool, "Whether the atom is a hetero atom."),
        (RESIDUE_KEY, Type::Num, "Residue index within the model."),
        (CHAIN_KEY, Type::Num, "Chain index within the model."),
        (ENTITY_KEY, Type::Num, "Entity index within the model."),
        (CONNECTED_COMPONENT_KEY, Type::Num, "Covalently connected component label."),
        (IN_RING, Type::Bool, "Whether the atom belongs to a ring."),
        (BOND_ORDER, Type::Num, "Order of the bond under test."),
        (BOND_FLAGS, Type::set(Type::Str), "Flags of the bond under test."),
        (BOND_IS_COVALENT, Type::Bool, "Whether the bond under test is covalent."),
    ];
    for (id, ty, description) in properties {
        define(table, id, Arguments::none(), ty, description)?;
    }
    Ok(())
}
