//! Symbol registration.
//!
//! [`SymbolTable`] owns every registered [`Symbol`]. Registration validates
//! the signature once, up front; after that the compiler can trust it.
//! [`standard`] is the process-wide table of the built-in catalog.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{catalog, Arguments, Literal, Name, Symbol, SymbolId, Type};

/// A malformed or duplicate registration. Fatal at startup.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error("symbol `{id}` is already registered")]
    DuplicateSymbol { id: SymbolId },
    #[error("symbol in namespace `{namespace}` has an empty name")]
    EmptyName { namespace: Name },
    #[error("symbol `{id}` declares argument `{key}` twice")]
    DuplicateArgument { id: SymbolId, key: Name },
    #[error("symbol `{id}`: rest argument `{key}` must be the last argument")]
    RestNotLast { id: SymbolId, key: Name },
    #[error("symbol `{id}`: rest argument `{key}` cannot have a default value")]
    RestWithDefault { id: SymbolId, key: Name },
    #[error("symbol `{id}`: default for `{key}` is not a `{expected}`")]
    DefaultTypeMismatch { id: SymbolId, key: Name, expected: Type },
    #[error("symbol `{id}`: list arguments allow at most {max} but at least {min}")]
    InvalidListBounds { id: SymbolId, min: usize, max: usize },
}

impl RegistrationError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            RegistrationError::DuplicateSymbol { .. } => "E1001",
            RegistrationError::EmptyName { .. } => "E1002",
            RegistrationError::DuplicateArgument { .. } => "E1003",
            RegistrationError::RestNotLast { .. } => "E1004",
            RegistrationError::RestWithDefault { .. } => "E1005",
            RegistrationError::DefaultTypeMismatch { .. } => "E1006",
            RegistrationError::InvalidListBounds { .. } => "E1007",
        }
    }
}

/// All registered symbols, by id, in registration order.
#[derive(Default, Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_id: FxHashMap<SymbolId, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the built-in catalog.
    pub fn with_standard_symbols() -> Result<Self, RegistrationError> {
        let mut table = Self::new();
        catalog::register_standard(&mut table)?;
        tracing::debug!(count = table.len(), "standard symbol table built");
        Ok(table)
    }

    /// Register a symbol under `namespace.name`.
    pub fn register(
        &mut self,
        namespace: &str,
        name: &str,
        args: Arguments,
        return_type: Type,
        description: &'static str,
    ) -> Result<&Symbol, RegistrationError> {
        let namespace_name = Name::intern(namespace);
        if name.is_empty() {
            return Err(RegistrationError::EmptyName {
                namespace: namespace_name,
            });
        }
        let id = SymbolId::of(namespace, name);
        if self.by_id.contains_key(&id) {
            return Err(RegistrationError::DuplicateSymbol { id });
        }
        validate_arguments(id, &args)?;

        let index = self.symbols.len();
        self.symbols.push(Symbol {
            id,
            namespace: namespace_name,
            name: Name::intern(name),
            args,
            return_type,
            description: (!description.is_empty()).then_some(description),
        });
        self.by_id.insert(id, index);
        Ok(&self.symbols[index])
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.by_id.get(&id).map(|&i| &self.symbols[i])
    }

    /// Look up by textual id.
    pub fn find(&self, id: &str) -> Option<&Symbol> {
        self.get(SymbolId::new(id))
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Symbols of one namespace, in registration order.
    pub fn in_namespace(&self, namespace: &str) -> impl Iterator<Item = &Symbol> {
        let namespace = Name::intern(namespace);
        self.symbols.iter().filter(move |s| s.namespace == namespace)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn validate_arguments(id: SymbolId, args: &Arguments) -> Result<(), RegistrationError> {
    match args {
        Arguments::List(list) => {
            if let Some(max) = list.max {
                if max < list.min {
                    return Err(RegistrationError::InvalidListBounds {
                        id,
                        min: list.min,
                        max,
                    });
                }
            }
        }
        Arguments::Dictionary(entries) => {
            let mut seen = FxHashSet::default();
            let last = entries.len().saturating_sub(1);
            for (i, (key, arg)) in entries.iter().enumerate() {
                if !seen.insert(*key) {
                    return Err(RegistrationError::DuplicateArgument { id, key: *key });
                }
                if arg.is_rest && i != last {
                    return Err(RegistrationError::RestNotLast { id, key: *key });
                }
                if let Some(default) = &arg.default_value {
                    if arg.is_rest {
                        return Err(RegistrationError::RestWithDefault { id, key: *key });
                    }
                    if !default_matches(default, &arg.ty) {
                        return Err(RegistrationError::DefaultTypeMismatch {
                            id,
                            key: *key,
                            expected: arg.ty.clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

fn default_matches(default: &Literal, ty: &Type) -> bool {
    match default {
        Literal::Str(s) => ty.accepts_str_literal(*s),
        other => other.ty().is_assignable_to(ty),
    }
}

/// The built-in catalog, built on first use.
///
/// # Panics
/// Panics if the built-in catalog itself is malformed, which is a bug in this
/// crate rather than a recoverable condition.
pub fn standard() -> &'static SymbolTable {
    static STANDARD: OnceLock<SymbolTable> = OnceLock::new();
    STANDARD.get_or_init(|| {
        SymbolTable::with_standard_symbols()
            .unwrap_or_else(|e| panic!("built-in symbol catalog is malformed: {e}"))
    })
}
