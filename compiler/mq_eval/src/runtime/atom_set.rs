//! `struct.atomSet.*`: properties of the current atom set inside `pick`.

use std::sync::Arc;

use crate::compiler::Call;
use crate::errors::{invalid_argument, EvalResult};
use crate::{Environment, Value, ValueSet};

const QUERY: usize = 0;
const PROPERTY: usize = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AtomSetOp {
    AtomCount,
    /// Number of atom sets the query finds inside the current atom set.
    CountQuery,
    /// Distinct values of the property over the current atom set's atoms.
    PropertySet,
}

impl AtomSetOp {
    pub(crate) fn invoke(self, call: &Call, env: &mut Environment<'_>) -> EvalResult {
        let current = env.current_atom_set()?.clone();
        match self {
            AtomSetOp::AtomCount => Ok(Value::Num(current.len() as f64)),
            AtomSetOp::CountQuery => {
                let Some(query) = call.arg(QUERY) else {
                    return Err(invalid_argument("query was not bound"));
                };
                let found = env.find_in_atom_set(&current, query)?;
                Ok(Value::Num(found.len() as f64))
            }
            AtomSetOp::PropertySet => {
                let Some(property) = call.arg(PROPERTY) else {
                    return Err(invalid_argument("property was not bound"));
                };
                let mut values = ValueSet::new();
                for atom in current.iter() {
                    let value = env.with_element(atom, |env| property.eval(env))?;
                    values.insert(&value)?;
                }
                Ok(Value::Set(Arc::new(values)))
            }
        }
    }
}
