//! Extension methods and by-name dispatch.
//!
//! Extra behavior is attached to a record type at definition time as a table
//! of named function values. [`Record::call`] looks a name up in that table
//! first and falls back to the built-in operations reachable by name, so an
//! extension method can shadow a built-in one.

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    records::Record,
    value::Value,
};

pub type MethodFn = dyn Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync;

/// Number of arguments a method accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    fn check(self, callee: &str, provided: usize) -> Result<()> {
        match self {
            Self::Exact(expected) if expected != provided => {
                Err(Error::wrong_num_of_args(callee, expected, provided))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, derive_more::Debug)]
pub struct Method {
    arity: Arity,
    #[debug(skip)]
    func: Arc<MethodFn>,
}

impl Method {
    pub fn new<F>(arity: Arity, func: F) -> Self
    where
        F: Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            arity,
            func: Arc::new(func),
        }
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub(crate) fn invoke(&self, callee: &str, record: &mut Record, args: &[Value]) -> Result<Value> {
        self.arity.check(callee, args.len())?;
        (self.func)(record, args)
    }
}

/// Named extension methods attached to a record type.
#[derive(Clone, Default)]
pub struct Methods {
    table: IndexMap<String, Method>,
}

impl Methods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Methods::insert`].
    pub fn method<F>(mut self, name: impl Into<String>, arity: Arity, func: F) -> Self
    where
        F: Fn(&mut Record, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.insert(name, Method::new(arity, func));
        self
    }

    /// Adds a method, returning the one previously bound to `name`.
    pub fn insert(&mut self, name: impl Into<String>, method: Method) -> Option<Method> {
        self.table.insert(name.into(), method)
    }

    pub fn get(&self, name: &str) -> Option<&Method> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

/// Arity of the built-in operation called `name`, if there is one.
pub(crate) fn builtin_arity(name: &str) -> Option<Arity> {
    Some(match name {
        "[]" | "==" | "eql?" => Arity::Exact(1),
        "[]=" => Arity::Exact(2),
        "values" | "to_a" | "members" | "to_h" | "length" | "size" => Arity::Exact(0),
        "dig" | "values_at" => Arity::Variadic,
        _ => return None,
    })
}

pub(crate) fn call_builtin(
    record: &mut Record,
    callee: &str,
    name: &str,
    args: &[Value],
) -> Result<Value> {
    let record_type = record.record_type().clone();
    let undefined = || Error::undefined_method(record_type.display_name(), name);
    builtin_arity(name)
        .ok_or_else(undefined)?
        .check(callee, args.len())?;

    Ok(match name {
        "[]" => record.get(&args[0]),
        "[]=" => {
            record.set(&args[0], args[1].clone());
            args[1].clone()
        }
        "values" | "to_a" => Value::Vector(record.to_a()),
        "members" => record.members().into_iter().map(Value::Symbol).collect(),
        "to_h" => Value::Map(record.to_map()),
        "length" | "size" => Value::Integer(record.length() as i64),
        "dig" => record.dig(args),
        "values_at" => Value::Vector(record.values_at(args)),
        "==" | "eql?" => {
            Value::Boolean(matches!(&args[0], Value::Record(other) if *other == *record))
        }
        _ => return Err(undefined()),
    })
}
