//! Record types and their instances.
//!
//! A [`RecordType`] is the runtime descriptor produced by
//! [`Factory::define`](crate::factory::Factory::define): an ordered, closed
//! set of field names plus the extension methods attached at definition
//! time. A [`Record`] is one instance of a type, holding a value slot per
//! field.
//!
//! Lookups are deliberately lenient. Asking for an undeclared field, an out
//! of range position or using a key that is neither a name nor an integer
//! yields [`Value::Nil`] from the getters, and does nothing in the setters.

use std::{fmt, mem, sync::Arc};

use by_address::ByAddress;
use indexmap::IndexSet;

use crate::{
    error::{Error, Result},
    methods::{self, Methods},
    symbols::Symbol,
    value::{Map, Value, resolve_index},
};

/// Type declaration for a record.
pub struct RecordType {
    name: Option<String>,
    /// Declaration order is the storage order, and the index of a field in
    /// this set is the position of its slot.
    fields: IndexSet<Symbol>,
    methods: Methods,
}

impl RecordType {
    /// Creates a new record type. The name, if any, is used verbatim; the
    /// factory is responsible for capitalizing and registering it.
    pub fn new<I>(name: Option<&str>, fields: I, methods: Methods) -> Result<Arc<Self>>
    where
        I: IntoIterator,
        I::Item: Into<Symbol>,
    {
        let mut set = IndexSet::new();
        for field in fields {
            let field = field.into();
            if !set.insert(field) {
                return Err(Error::DuplicateField { field });
            }
        }
        Ok(Arc::new(Self {
            name: name.map(str::to_string),
            fields: set,
            methods,
        }))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The registered name, or a placeholder for anonymous types.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("#<anonymous record>")
    }

    /// Field names in declaration order. Names given as strings at
    /// definition time are interned, so they come back as symbols.
    pub fn members(&self) -> impl ExactSizeIterator<Item = Symbol> + '_ {
        self.fields.iter().copied()
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn position(&self, field: Symbol) -> Option<usize> {
        self.fields.get_index_of(&field)
    }

    pub fn methods(&self) -> &Methods {
        &self.methods
    }

    /// Constructs a new instance, binding `values` to the fields in
    /// declaration order.
    pub fn construct<I>(self: &Arc<Self>, values: I) -> Result<Record>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if values.len() != self.arity() {
            return Err(Error::wrong_num_of_args(
                format!("{}.new", self.display_name()),
                self.arity(),
                values.len(),
            ));
        }
        Ok(Record {
            record_type: ByAddress(self.clone()),
            fields: values,
        })
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .finish()
    }
}

/// An instance of a [`RecordType`].
///
/// Two records are equal when they belong to the very same type and hold
/// equal values in every slot. Records of two separately defined types are
/// never equal, even if the field lists match.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Record {
    record_type: ByAddress<Arc<RecordType>>,
    fields: Vec<Value>,
}

impl Record {
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type.0
    }

    pub fn is_instance_of(&self, record_type: &Arc<RecordType>) -> bool {
        Arc::ptr_eq(&self.record_type.0, record_type)
    }

    /// Resolves a key to a slot position. Names may be given as symbols or
    /// strings, positions as integers (negative ones count from the end).
    fn position(&self, key: &Value) -> Option<usize> {
        match key {
            Value::Symbol(sym) => self.record_type.position(*sym),
            Value::String(name) => {
                Symbol::lookup(name).and_then(|sym| self.record_type.position(sym))
            }
            Value::Integer(i) => resolve_index(*i, self.fields.len()),
            _ => None,
        }
    }

    /// Returns the value of a field, by name or by position. Returns `nil`
    /// for undeclared names, out of range positions and any other kind of
    /// key.
    pub fn get(&self, key: impl Into<Value>) -> Value {
        self.position(&key.into())
            .map(|i| self.fields[i].clone())
            .unwrap_or_default()
    }

    /// Overwrites a field, resolving `key` like [`Record::get`]. Returns the
    /// previous value, or `None` without touching the record when the key
    /// does not resolve to a slot.
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let i = self.position(&key.into())?;
        Some(mem::replace(&mut self.fields[i], value.into()))
    }

    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    pub fn to_a(&self) -> Vec<Value> {
        self.fields.clone()
    }

    /// Field names as symbols, including those defined from strings. They
    /// are also the keys of [`Record::to_map`], which [`Record::dig`] starts
    /// from.
    pub fn members(&self) -> Vec<Symbol> {
        self.record_type.members().collect()
    }

    pub fn to_map(&self) -> Map {
        self.pairs()
            .map(|(name, value)| (Value::Symbol(name), value.clone()))
            .collect()
    }

    /// Follows `keys` starting from [`Record::to_map`], looking each one up in
    /// the value reached so far. Stops with `nil` at the first lookup that
    /// produces `nil` or `false`. With no keys the whole map is returned.
    pub fn dig(&self, keys: &[Value]) -> Value {
        let mut current = Value::Map(self.to_map());
        for key in keys {
            current = current.lookup(key);
            if !current.is_truthy() {
                return Value::Nil;
            }
        }
        current
    }

    pub fn each(&self, visitor: impl FnMut(&Value)) {
        self.fields.iter().for_each(visitor);
    }

    pub fn each_pair(&self, mut visitor: impl FnMut(Symbol, &Value)) {
        for (name, value) in self.pairs() {
            visitor(name, value);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.fields.iter()
    }

    pub fn pairs(&self) -> impl ExactSizeIterator<Item = (Symbol, &Value)> + '_ {
        self.record_type.members().zip(self.fields.iter())
    }

    pub fn length(&self) -> usize {
        self.fields.len()
    }

    pub fn size(&self) -> usize {
        self.length()
    }

    pub fn select(&self, mut predicate: impl FnMut(&Value) -> bool) -> Vec<Value> {
        self.fields
            .iter()
            .filter(|value| predicate(value))
            .cloned()
            .collect()
    }

    /// Returns the values at the requested positions, in request order.
    /// Positions that are out of range or not integers produce `nil`.
    pub fn values_at<I>(&self, indices: I) -> Vec<Value>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        indices
            .into_iter()
            .map(|index| match Into::<Value>::into(index) {
                Value::Integer(i) => resolve_index(i, self.fields.len())
                    .map(|i| self.fields[i].clone())
                    .unwrap_or_default(),
                _ => Value::Nil,
            })
            .collect()
    }

    /// Invokes an operation by name. Extension methods attached to the type
    /// take precedence over the built-in operations of the same name.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let callee = format!("{}#{name}", self.record_type.display_name());
        if let Some(method) = self.record_type.methods().get(name).cloned() {
            tracing::trace!(%callee, args = args.len(), "calling extension method");
            return method.invoke(&callee, self, args);
        }
        tracing::trace!(%callee, args = args.len(), "calling built-in operation");
        methods::call_builtin(self, &callee, name, args)
    }

    /// Whether [`Record::call`] would find an operation called `name`.
    pub fn respond_to(&self, name: &str) -> bool {
        self.record_type.methods().contains(name) || methods::builtin_arity(name).is_some()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<struct ")?;
        if let Some(name) = self.record_type.name() {
            write!(f, "{name} ")?;
        }
        for (i, (name, value)) in self.pairs().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value:?}")?;
        }
        write!(f, ">")
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
