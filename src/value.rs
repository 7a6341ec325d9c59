//! Dynamic values stored in record slots.

use std::hash::{DefaultHasher, Hash, Hasher};

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::{error::Error, records::Record, symbols::Symbol};

/// Insertion-ordered map, used by `to_map` and for nested data reached with
/// `dig`.
pub type Map = IndexMap<Value, Value>;

#[derive(Clone, Default, PartialEq, Eq, derive_more::Debug, derive_more::From)]
pub enum Value {
    #[default]
    #[debug("nil")]
    Nil,
    #[debug("{_0}")]
    Boolean(bool),
    #[debug("{_0}")]
    Integer(i64),
    #[debug("{_0}")]
    Float(OrderedFloat<f64>),
    #[debug("{_0:?}")]
    String(String),
    #[debug("{_0:?}")]
    Symbol(Symbol),
    #[debug("{_0:?}")]
    Vector(Vec<Value>),
    #[debug("{_0:?}")]
    Map(Map),
    #[debug("{_0:?}")]
    Record(Record),
}

impl Value {
    /// `nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Boolean(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Vector(_) => "vector",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
        }
    }

    /// Looks `key` up inside this value. Maps are keyed by value, vectors by
    /// (possibly negative) position and records resolve the key like
    /// [`Record::get`]. Every other value, and every missing key, yields
    /// `nil`.
    pub fn lookup(&self, key: &Value) -> Value {
        match (self, key) {
            (Self::Map(map), key) => map.get(key).cloned().unwrap_or_default(),
            (Self::Vector(vec), Self::Integer(i)) => resolve_index(*i, vec.len())
                .map(|i| vec[i].clone())
                .unwrap_or_default(),
            (Self::Record(record), key) => record.get(key),
            _ => Self::Nil,
        }
    }
}

/// Resolves a possibly negative index against a collection of `len`
/// elements. Negative indices count back from the end.
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let index = if index < 0 { index + len } else { index };
    (0..len).contains(&index).then_some(index as usize)
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Nil => (),
            Self::Boolean(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => f.hash(state),
            Self::String(s) => s.hash(state),
            Self::Symbol(s) => s.hash(state),
            Self::Vector(v) => v.hash(state),
            // Map equality ignores insertion order, so the hash must too.
            Self::Map(map) => {
                let combined = map.iter().fold(0u64, |acc, entry| {
                    let mut hasher = DefaultHasher::new();
                    entry.hash(&mut hasher);
                    acc.wrapping_add(hasher.finish())
                });
                map.len().hash(state);
                combined.hash(state);
            }
            Self::Record(record) => record.hash(state),
        }
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(OrderedFloat(f))
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Vector(iter.into_iter().collect())
    }
}

impl<'a> TryFrom<&'a Value> for bool {
    type Error = Error;

    fn try_from(v: &'a Value) -> Result<bool, Self::Error> {
        match v {
            Value::Boolean(b) => Ok(*b),
            x => Err(Error::invalid_type("bool", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for i64 {
    type Error = Error;

    fn try_from(v: &'a Value) -> Result<i64, Self::Error> {
        match v {
            Value::Integer(i) => Ok(*i),
            x => Err(Error::invalid_type("integer", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for f64 {
    type Error = Error;

    fn try_from(v: &'a Value) -> Result<f64, Self::Error> {
        match v {
            Value::Float(f) => Ok(f.into_inner()),
            Value::Integer(i) => Ok(*i as f64),
            x => Err(Error::invalid_type("float", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = Error;

    fn try_from(v: &'a Value) -> Result<&'a str, Self::Error> {
        match v {
            Value::String(s) => Ok(s),
            x => Err(Error::invalid_type("string", x.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a Record {
    type Error = Error;

    fn try_from(v: &'a Value) -> Result<&'a Record, Self::Error> {
        match v {
            Value::Record(r) => Ok(r),
            x => Err(Error::invalid_type("record", x.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(resolve_index(0, 3), Some(0));
        assert_eq!(resolve_index(-1, 3), Some(2));
        assert_eq!(resolve_index(-3, 3), Some(0));
        assert_eq!(resolve_index(-4, 3), None);
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(0, 0), None);
    }

    #[test]
    fn only_nil_and_false_are_falsy() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::from("").is_truthy());
    }

    #[test]
    fn lookup_into_vectors_and_maps() {
        let vec = Value::from_iter([Value::from(1), Value::from(2)]);
        assert_eq!(vec.lookup(&Value::from(-1)), Value::from(2));
        assert_eq!(vec.lookup(&Value::from(9)), Value::Nil);
        assert_eq!(vec.lookup(&Value::from("x")), Value::Nil);

        let map = Value::Map(Map::from([(Value::from("k"), Value::from(true))]));
        assert_eq!(map.lookup(&Value::from("k")), Value::Boolean(true));
        assert_eq!(map.lookup(&Value::from("j")), Value::Nil);
        assert_eq!(Value::from(7).lookup(&Value::from(0)), Value::Nil);
    }

    #[test]
    fn nil_is_only_nil() {
        assert!(Value::Nil.is_nil());
        assert!(Value::default().is_nil());
        assert!(!Value::Boolean(false).is_nil());
        assert!(!Value::Vector(Vec::new()).is_nil());
    }

    #[test]
    fn conversions_out_of_values() {
        assert_eq!(bool::try_from(&Value::Boolean(true)), Ok(true));
        assert_eq!(i64::try_from(&Value::from(-3)), Ok(-3));
        assert_eq!(f64::try_from(&Value::from(2.5)), Ok(2.5));
        assert_eq!(f64::try_from(&Value::from(4)), Ok(4.0));
        assert_eq!(<&str>::try_from(&Value::from("abc")), Ok("abc"));

        let record_type = crate::records::RecordType::new(
            Some("Cell"),
            [Symbol::from(String::from("content"))],
            crate::methods::Methods::new(),
        )
        .unwrap();
        let cell = Value::Record(record_type.construct([7]).unwrap());
        let record: &Record = (&cell).try_into().unwrap();
        assert_eq!(record.get("content"), Value::from(7));
    }

    #[test]
    fn conversions_report_the_mismatched_type() {
        assert_eq!(
            bool::try_from(&Value::Nil),
            Err(Error::invalid_type("bool", "nil"))
        );
        assert_eq!(
            f64::try_from(&Value::from("1.0")),
            Err(Error::invalid_type("float", "string"))
        );
        assert_eq!(
            <&str>::try_from(&Value::Symbol(Symbol::intern("abc"))),
            Err(Error::invalid_type("string", "symbol"))
        );
        assert_eq!(
            <&Record>::try_from(&Value::Map(Map::new())).unwrap_err(),
            Error::InvalidType {
                expected: "record",
                provided: "map",
            }
        );
    }

    #[test]
    fn map_hash_ignores_insertion_order() {
        let a = Map::from([(Value::from(1), Value::Nil), (Value::from(2), Value::Nil)]);
        let b = Map::from([(Value::from(2), Value::Nil), (Value::from(1), Value::Nil)]);
        let hash = |v: &Value| {
            let mut hasher = DefaultHasher::new();
            v.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(Value::Map(a.clone()), Value::Map(b.clone()));
        assert_eq!(hash(&Value::Map(a)), hash(&Value::Map(b)));
    }
}
