//! Interned symbols

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use indexmap::IndexSet;
use parking_lot::RwLock;

/// An interned name. Field names are symbols, so comparing two of them is a
/// single integer comparison.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) usize);

static SYMTAB: LazyLock<RwLock<IndexSet<Arc<str>>>> =
    LazyLock::new(|| RwLock::new(IndexSet::new()));

impl Symbol {
    pub fn intern(s: &str) -> Self {
        if let Some(id) = SYMTAB.read().get_index_of(s) {
            return Self(id);
        }
        let (id, _) = SYMTAB.write().insert_full(Arc::from(s));
        Self(id)
    }

    /// Returns the symbol for `s` only if it has already been interned.
    pub fn lookup(s: &str) -> Option<Self> {
        SYMTAB.read().get_index_of(s).map(Self)
    }

    pub fn to_str(self) -> Arc<str> {
        SYMTAB.read()[self.0].clone()
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::intern(&s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.to_str())
    }
}

impl PartialEq<&'_ str> for Symbol {
    fn eq(&self, rhs: &&str) -> bool {
        self.to_str().as_ref() == *rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let a = Symbol::intern("latitude");
        let b = Symbol::intern("latitude");
        assert_eq!(a, b);
        assert_ne!(a, Symbol::intern("longitude"));
    }

    #[test]
    fn lookup_does_not_intern() {
        assert_eq!(Symbol::lookup("never interned anywhere"), None);
        let sym = Symbol::intern("bearing");
        assert_eq!(Symbol::lookup("bearing"), Some(sym));
    }

    #[test]
    fn symbols_compare_with_strings() {
        let sym = Symbol::from("altitude");
        assert_eq!(sym, "altitude");
        assert_eq!(sym.to_string(), "altitude");
        assert_eq!(format!("{sym:?}"), ":altitude");
        assert_eq!(Symbol::from(String::from("altitude")), sym);
    }
}
