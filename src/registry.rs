//! Global collection of named record types associated with a [`Factory`]
//!
//! [`Factory`]: crate::factory::Factory

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::records::RecordType;

/// Maps type names to record types, in registration order.
#[derive(Default)]
pub struct Registry {
    types: RwLock<IndexMap<String, Arc<RecordType>>>,
}

impl Registry {
    /// Construct an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `record_type`. A previous binding is replaced and
    /// returned.
    pub fn register(
        &self,
        name: impl Into<String>,
        record_type: Arc<RecordType>,
    ) -> Option<Arc<RecordType>> {
        let name = name.into();
        let previous = self.types.write().insert(name.clone(), record_type);
        if previous.is_some() {
            tracing::warn!(%name, "record type name already registered, replacing it");
        }
        previous
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<RecordType>> {
        self.types.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<RecordType>> {
        self.types.write().shift_remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.types.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.types.read().keys()).finish()
    }
}
