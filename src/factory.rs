//! Defining record types.

use std::sync::Arc;

use crate::{
    error::{Error, Result},
    methods::Methods,
    records::RecordType,
    registry::Registry,
    symbols::Symbol,
    value::Value,
};

/// Manufactures record types and binds the named ones in its [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct Factory {
    registry: Arc<Registry>,
}

impl Factory {
    /// A factory with a fresh, private registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory writing into a registry that may be shared with other
    /// factories.
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<RecordType>> {
        self.registry.lookup(name)
    }

    /// Defines a record type with no extension methods.
    ///
    /// See [`Factory::define_with`].
    pub fn define<I>(&self, tokens: I) -> Result<Arc<RecordType>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.define_with(tokens, Methods::new())
    }

    /// Defines a record type from a list of tokens.
    ///
    /// When the first token is a string it names the type: it is capitalized
    /// and the new type is registered under the result. Every other token is
    /// a field name, given either as a symbol or as a string.
    pub fn define_with<I>(&self, tokens: I, methods: Methods) -> Result<Arc<RecordType>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut tokens = tokens.into_iter().map(Into::into).peekable();

        let name = match tokens.next_if(|token| matches!(token, Value::String(_))) {
            Some(Value::String(name)) => Some(type_name(&name)?),
            _ => None,
        };

        let fields = tokens
            .map(|token| match token {
                Value::Symbol(sym) => Ok(sym),
                Value::String(s) => Ok(Symbol::intern(&s)),
                other => Err(Error::invalid_field_name(&other)),
            })
            .collect::<Result<Vec<_>>>()?;

        let record_type = RecordType::new(name.as_deref(), fields, methods)?;
        tracing::debug!(
            name = record_type.display_name(),
            fields = record_type.arity(),
            methods = record_type.methods().len(),
            "defined record type"
        );

        if let Some(name) = name {
            self.registry.register(name, record_type.clone());
        }

        Ok(record_type)
    }
}

/// Capitalizes a type name and checks that the result can name a type.
fn type_name(raw: &str) -> Result<String> {
    let name = capitalize(raw);
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(Error::InvalidTypeName { name })
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
