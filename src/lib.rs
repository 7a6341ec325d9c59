//! Lightweight named record types, manufactured at runtime.
//!
//! ```
//! use record_factory::{Factory, Symbol, Value};
//!
//! let factory = Factory::new();
//! let point = factory
//!     .define([Value::from("point"), Symbol::from("x").into(), Symbol::from("y").into()])
//!     .unwrap();
//! let p = point.construct([1, 2]).unwrap();
//!
//! assert_eq!(p.get("x"), Value::from(1));
//! assert_eq!(p.get(1), Value::from(2));
//! assert!(factory.lookup("Point").is_some());
//! ```

pub mod error;
pub mod factory;
pub mod methods;
pub mod records;
pub mod registry;
pub mod symbols;
pub mod value;

pub use error::{Error, Result};
pub use factory::Factory;
pub use methods::{Arity, Method, Methods};
pub use records::{Record, RecordType};
pub use registry::Registry;
pub use symbols::Symbol;
pub use value::{Map, Value};

/// Defines a record type on a factory using bare identifiers for the fields.
///
/// ```
/// use record_factory::{Factory, Methods, define};
///
/// let factory = Factory::new();
/// let point = define!(factory, "Point", x, y).unwrap();
/// let anon = define!(factory, width, height; Methods::new()).unwrap();
/// assert_eq!(point.arity(), 2);
/// assert_eq!(anon.name(), None);
/// ```
#[macro_export]
macro_rules! define {
    (@methods) => { $crate::methods::Methods::new() };
    (@methods $methods:expr) => { $methods };
    ( $factory:expr, $name:literal $(, $field:ident)* $(; $methods:expr)? ) => {
        $factory.define_with(
            {
                let tokens: ::std::vec::Vec<$crate::value::Value> = ::std::vec![
                    $crate::value::Value::from($name),
                    $($crate::value::Value::Symbol($crate::symbols::Symbol::intern(stringify!($field))),)*
                ];
                tokens
            },
            $crate::define!(@methods $($methods)?),
        )
    };
    ( $factory:expr $(, $field:ident)* $(; $methods:expr)? ) => {
        $factory.define_with(
            {
                let tokens: ::std::vec::Vec<$crate::value::Value> = ::std::vec![
                    $($crate::value::Value::Symbol($crate::symbols::Symbol::intern(stringify!($field))),)*
                ];
                tokens
            },
            $crate::define!(@methods $($methods)?),
        )
    };
}
