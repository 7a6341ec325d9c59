//! Scaffolding shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use record_factory::{Factory, RecordType, Symbol, Value};

pub fn sym(name: &str) -> Value {
    Value::Symbol(Symbol::intern(name))
}

pub fn int(i: i64) -> Value {
    Value::Integer(i)
}

/// `define("Point", :x, :y)`
pub fn point(factory: &Factory) -> Arc<RecordType> {
    factory
        .define([Value::from("Point"), sym("x"), sym("y")])
        .expect("Point is a valid definition")
}
