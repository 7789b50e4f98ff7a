//! Builder API for ergonomic Blueprint construction.
//!
//! Provides a fluent interface for assembling nested trees without
//! threading mutable references through every level.
//!
//! # Example
//!
//! ```rust
//! use blueprint::model::builder::ObjectBuilder;
//!
//! let config = ObjectBuilder::new()
//!     .string("name", "server")
//!     .integer("port", 8080)
//!     .array("hosts", |a| a
//!         .string("alpha")
//!         .string("beta")
//!     )
//!     .object("tls", |o| o.boolean("enabled", false))
//!     .build();
//!
//! assert_eq!(config["hosts"][1].as_str(), "beta");
//! ```

use crate::model::{Array, Blueprint, Object};

/// Builder for an Object node.
///
/// Inserting a key that is already present replaces its value and keeps the
/// original position.
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    children: Object,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an arbitrary node.
    pub fn value(mut self, key: impl Into<String>, value: Blueprint) -> Self {
        self.children.insert(key.into(), value);
        self
    }

    pub fn null(self, key: impl Into<String>) -> Self {
        self.value(key, Blueprint::Null)
    }

    pub fn boolean(self, key: impl Into<String>, value: bool) -> Self {
        self.value(key, Blueprint::Boolean(value))
    }

    pub fn integer(self, key: impl Into<String>, value: i64) -> Self {
        self.value(key, Blueprint::Integer(value))
    }

    pub fn float(self, key: impl Into<String>, value: f64) -> Self {
        self.value(key, Blueprint::FloatingPoint(value))
    }

    pub fn string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.value(key, Blueprint::String(value.into()))
    }

    /// Inserts a nested Array populated by `f`.
    pub fn array<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ArrayBuilder) -> ArrayBuilder,
    {
        self.value(key, f(ArrayBuilder::new()).build())
    }

    /// Inserts a nested Object populated by `f`.
    pub fn object<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ObjectBuilder) -> ObjectBuilder,
    {
        self.value(key, f(ObjectBuilder::new()).build())
    }

    /// Returns the number of keys added so far.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Builds the Object node.
    pub fn build(self) -> Blueprint {
        Blueprint::Object(self.children)
    }
}

/// Builder for an Array node.
#[derive(Debug, Clone, Default)]
pub struct ArrayBuilder {
    children: Array,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an arbitrary node.
    pub fn value(mut self, value: Blueprint) -> Self {
        self.children.push(value);
        self
    }

    /// Appends every node from `values`.
    pub fn values(mut self, values: impl IntoIterator<Item = Blueprint>) -> Self {
        self.children.extend(values);
        self
    }

    pub fn null(self) -> Self {
        self.value(Blueprint::Null)
    }

    pub fn boolean(self, value: bool) -> Self {
        self.value(Blueprint::Boolean(value))
    }

    pub fn integer(self, value: i64) -> Self {
        self.value(Blueprint::Integer(value))
    }

    pub fn float(self, value: f64) -> Self {
        self.value(Blueprint::FloatingPoint(value))
    }

    pub fn string(self, value: impl Into<String>) -> Self {
        self.value(Blueprint::String(value.into()))
    }

    /// Appends a nested Array populated by `f`.
    pub fn array<F>(self, f: F) -> Self
    where
        F: FnOnce(ArrayBuilder) -> ArrayBuilder,
    {
        self.value(f(ArrayBuilder::new()).build())
    }

    /// Appends a nested Object populated by `f`.
    pub fn object<F>(self, f: F) -> Self
    where
        F: FnOnce(ObjectBuilder) -> ObjectBuilder,
    {
        self.value(f(ObjectBuilder::new()).build())
    }

    /// Returns the number of elements added so far.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Builds the Array node.
    pub fn build(self) -> Blueprint {
        Blueprint::Array(self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_builder_basic() {
        let value = ObjectBuilder::new()
            .null("a")
            .boolean("b", true)
            .integer("c", -7)
            .float("d", 0.25)
            .string("e", "text")
            .build();

        assert!(value["a"].is_null());
        assert!(value["b"].as_boolean());
        assert_eq!(value["c"].as_integer(), -7);
        assert_eq!(value["d"].as_floating_point(), 0.25);
        assert_eq!(value["e"].as_str(), "text");
        assert_eq!(value.len(), 5);
    }

    #[test]
    fn test_nested_builders() {
        let value = ArrayBuilder::new()
            .integer(1)
            .array(|a| a.string("x").null())
            .object(|o| o.array("inner", |a| a.float(1.0)))
            .build();

        assert_eq!(value.len(), 3);
        assert_eq!(value[1][0].as_str(), "x");
        assert!(value[1][1].is_null());
        assert_eq!(value[2]["inner"][0].as_floating_point(), 1.0);
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let builder = ObjectBuilder::new()
            .integer("first", 1)
            .integer("second", 2)
            .string("first", "again");
        assert_eq!(builder.len(), 2);

        let value = builder.build();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["first", "second"]);
        assert_eq!(value["first"].as_str(), "again");
    }

    #[test]
    fn test_empty_builders() {
        assert!(ObjectBuilder::new().is_empty());
        assert!(ObjectBuilder::new().build().is_object());
        assert!(ArrayBuilder::new().build().is_array());
        let values = ArrayBuilder::new().values([Blueprint::Null, Blueprint::from(2)]);
        assert_eq!(values.len(), 2);
    }
}
