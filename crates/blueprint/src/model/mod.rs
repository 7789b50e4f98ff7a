//! Data model types.
//!
//! - [`Blueprint`]: the tagged value tree
//! - Builders for assembling trees in one expression

pub mod blueprint;
pub mod builder;

pub use blueprint::{Array, Blueprint, BlueprintKind, Object};
pub use builder::{ArrayBuilder, ObjectBuilder};
