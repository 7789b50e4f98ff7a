//! The Blueprint tagged value tree.
//!
//! A [`Blueprint`] node is exactly one of eight kinds. Scalar payloads are
//! stored inline; String, Array and Object payloads own their contents, and
//! cloning a node deep-copies every descendant.
//!
//! Reads never fail: asking a node for the wrong kind returns `false`, `0`,
//! `0.0`, `None` or `""`, so lookups on dynamic data can be chained and
//! checked once at the end:
//!
//! ```
//! use blueprint::Blueprint;
//!
//! let mut root = Blueprint::default();
//! let object = root.set_to_object();
//! object.insert("port".into(), Blueprint::from(8080));
//!
//! assert_eq!(root["port"].as_integer(), 8080);
//! assert_eq!(root["missing"]["deeper"].as_integer(), 0);
//! assert!(root["missing"].is_invalid());
//! ```

use std::fmt::{self, Write};
use std::ops::Index;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Ordered children of an Array node.
pub type Array = Vec<Blueprint>;

/// Children of an Object node: unique keys in insertion order.
pub type Object = IndexMap<String, Blueprint, FxBuildHasher>;

static INVALID: Blueprint = Blueprint::Invalid;

/// Kind tag of a [`Blueprint`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlueprintKind {
    Invalid = 0,
    Null = 1,
    Boolean = 2,
    Integer = 3,
    FloatingPoint = 4,
    String = 5,
    Array = 6,
    Object = 7,
}

impl BlueprintKind {
    /// Creates a kind from its wire representation.
    pub fn from_u8(v: u8) -> Option<BlueprintKind> {
        match v {
            0 => Some(BlueprintKind::Invalid),
            1 => Some(BlueprintKind::Null),
            2 => Some(BlueprintKind::Boolean),
            3 => Some(BlueprintKind::Integer),
            4 => Some(BlueprintKind::FloatingPoint),
            5 => Some(BlueprintKind::String),
            6 => Some(BlueprintKind::Array),
            7 => Some(BlueprintKind::Object),
            _ => None,
        }
    }

    /// Lowercase name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            BlueprintKind::Invalid => "invalid",
            BlueprintKind::Null => "null",
            BlueprintKind::Boolean => "boolean",
            BlueprintKind::Integer => "integer",
            BlueprintKind::FloatingPoint => "floating point",
            BlueprintKind::String => "string",
            BlueprintKind::Array => "array",
            BlueprintKind::Object => "object",
        }
    }
}

/// A node of a dynamically typed value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Blueprint {
    /// No value. The default state.
    #[default]
    Invalid,
    Null,
    Boolean(bool),
    Integer(i64),
    FloatingPoint(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Blueprint {
    /// Returns the kind tag of this node.
    pub fn kind(&self) -> BlueprintKind {
        match self {
            Blueprint::Invalid => BlueprintKind::Invalid,
            Blueprint::Null => BlueprintKind::Null,
            Blueprint::Boolean(_) => BlueprintKind::Boolean,
            Blueprint::Integer(_) => BlueprintKind::Integer,
            Blueprint::FloatingPoint(_) => BlueprintKind::FloatingPoint,
            Blueprint::String(_) => BlueprintKind::String,
            Blueprint::Array(_) => BlueprintKind::Array,
            Blueprint::Object(_) => BlueprintKind::Object,
        }
    }

    // =========================================================================
    // Kind checks
    // =========================================================================

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Blueprint::Invalid)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Blueprint::Null)
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Blueprint::Boolean(_))
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Blueprint::Integer(_))
    }

    #[inline]
    pub fn is_floating_point(&self) -> bool {
        matches!(self, Blueprint::FloatingPoint(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Blueprint::String(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Blueprint::Array(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Blueprint::Object(_))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the boolean payload, or `false` for any other kind.
    #[inline]
    pub fn as_boolean(&self) -> bool {
        match self {
            Blueprint::Boolean(b) => *b,
            _ => false,
        }
    }

    /// Returns the integer payload, or `0` for any other kind.
    #[inline]
    pub fn as_integer(&self) -> i64 {
        match self {
            Blueprint::Integer(i) => *i,
            _ => 0,
        }
    }

    /// Returns the floating point payload, or `0.0` for any other kind.
    #[inline]
    pub fn as_floating_point(&self) -> f64 {
        match self {
            Blueprint::FloatingPoint(f) => *f,
            _ => 0.0,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Blueprint::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut String> {
        match self {
            Blueprint::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string payload, or `""` for any other kind.
    pub fn as_str(&self) -> &str {
        self.as_string().map_or("", String::as_str)
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Blueprint::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Blueprint::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Blueprint::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Blueprint::Object(o) => Some(o),
            _ => None,
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================
    //
    // Each transition drops the current payload before installing the new
    // one; a String/Array/Object payload releases its storage here.

    pub fn set_to_invalid(&mut self) {
        *self = Blueprint::Invalid;
    }

    pub fn set_to_null(&mut self) {
        *self = Blueprint::Null;
    }

    pub fn set_to_boolean(&mut self, value: bool) {
        *self = Blueprint::Boolean(value);
    }

    pub fn set_to_integer(&mut self, value: i64) {
        *self = Blueprint::Integer(value);
    }

    pub fn set_to_floating_point(&mut self, value: f64) {
        *self = Blueprint::FloatingPoint(value);
    }

    /// Turns this node into a String holding a copy of `value` and returns
    /// the payload for further editing.
    pub fn set_to_string(&mut self, value: impl Into<String>) -> &mut String {
        *self = Blueprint::String(value.into());
        match self {
            Blueprint::String(s) => s,
            _ => unreachable!("node was just set to a string"),
        }
    }

    /// Turns this node into an empty Array and returns it for populating.
    pub fn set_to_array(&mut self) -> &mut Array {
        *self = Blueprint::Array(Array::new());
        match self {
            Blueprint::Array(a) => a,
            _ => unreachable!("node was just set to an array"),
        }
    }

    /// Turns this node into an empty Object and returns it for populating.
    pub fn set_to_object(&mut self) -> &mut Object {
        *self = Blueprint::Object(Object::default());
        match self {
            Blueprint::Object(o) => o,
            _ => unreachable!("node was just set to an object"),
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Looks up an Object child by key.
    pub fn get(&self, key: &str) -> Option<&Blueprint> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Blueprint> {
        self.as_object_mut().and_then(|o| o.get_mut(key))
    }

    /// Looks up an Array child by position.
    pub fn get_index(&self, index: usize) -> Option<&Blueprint> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// Mutable counterpart of [`get_index`](Self::get_index).
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Blueprint> {
        self.as_array_mut().and_then(|a| a.get_mut(index))
    }

    /// Number of children of an Array or Object, 0 for other kinds.
    pub fn len(&self) -> usize {
        match self {
            Blueprint::Array(a) => a.len(),
            Blueprint::Object(o) => o.len(),
            _ => 0,
        }
    }

    /// Returns true if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<&str> for Blueprint {
    type Output = Blueprint;

    /// Returns the child at `key`, or an Invalid node if there is none.
    fn index(&self, key: &str) -> &Blueprint {
        self.get(key).unwrap_or(&INVALID)
    }
}

impl Index<usize> for Blueprint {
    type Output = Blueprint;

    /// Returns the child at `index`, or an Invalid node if there is none.
    fn index(&self, index: usize) -> &Blueprint {
        self.get_index(index).unwrap_or(&INVALID)
    }
}

impl From<bool> for Blueprint {
    fn from(v: bool) -> Self {
        Blueprint::Boolean(v)
    }
}

impl From<i64> for Blueprint {
    fn from(v: i64) -> Self {
        Blueprint::Integer(v)
    }
}

impl From<i32> for Blueprint {
    fn from(v: i32) -> Self {
        Blueprint::Integer(i64::from(v))
    }
}

impl From<f64> for Blueprint {
    fn from(v: f64) -> Self {
        Blueprint::FloatingPoint(v)
    }
}

impl From<&str> for Blueprint {
    fn from(v: &str) -> Self {
        Blueprint::String(v.to_string())
    }
}

impl From<String> for Blueprint {
    fn from(v: String) -> Self {
        Blueprint::String(v)
    }
}

impl From<Array> for Blueprint {
    fn from(v: Array) -> Self {
        Blueprint::Array(v)
    }
}

impl From<Object> for Blueprint {
    fn from(v: Object) -> Self {
        Blueprint::Object(v)
    }
}

impl FromIterator<Blueprint> for Blueprint {
    fn from_iter<I: IntoIterator<Item = Blueprint>>(iter: I) -> Self {
        Blueprint::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Blueprint)> for Blueprint {
    fn from_iter<I: IntoIterator<Item = (K, Blueprint)>>(iter: I) -> Self {
        Blueprint::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Writes `src` as the body of a JSON string literal.
fn write_escaped<W: Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Renders the tree as compact JSON-like text. Invalid nodes render as
/// `invalid`.
impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blueprint::Invalid => f.write_str("invalid"),
            Blueprint::Null => f.write_str("null"),
            Blueprint::Boolean(b) => write!(f, "{b}"),
            Blueprint::Integer(i) => write!(f, "{i}"),
            Blueprint::FloatingPoint(n) => write!(f, "{n:?}"),
            Blueprint::String(s) => {
                f.write_char('"')?;
                write_escaped(s, f)?;
                f.write_char('"')
            }
            Blueprint::Array(children) => {
                f.write_char('[')?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_char(']')
            }
            Blueprint::Object(children) => {
                f.write_char('{')?;
                for (i, (key, child)) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    f.write_char('"')?;
                    write_escaped(key, f)?;
                    write!(f, "\":{child}")?;
                }
                f.write_char('}')
            }
        }
    }
}
