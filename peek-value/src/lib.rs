// peek-value - Runtime value model rendered by the peek inspector
// Objects live in a Heap arena and are referenced through copyable ObjectId handles

pub mod heap;
pub mod json;
pub mod object;

pub use heap::{Heap, PromiseIntrospector};
pub use object::{
    CustomInspect, FunctionKind, Getter, Object, ObjectKind, Primitive, PromiseState, Property,
    PropertyKey, TypedArrayKind,
};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Handle to an object stored in a [`Heap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A script value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(BigInt),
    String(String),
    Symbol(Symbol),
    Object(ObjectId),
    /// A host value category the inspector has no renderer for
    Host(String),
}

impl Value {
    pub fn string<S: Into<String>>(s: S) -> Self {
        Value::String(s.into())
    }

    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    pub fn bigint(n: i128) -> Self {
        Value::BigInt(BigInt::from_i128(n))
    }

    /// Numbers and bigints, the values that align right in grouped output
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_) | Value::BigInt(_))
    }

    /// Equality used by `Set` membership and `Map` keys: NaN equals NaN,
    /// `-0` equals `0`, symbols and objects compare by identity
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self == other,
        }
    }

    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// Name reported by `typeof`, without looking into the heap
    pub fn type_of(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Host(tag) => tag,
        }
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Object(id)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Arbitrary precision integer kept as its decimal digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    digits: String,
}

impl BigInt {
    pub fn from_i128(n: i128) -> Self {
        Self {
            negative: n < 0,
            digits: n.unsigned_abs().to_string(),
        }
    }

    /// Parse an optionally signed run of decimal digits
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let digits = body.trim_start_matches('0');
        if digits.is_empty() {
            return Some(Self::from_i128(0));
        }
        Some(Self {
            negative,
            digits: digits.to_string(),
        })
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.digits)
    }
}

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// Symbol with an optional description.
///
/// Every call to [`Symbol::new`] yields a distinct symbol, even for equal
/// descriptions; clones share the identity of their original.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    pub description: Option<String>,
}

impl Symbol {
    pub fn new(description: Option<&str>) -> Self {
        Self {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: description.map(str::to_string),
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "Symbol({})", desc),
            None => write!(f, "Symbol()"),
        }
    }
}

/// An exception raised by script code (a getter or an inspect hook)
#[derive(Debug, Clone, Error)]
#[error("Uncaught {message}")]
pub struct Thrown {
    pub message: String,
}

impl Thrown {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by heap mutation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeapError {
    #[error("Object handle {0} does not belong to this heap")]
    InvalidHandle(ObjectId),

    #[error("Object {id} is not {expected}")]
    WrongKind { id: ObjectId, expected: &'static str },
}
