// Heap object layout

use crate::{Heap, Symbol, Thrown, Value};
use std::fmt;
use std::rc::Rc;

/// Accessor property getter; may throw
pub type Getter = Rc<dyn Fn(&Heap) -> Result<Value, Thrown>>;

/// User supplied override for an object's rendering
pub type CustomInspect = Rc<dyn Fn(&Heap) -> Result<Value, Thrown>>;

/// Own property key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl From<&str> for PropertyKey {
    fn from(key: &str) -> Self {
        PropertyKey::String(key.to_string())
    }
}

impl From<Symbol> for PropertyKey {
    fn from(sym: Symbol) -> Self {
        PropertyKey::Symbol(sym)
    }
}

/// Own property slot
#[derive(Clone)]
pub enum Property {
    Data(Value),
    Accessor(Getter),
}

impl Property {
    /// Read the property, running the getter for accessors
    pub fn read(&self, heap: &Heap) -> Result<Value, Thrown> {
        match self {
            Property::Data(value) => Ok(value.clone()),
            Property::Accessor(getter) => getter(heap),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Property::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Property::Accessor(_) => write!(f, "Accessor(..)"),
        }
    }
}

/// Element type of a typed array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedArrayKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl TypedArrayKind {
    /// Constructor name, e.g. `Uint8Array`
    pub fn name(self) -> &'static str {
        match self {
            TypedArrayKind::Int8 => "Int8Array",
            TypedArrayKind::Uint8 => "Uint8Array",
            TypedArrayKind::Uint8Clamped => "Uint8ClampedArray",
            TypedArrayKind::Int16 => "Int16Array",
            TypedArrayKind::Uint16 => "Uint16Array",
            TypedArrayKind::Int32 => "Int32Array",
            TypedArrayKind::Uint32 => "Uint32Array",
            TypedArrayKind::Float32 => "Float32Array",
            TypedArrayKind::Float64 => "Float64Array",
            TypedArrayKind::BigInt64 => "BigInt64Array",
            TypedArrayKind::BigUint64 => "BigUint64Array",
        }
    }
}

/// Flavor of a callable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    AsyncFunction,
    GeneratorFunction,
    AsyncGeneratorFunction,
    /// Class constructors are plain functions as far as their prototype goes
    Class,
}

impl FunctionKind {
    pub fn constructor_name(self) -> &'static str {
        match self {
            FunctionKind::Function | FunctionKind::Class => "Function",
            FunctionKind::AsyncFunction => "AsyncFunction",
            FunctionKind::GeneratorFunction => "GeneratorFunction",
            FunctionKind::AsyncGeneratorFunction => "AsyncGeneratorFunction",
        }
    }
}

/// Settlement state of a promise
#[derive(Debug, Clone, PartialEq)]
pub enum PromiseState {
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

/// Value held by a `String`/`Number`/`Boolean` wrapper object
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// Internal slots that decide how an object renders
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Ordinary,
    /// `None` slots are holes
    Array(Vec<Option<Value>>),
    TypedArray {
        element: TypedArrayKind,
        values: Vec<Value>,
    },
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    WeakSet,
    WeakMap,
    /// Milliseconds since the epoch; NaN for an invalid date
    Date(f64),
    RegExp {
        source: String,
        flags: String,
    },
    Error {
        name: String,
        message: String,
        stack: Option<String>,
    },
    Function {
        kind: FunctionKind,
        name: String,
    },
    Promise(PromiseState),
    Boxed(Primitive),
}

/// A heap object
#[derive(Clone)]
pub struct Object {
    pub kind: ObjectKind,
    /// Name of the constructor the object was created by
    pub class_name: Option<String>,
    /// `Symbol.toStringTag` override
    pub to_string_tag: Option<String>,
    properties: Vec<(PropertyKey, Property)>,
    custom_inspect: Option<CustomInspect>,
}

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            class_name: None,
            to_string_tag: None,
            properties: Vec::new(),
            custom_inspect: None,
        }
    }

    pub fn with_class_name<S: Into<String>>(mut self, name: S) -> Self {
        self.class_name = Some(name.into());
        self
    }

    pub fn with_to_string_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.to_string_tag = Some(tag.into());
        self
    }

    /// Define or overwrite an own property, keeping its original position
    pub fn define(&mut self, key: PropertyKey, property: Property) {
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = property,
            None => self.properties.push((key, property)),
        }
    }

    pub fn get_own(&self, key: &PropertyKey) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, property)| property)
    }

    /// Own string-keyed properties in definition order
    pub fn string_properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().filter_map(|(key, property)| match key {
            PropertyKey::String(name) => Some((name.as_str(), property)),
            PropertyKey::Symbol(_) => None,
        })
    }

    /// Own symbol-keyed properties in definition order
    pub fn symbol_properties(&self) -> impl Iterator<Item = (&Symbol, &Property)> {
        self.properties.iter().filter_map(|(key, property)| match key {
            PropertyKey::Symbol(sym) => Some((sym, property)),
            PropertyKey::String(_) => None,
        })
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn custom_inspect(&self) -> Option<&CustomInspect> {
        self.custom_inspect.as_ref()
    }

    pub fn set_custom_inspect(&mut self, hook: CustomInspect) {
        self.custom_inspect = Some(hook);
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Object")
            .field("kind", &self.kind)
            .field("class_name", &self.class_name)
            .field("to_string_tag", &self.to_string_tag)
            .field("properties", &self.properties)
            .field("custom_inspect", &self.custom_inspect.is_some())
            .finish()
    }
}
