//! Data models templates render against
//!
//! A [`Model`] answers two questions for the renderer: "what is the value of this
//! property?" and "what does this zero-argument accessor return?". Answers come back
//! as a [`Value`], which is either a displayable scalar or another model to keep
//! resolving into.
//!
//! Implementations are provided for `serde_json::Value`, string-keyed maps and vectors.
//! Structs usually get theirs from `#[derive(Model)]`:
//!
//! ```rust
//! use dry_template::{Model, Template};
//!
//! #[derive(Model)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let user = User { name: "Spike".to_string(), age: 3 };
//! let template = Template::compile("{name} is {age}");
//! assert_eq!(template.render(&user), "Spike is 3");
//! ```

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
};

/// A value read from a model
#[derive(Clone)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Cow<'a, str>),
    Model(&'a dyn Model),
}

impl<'a> Value<'a> {
    /// Returns the nested model, if this value is one
    pub fn as_model(&self) -> Option<&'a dyn Model> {
        match self {
            Value::Model(model) => Some(*model),
            _ => None,
        }
    }

    /// The display form of a scalar; `None` for nested models
    pub fn into_display(self) -> Option<Cow<'a, str>> {
        Some(match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::UInt(u) => Cow::Owned(u.to_string()),
            Value::Float(n) => Cow::Owned(n.to_string()),
            Value::Str(s) => s,
            Value::Model(_) => return None,
        })
    }
}

impl<'a> std::fmt::Debug for Value<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::UInt(u) => write!(f, "UInt({})", u),
            Value::Float(n) => write!(f, "Float({})", n),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Model(_) => f.write_str("Model(..)"),
        }
    }
}

impl<'a> From<String> for Value<'a> {
    fn from(value: String) -> Self {
        Value::Str(Cow::Owned(value))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<&'a dyn Model> for Value<'a> {
    fn from(value: &'a dyn Model) -> Self {
        Value::Model(value)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

macro_rules! scalars {
    ($($ty:ty => $variant:ident as $as:ty),* $(,)?) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(value: $ty) -> Self {
                    Value::$variant(value as $as)
                }
            }

            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self as $as)
                }
            }
        )*
    };
}

scalars! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    isize => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    usize => UInt as u64,
    f64 => Float as f64,
}

/// Widens through the shortest decimal form so `0.1f32` stays `0.1`
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::NAN)
}

impl<'a> From<f32> for Value<'a> {
    fn from(value: f32) -> Self {
        Value::Float(widen(value))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(widen(*self))
    }
}

/// Something placeholder paths can be resolved against
pub trait Model {
    /// Reads a property
    fn get(&self, key: &str) -> Option<Value<'_>>;

    /// Invokes a zero-argument accessor
    fn call(&self, _method: &str) -> Option<Value<'_>> {
        None
    }
}

/// Conversion of a field into a [`Value`] borrowing from it
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value<'_> {
        use serde_json::Value as Json;
        match self {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                _ => n.as_f64().map_or(Value::Null, Value::Float),
            },
            Json::String(s) => Value::Str(Cow::Borrowed(s)),
            Json::Array(_) | Json::Object(_) => Value::Model(self),
        }
    }
}

impl Model for serde_json::Value {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        match self {
            serde_json::Value::Object(map) => Model::get(map, key),
            serde_json::Value::Array(items) => Model::get(items.as_slice(), key),
            _ => None,
        }
    }

    fn call(&self, method: &str) -> Option<Value<'_>> {
        match self {
            serde_json::Value::Object(map) => Model::call(map, method),
            serde_json::Value::Array(items) => Model::call(items.as_slice(), method),
            _ => None,
        }
    }
}

impl Model for serde_json::Map<String, serde_json::Value> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        serde_json::Map::get(self, key).map(ToValue::to_value)
    }

    fn call(&self, method: &str) -> Option<Value<'_>> {
        (method == "len").then(|| self.len().into())
    }
}

impl<V: ToValue> Model for HashMap<String, V> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        HashMap::get(self, key).map(ToValue::to_value)
    }

    fn call(&self, method: &str) -> Option<Value<'_>> {
        (method == "len").then(|| self.len().into())
    }
}

impl<V: ToValue> ToValue for HashMap<String, V> {
    fn to_value(&self) -> Value<'_> {
        Value::Model(self)
    }
}

impl<V: ToValue> Model for BTreeMap<String, V> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        BTreeMap::get(self, key).map(ToValue::to_value)
    }

    fn call(&self, method: &str) -> Option<Value<'_>> {
        (method == "len").then(|| self.len().into())
    }
}

impl<V: ToValue> ToValue for BTreeMap<String, V> {
    fn to_value(&self) -> Value<'_> {
        Value::Model(self)
    }
}

/// Slices are indexed by numeric steps: `items.0`
impl<T: ToValue> Model for [T] {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        let index: usize = key.parse().ok()?;
        <[T]>::get(self, index).map(ToValue::to_value)
    }

    fn call(&self, method: &str) -> Option<Value<'_>> {
        (method == "len").then(|| self.len().into())
    }
}

impl<T: ToValue> Model for Vec<T> {
    fn get(&self, key: &str) -> Option<Value<'_>> {
        Model::get(self.as_slice(), key)
    }

    fn call(&self, method: &str) -> Option<Value<'_>> {
        Model::call(self.as_slice(), method)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        Value::Model(self)
    }
}
