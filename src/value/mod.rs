//! Input object graph
//!
//! Values handed to the conversion engine are scalars, generic maps, ordered
//! lists, or typed resources behind the [`Resource`] capability trait.

pub mod map;
pub mod resource;

pub use map::FieldMap;
pub use resource::{
    CollectionResource, JsonResource, LazyResource, Resource, HREF_FIELD, ITEMS_FIELD,
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// A value in the source object graph
#[derive(Debug, Clone)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Timestamps are emitted as UTC ISO-8601 strings with millisecond precision.
    Date(DateTime<Utc>),
    Map(FieldMap),
    List(Vec<FieldValue>),
    Resource(Arc<dyn Resource>),
}

impl FieldValue {
    /// Wrap a resource implementation
    pub fn resource<R: Resource + 'static>(resource: R) -> Self {
        FieldValue::Resource(Arc::new(resource))
    }

    /// Convert plain JSON; objects become generic maps
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(object) => FieldValue::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, FieldValue::from_json(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from_json).collect())
            }
            other => Self::from_json_scalar(other),
        }
    }

    /// Convert JSON, treating objects that carry a string `href` as resources
    pub fn from_json_resources(value: Value) -> Self {
        match value {
            Value::Object(object) => {
                if object.get(HREF_FIELD).is_some_and(Value::is_string) {
                    FieldValue::resource(JsonResource::new(object))
                } else {
                    FieldValue::Map(
                        object
                            .into_iter()
                            .map(|(k, v)| (k, FieldValue::from_json_resources(v)))
                            .collect(),
                    )
                }
            }
            Value::Array(items) => FieldValue::List(
                items
                    .into_iter()
                    .map(FieldValue::from_json_resources)
                    .collect(),
            ),
            other => Self::from_json_scalar(other),
        }
    }

    fn from_json_scalar(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::String(s),
            compound => FieldValue::from_json(compound),
        }
    }

    /// Maps, lists and resources are compound; everything else is a scalar
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            FieldValue::Map(_) | FieldValue::List(_) | FieldValue::Resource(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::Date(_) => "date",
            FieldValue::Map(_) => "map",
            FieldValue::List(_) => "list",
            FieldValue::Resource(_) => "resource",
        }
    }

    /// Output form of a scalar, or `None` for compound values
    pub fn to_scalar_json(&self) -> Option<Value> {
        match self {
            FieldValue::Null => Some(Value::Null),
            FieldValue::Bool(b) => Some(Value::Bool(*b)),
            FieldValue::Number(n) => Some(Value::Number(n.clone())),
            FieldValue::String(s) => Some(Value::String(s.clone())),
            FieldValue::Date(d) => Some(Value::String(to_utc_iso8601(d))),
            FieldValue::Map(_) | FieldValue::List(_) | FieldValue::Resource(_) => None,
        }
    }

    /// View this value through the field-enumeration capability
    pub fn as_compound(&self) -> Option<Compound<'_>> {
        match self {
            FieldValue::Map(map) => Some(Compound::Map(map)),
            FieldValue::List(items) => Some(Compound::List(items)),
            FieldValue::Resource(resource) => Some(Compound::Resource(resource.as_ref())),
            _ => None,
        }
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn to_utc_iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a == b,
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Date(a), FieldValue::Date(b)) => a == b,
            (FieldValue::Map(a), FieldValue::Map(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Resource(a), FieldValue::Resource(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    /// Non-finite floats have no JSON form and become null.
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(value: FieldMap) -> Self {
        FieldValue::Map(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::List(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Borrowed view of a compound value: enumerate fields, read them by name
#[derive(Clone, Copy)]
pub enum Compound<'a> {
    Map(&'a FieldMap),
    List(&'a [FieldValue]),
    Resource(&'a dyn Resource),
}

impl<'a> Compound<'a> {
    /// True when the value iterates elements (lists and collection resources)
    pub fn is_collection(&self) -> bool {
        match self {
            Compound::Map(_) => false,
            Compound::List(_) => true,
            Compound::Resource(resource) => resource.is_collection(),
        }
    }

    /// Field names in output order. Collections always include `items` once.
    pub fn field_names(&self) -> Vec<String> {
        match self {
            Compound::Map(map) => map.keys().map(str::to_string).collect(),
            Compound::List(_) => vec![ITEMS_FIELD.to_string()],
            Compound::Resource(resource) => {
                let mut names = resource.field_names();
                if resource.is_collection() && !names.iter().any(|n| n == ITEMS_FIELD) {
                    names.push(ITEMS_FIELD.to_string());
                }
                names
            }
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        match self {
            Compound::Map(map) => map.contains_key(name),
            Compound::List(_) => name == ITEMS_FIELD,
            Compound::Resource(resource) => {
                resource.has_field(name) || (name == ITEMS_FIELD && resource.is_collection())
            }
        }
    }

    /// Read a field. Missing fields read as null.
    ///
    /// Map entries and stored resource properties are borrowed. Reading
    /// `items` copies the elements into a list; use [`Compound::elements`]
    /// to iterate them in place.
    pub fn read_field(&self, name: &str) -> Cow<'a, FieldValue> {
        match *self {
            Compound::Map(map) => map
                .get(name)
                .map(Cow::Borrowed)
                .unwrap_or(Cow::Owned(FieldValue::Null)),
            Compound::List(items) if name == ITEMS_FIELD => {
                Cow::Owned(FieldValue::List(items.to_vec()))
            }
            Compound::List(_) => Cow::Owned(FieldValue::Null),
            Compound::Resource(resource) => match resource.field(name) {
                Some(value) => value,
                None if name == ITEMS_FIELD => Cow::Owned(
                    resource
                        .elements()
                        .map(|items| FieldValue::List(items.to_vec()))
                        .unwrap_or(FieldValue::Null),
                ),
                None => Cow::Owned(FieldValue::Null),
            },
        }
    }

    /// Elements of a collection, in iteration order
    pub fn elements(&self) -> &'a [FieldValue] {
        match *self {
            Compound::Map(_) => &[],
            Compound::List(items) => items,
            Compound::Resource(resource) => resource.elements().unwrap_or(&[]),
        }
    }

    /// Identity of the value. Only resources have one.
    pub fn href(&self) -> Option<String> {
        match self {
            Compound::Resource(resource) => resource.href(),
            _ => None,
        }
    }
}
