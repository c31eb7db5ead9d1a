//! Capability interface for resource-like compound values

use super::{FieldMap, FieldValue};
use crate::error::MaterializationError;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Name under which a collection exposes its elements
pub const ITEMS_FIELD: &str = "items";

/// Name of the identity field emitted when nothing else is
pub const HREF_FIELD: &str = "href";

/// A typed resource with named properties
///
/// Implementations enumerate and read their own fields; the conversion engine
/// never inspects a resource any other way. Lazily loaded resources report
/// `is_materialized() == false` until `materialize` has populated them, and
/// the engine calls `materialize` before reading any field.
pub trait Resource: Send + Sync {
    /// Declared property names, in output order
    fn field_names(&self) -> Vec<String>;

    fn has_field(&self, name: &str) -> bool {
        self.field_names().iter().any(|n| n == name)
    }

    /// Current value of a property; `None` when the resource has no such field.
    ///
    /// Stored properties are lent out with `Cow::Borrowed`; computed ones are
    /// returned as `Cow::Owned`.
    fn field(&self, name: &str) -> Option<Cow<'_, FieldValue>>;

    /// Stable external locator of this resource, if it has one
    fn href(&self) -> Option<String> {
        None
    }

    /// Whether this resource iterates elements
    fn is_collection(&self) -> bool {
        self.elements().is_some()
    }

    /// Ordered elements when this resource is a collection
    fn elements(&self) -> Option<&[FieldValue]> {
        None
    }

    fn is_materialized(&self) -> bool {
        true
    }

    /// Load the resource's data. Only called while `is_materialized()` is false.
    fn materialize(&self) -> Result<(), MaterializationError> {
        Ok(())
    }
}

impl fmt::Debug for dyn Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("href", &self.href())
            .field("materialized", &self.is_materialized())
            .finish()
    }
}

/// A resource backed by a JSON object whose `href` string is its identity
///
/// Nested objects that carry an `href` become `JsonResource`s as well, so a
/// JSON document describing linked resources converts the way the live
/// resources would.
#[derive(Debug, Clone)]
pub struct JsonResource {
    href: Option<String>,
    properties: FieldMap,
}

impl JsonResource {
    pub fn new(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let href = object
            .get(HREF_FIELD)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let mut properties = FieldMap::with_capacity(object.len());
        for (key, value) in object {
            properties.insert(key, FieldValue::from_json_resources(value));
        }

        Self { href, properties }
    }

}

impl Resource for JsonResource {
    fn field_names(&self) -> Vec<String> {
        self.properties.keys().map(str::to_string).collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn field(&self, name: &str) -> Option<Cow<'_, FieldValue>> {
        self.properties.get(name).map(Cow::Borrowed)
    }

    fn href(&self) -> Option<String> {
        self.href.clone()
    }
}

/// Loader invoked the first time a [`LazyResource`] is read
pub type Loader = dyn Fn() -> Result<FieldMap, anyhow::Error> + Send + Sync;

/// A resource known only by its href until first materialized
///
/// Before loading only `href` is readable; `materialize` runs the loader once
/// and caches its properties.
pub struct LazyResource {
    href: String,
    loader: Box<Loader>,
    properties: OnceLock<FieldMap>,
}

impl LazyResource {
    pub fn new<F>(href: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<FieldMap, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            href: href.into(),
            loader: Box::new(loader),
            properties: OnceLock::new(),
        }
    }

    pub fn into_value(self) -> FieldValue {
        FieldValue::Resource(Arc::new(self))
    }
}

impl fmt::Debug for LazyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResource")
            .field("href", &self.href)
            .field("materialized", &self.properties.get().is_some())
            .finish()
    }
}

impl Resource for LazyResource {
    fn field_names(&self) -> Vec<String> {
        match self.properties.get() {
            Some(properties) => properties.keys().map(str::to_string).collect(),
            None => vec![HREF_FIELD.to_string()],
        }
    }

    fn field(&self, name: &str) -> Option<Cow<'_, FieldValue>> {
        match self.properties.get() {
            Some(properties) => properties.get(name).map(Cow::Borrowed),
            None if name == HREF_FIELD => Some(Cow::Owned(FieldValue::String(self.href.clone()))),
            None => None,
        }
    }

    fn href(&self) -> Option<String> {
        Some(self.href.clone())
    }

    fn is_materialized(&self) -> bool {
        self.properties.get().is_some()
    }

    fn materialize(&self) -> Result<(), MaterializationError> {
        if self.properties.get().is_some() {
            return Ok(());
        }
        let properties =
            (self.loader)().map_err(|e| MaterializationError::for_href(&self.href, e))?;
        // A concurrent loader may have won; either result is the same resource.
        let _ = self.properties.set(properties);
        Ok(())
    }
}

/// A collection resource: its own properties plus ordered elements
///
/// The synthetic `items` field is always part of the enumeration, placed last
/// unless the properties already name it.
#[derive(Debug, Clone)]
pub struct CollectionResource {
    href: Option<String>,
    properties: FieldMap,
    items: Vec<FieldValue>,
}

impl CollectionResource {
    pub fn new(href: Option<String>, items: Vec<FieldValue>) -> Self {
        Self {
            href,
            properties: FieldMap::new(),
            items,
        }
    }

    /// Add a collection-level property such as `offset` or `size`
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn into_value(self) -> FieldValue {
        FieldValue::Resource(Arc::new(self))
    }
}

impl Resource for CollectionResource {
    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.properties.keys().map(str::to_string).collect();
        if !self.properties.contains_key(ITEMS_FIELD) {
            names.push(ITEMS_FIELD.to_string());
        }
        names
    }

    fn field(&self, name: &str) -> Option<Cow<'_, FieldValue>> {
        self.properties.get(name).map(Cow::Borrowed)
    }

    fn href(&self) -> Option<String> {
        self.href.clone()
    }

    fn is_collection(&self) -> bool {
        true
    }

    fn elements(&self) -> Option<&[FieldValue]> {
        Some(&self.items)
    }
}
