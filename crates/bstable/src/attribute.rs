//! Named values with defaults, rendered as HTML `data-*` attributes.
//!
//! An [`Attribute`] only produces markup when its current value differs from
//! its default, so a freshly seeded table or column renders no configuration
//! at all and leaves the client-side widget on its own defaults.
//!
//! ```
//! use bstable::Attribute;
//!
//! let mut attr = Attribute::new("pageSize", 10);
//! assert_eq!(attr.render(), "");
//!
//! attr.set_value(25);
//! assert_eq!(attr.render(), r#" data-page-size="25""#);
//! ```

use crate::error::{Result, TableError};
use crate::value::Value;
use std::str::FromStr;

/// One of the three fields of an [`Attribute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    Name,
    Default,
    Value,
}

impl FromStr for Property {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Property::Name),
            "default" => Ok(Property::Default),
            "value" => Ok(Property::Value),
            other => Err(TableError::UnknownProperty(other.to_string())),
        }
    }
}

/// A named value with a default.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    default: Value,
    value: Value,
}

impl Attribute {
    /// Create an attribute whose value starts at its default.
    pub fn new(name: impl Into<String>, default: impl Into<Value>) -> Self {
        let default = default.into();
        Attribute {
            name: name.into(),
            value: default.clone(),
            default,
        }
    }

    /// Create an attribute with an explicit initial value.
    ///
    /// A `Null` value falls back to the default.
    pub fn with_value(
        name: impl Into<String>,
        default: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Self {
        let mut attr = Attribute::new(name, default);
        let value = value.into();
        if !value.is_null() {
            attr.value = value;
        }
        attr
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = value.into();
        self
    }

    pub fn set_default(&mut self, default: impl Into<Value>) -> &mut Self {
        self.default = default.into();
        self
    }

    /// Read a field by property. The name is returned as a `Value::String`.
    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::Name => Value::String(self.name.clone()),
            Property::Default => self.default.clone(),
            Property::Value => self.value.clone(),
        }
    }

    /// Overwrite a field by property.
    ///
    /// # Errors
    ///
    /// Fails with [`TableError::InvalidValue`] when assigning a non-string
    /// to [`Property::Name`].
    pub fn set(&mut self, property: Property, value: impl Into<Value>) -> Result<&mut Self> {
        let value = value.into();
        match property {
            Property::Name => match value {
                Value::String(name) => self.name = name,
                other => {
                    return Err(TableError::InvalidValue {
                        field: "name".to_string(),
                        expected: "string",
                        actual: other.kind(),
                    })
                }
            },
            Property::Default => self.default = value,
            Property::Value => self.value = value,
        }
        Ok(self)
    }

    /// Whether the current value differs from the default.
    pub fn is_overridden(&self) -> bool {
        self.value != self.default
    }

    /// Render as ` data-<kebab-name>="<value>"`, or an empty string when the
    /// value equals the default.
    pub fn render(&self) -> String {
        if !self.is_overridden() {
            return String::new();
        }
        format!(
            " data-{}=\"{}\"",
            kebab_case(&self.name),
            self.value.to_attribute_text()
        )
    }
}

/// Convert a camelCase name to kebab-case.
///
/// Every ASCII uppercase letter except one in the first position gets a
/// hyphen in front, then the whole name is lowercased. Names that are
/// already kebab-case pass through.
///
/// ```
/// use bstable::kebab_case;
///
/// assert_eq!(kebab_case("pageSize"), "page-size");
/// assert_eq!(kebab_case("checkbox-header"), "checkbox-header");
/// assert_eq!(kebab_case("Url"), "url");
/// ```
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// Insertion-ordered set of attributes keyed by name.
///
/// Render order is registration order: seeded slots first, ad-hoc keys after.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    items: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(items: Vec<Attribute>) -> Self {
        AttributeSet { items }
    }

    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.items.iter().find(|a| a.name == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Attribute> {
        self.items.iter_mut().find(|a| a.name == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Append a new attribute. An existing attribute with the same name is
    /// replaced in place.
    pub fn insert(&mut self, attr: Attribute) {
        match self.get_mut(&attr.name) {
            Some(existing) => *existing = attr,
            None => self.items.push(attr),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Concatenated markup of every overridden attribute.
    pub fn render(&self) -> String {
        self.items.iter().map(Attribute::render).collect()
    }
}
