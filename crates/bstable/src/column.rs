//! Column definitions rendered as `<th>` header cells.

use crate::attribute::{Attribute, AttributeSet};
use crate::error::{Result, TableError};
use crate::value::Value;
use once_cell::sync::Lazy;

/// Recognized column options and their defaults, in render order.
static COLUMN_SCHEMA: Lazy<AttributeSet> = Lazy::new(|| {
    AttributeSet::from_attributes(vec![
        Attribute::new("field", Value::Null),
        Attribute::new("title", Value::Null),
        Attribute::new("titleTooltip", Value::Null),
        Attribute::new("class", Value::Null),
        Attribute::new("width", Value::Null),
        Attribute::new("widthUnit", "px"),
        Attribute::new("rowspan", Value::Null),
        Attribute::new("colspan", Value::Null),
        // left, right, center
        Attribute::new("align", Value::Null),
        Attribute::new("halign", Value::Null),
        Attribute::new("falign", Value::Null),
        // top, middle, bottom
        Attribute::new("valign", Value::Null),
        Attribute::new("cellStyle", Value::Null),
        Attribute::new("radio", false),
        Attribute::new("checkbox", false),
        Attribute::new("checkboxEnabled", true),
        Attribute::new("clickToSelect", true),
        Attribute::new("showSelectTitle", false),
        Attribute::new("sortable", false),
        Attribute::new("sortName", Value::Null),
        // asc, desc
        Attribute::new("order", "asc"),
        Attribute::new("sorter", Value::Null),
        Attribute::new("visible", true),
        Attribute::new("switchable", true),
        Attribute::new("cardVisible", true),
        Attribute::new("searchable", true),
        Attribute::new("formatter", Value::Null),
        Attribute::new("footerFormatter", Value::Null),
        Attribute::new("detailFormatter", Value::Null),
        Attribute::new("searchFormatter", true),
        Attribute::new("searchHighlightFormatter", Value::Null),
        Attribute::new("escape", Value::Null),
        Attribute::new("events", Value::Null),
    ])
});

/// A table column: its `data-*` options plus a display label.
///
/// # Example
///
/// ```
/// use bstable::Column;
///
/// let mut col = Column::new("first_name");
/// assert_eq!(col.label(), "First Name");
///
/// col.set_attribute("sortable", true);
/// assert_eq!(
///     col.render(),
///     r#"<th data-field="first_name" data-sortable="true">First Name</th>"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    field: String,
    attributes: AttributeSet,
    label: String,
}

impl Column {
    /// Create a column for a row field, seeding every recognized option.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        let mut column = Column {
            label: label_for(&field),
            attributes: (*COLUMN_SCHEMA).clone(),
            field: field.clone(),
        };
        column.set_attribute("field", field);
        column
    }

    /// The raw field name used to look up cell values in row records.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the derived display label.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    /// Set an option value. Keys outside the schema are registered with a
    /// `Null` default, so any non-null value for them renders.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        match self.attributes.get_mut(key) {
            Some(attr) => {
                attr.set_value(value);
            }
            None => {
                log::debug!("column '{}': registering custom attribute '{}'", self.field, key);
                let mut attr = Attribute::new(key, Value::Null);
                attr.set_value(value);
                self.attributes.insert(attr);
            }
        }
        self
    }

    /// Current value of an option.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownAttribute`] if `key` was never registered.
    pub fn attribute(&self, key: &str) -> Result<&Value> {
        self.lookup(key).map(Attribute::value)
    }

    /// Default value of an option.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownAttribute`] if `key` was never registered.
    pub fn attribute_default(&self, key: &str) -> Result<&Value> {
        self.lookup(key).map(Attribute::default_value)
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    fn lookup(&self, key: &str) -> Result<&Attribute> {
        self.attributes
            .get(key)
            .ok_or_else(|| TableError::UnknownAttribute(key.to_string()))
    }

    /// Render the `<th>` header cell.
    pub fn render(&self) -> String {
        format!("<th{}>{}</th>", self.attributes.render(), self.label)
    }
}

/// Derive a display label: underscores become spaces and the first letter
/// of every word is uppercased. The rest of each word is left alone.
fn label_for(field: &str) -> String {
    let mut label = String::with_capacity(field.len());
    let mut word_start = true;
    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        if word_start {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
        word_start = c.is_whitespace();
    }
    label
}
