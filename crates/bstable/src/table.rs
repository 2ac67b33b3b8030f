//! The table aggregate: configuration, columns and rows rendered to markup.
//!
//! # Example
//!
//! ```
//! use bstable::{Row, SortOrder, Table};
//!
//! let mut table = Table::new("id,name", vec![Row::new().cell("id", 1).cell("name", "Ann")])
//!     .with_id("users");
//! table
//!     .enable_search()
//!     .enable_pagination(None)
//!     .sort("name", SortOrder::Desc);
//!
//! let html = table.render();
//! assert!(html.contains(r#"<table id="users" data-toggle="table" data-search="true""#));
//! assert!(html.contains(r#"<th data-field="name">Name</th>"#));
//! assert!(html.contains("<td>Ann</td>"));
//! ```

use crate::attribute::{Attribute, AttributeSet};
use crate::column::Column;
use crate::error::{Result, TableError};
use crate::row::{rows_from_json, rows_from_records, Row};
use crate::util::{escape_js_single_quoted, EscapePolicy, NEWLINE};
use crate::value::Value;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Recognized table options and their defaults, in render order.
static TABLE_SCHEMA: Lazy<AttributeSet> = Lazy::new(|| {
    AttributeSet::from_attributes(vec![
        Attribute::new("search", false),
        Attribute::new("pagination", false),
        Attribute::new("pageSize", 10),
        Attribute::new("pageNumber", 1),
        Attribute::new("pageList", vec![10, 25, 50, 100]),
        Attribute::new("showExport", false),
        // basic, all, selected
        Attribute::new("exportDataType", "basic"),
        Attribute::new(
            "exportTypes",
            vec!["json", "xml", "csv", "txt", "sql", "excel"],
        ),
        Attribute::new("showPrint", false),
        Attribute::new("showFooter", false),
        Attribute::new("height", false),
        Attribute::new("url", false),
        Attribute::new("checkbox-header", true),
        Attribute::new("sortName", false),
        Attribute::new("sortOrder", false),
    ])
});

/// Sort direction for [`Table::sort`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of column names.
///
/// Strings are split on `,`; lists are taken as given.
///
/// ```
/// use bstable::ColumnNames;
///
/// let names = ColumnNames::from("id,name,email");
/// assert_eq!(names.as_slice(), ["id", "name", "email"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColumnNamesRaw")]
pub struct ColumnNames(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnNamesRaw {
    Joined(String),
    List(Vec<String>),
}

impl From<ColumnNamesRaw> for ColumnNames {
    fn from(raw: ColumnNamesRaw) -> Self {
        match raw {
            ColumnNamesRaw::Joined(s) => ColumnNames::from(s.as_str()),
            ColumnNamesRaw::List(v) => ColumnNames(v),
        }
    }
}

impl ColumnNames {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ColumnNames {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return ColumnNames::default();
        }
        ColumnNames(s.split(',').map(str::to_string).collect())
    }
}

impl From<String> for ColumnNames {
    fn from(s: String) -> Self {
        ColumnNames::from(s.as_str())
    }
}

impl From<Vec<String>> for ColumnNames {
    fn from(v: Vec<String>) -> Self {
        ColumnNames(v)
    }
}

impl From<Vec<&str>> for ColumnNames {
    fn from(v: Vec<&str>) -> Self {
        ColumnNames(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ColumnNames {
    fn from(v: &[&str]) -> Self {
        ColumnNames(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnNames {
    fn from(v: [&str; N]) -> Self {
        ColumnNames(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Table markup configured for the client-side table widget.
#[derive(Clone, Debug)]
pub struct Table {
    id: String,
    attributes: AttributeSet,
    columns: Vec<Column>,
    rows: Vec<Row>,
    groups: BTreeMap<String, Vec<String>>,
    action: Option<String>,
    selectable: bool,
    escape: EscapePolicy,
}

impl Default for Table {
    fn default() -> Self {
        Table::new(ColumnNames::default(), Vec::new())
    }
}

impl Table {
    /// Create a table with one column per name and the given rows.
    pub fn new(columns: impl Into<ColumnNames>, rows: Vec<Row>) -> Self {
        let mut table = Table {
            id: format!("bt{}", Uuid::new_v4().simple()),
            attributes: (*TABLE_SCHEMA).clone(),
            columns: Vec::new(),
            rows,
            groups: BTreeMap::new(),
            action: None,
            selectable: false,
            escape: EscapePolicy::default(),
        };
        table.set_columns(columns);
        table
    }

    /// Replace the generated id (builder style).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = id.into();
        self
    }

    /// The id of the rendered `<table>` element, stable for this instance.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace all rows.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> &mut Self {
        log::debug!("table {}: {} rows", self.id, rows.len());
        self.rows = rows;
        self
    }

    /// Replace all rows from loosely typed JSON; anything but a list of
    /// objects contributes no rows.
    pub fn set_rows_json(&mut self, json: serde_json::Value) -> &mut Self {
        self.set_rows(rows_from_json(json))
    }

    /// Replace all rows from serializable records.
    pub fn set_records<T: Serialize>(&mut self, records: &[T]) -> Result<&mut Self> {
        let rows = rows_from_records(records)?;
        Ok(self.set_rows(rows))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replace all columns. Repeated names keep their first position.
    pub fn set_columns(&mut self, columns: impl Into<ColumnNames>) -> &mut Self {
        let names = columns.into().into_vec();
        self.columns.clear();
        for name in names {
            if self.columns.iter().all(|c| c.field() != name) {
                self.columns.push(Column::new(name));
            }
        }
        log::debug!("table {}: {} columns", self.id, self.columns.len());
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::field)
    }

    /// Look up a column by field name.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`] if the table has no such column.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.field() == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Mutable variant of [`Table::column`].
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.field() == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Set a table option. Keys outside the schema are registered with a
    /// `false` default.
    pub fn set_attribute(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        match self.attributes.get_mut(key) {
            Some(attr) => {
                attr.set_value(value);
            }
            None => {
                log::debug!("table {}: registering custom attribute '{}'", self.id, key);
                self.attributes
                    .insert(Attribute::with_value(key, false, value));
            }
        }
        self
    }

    /// Current value of a table option.
    pub fn attribute(&self, key: &str) -> Result<&Value> {
        self.attributes
            .get(key)
            .map(Attribute::value)
            .ok_or_else(|| TableError::UnknownAttribute(key.to_string()))
    }

    /// Default value of a table option.
    pub fn attribute_default(&self, key: &str) -> Result<&Value> {
        self.attributes
            .get(key)
            .map(Attribute::default_value)
            .ok_or_else(|| TableError::UnknownAttribute(key.to_string()))
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Set an option on one column.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`] if the table has no such column; the
    /// column is not created.
    pub fn set_column_attribute(
        &mut self,
        column: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.column_mut(column)?.set_attribute(key, value);
        Ok(self)
    }

    /// Turn on row selection with a leading checkbox column.
    pub fn enable_selectable(&mut self) -> &mut Self {
        self.set_attribute("checkbox-header", false);
        self.set_attribute("click-to-select", true);
        self.selectable = true;
        self
    }

    pub fn disable_selectable(&mut self) -> &mut Self {
        self.set_attribute("click-to-select", false);
        self.set_attribute("checkbox-header", false);
        self.selectable = false;
        self
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn enable_search(&mut self) -> &mut Self {
        self.set_attribute("search", true)
    }

    pub fn disable_search(&mut self) -> &mut Self {
        self.set_attribute("search", false)
    }

    /// Turn on pagination, optionally starting on `page`. Page 0 is
    /// treated as no page.
    pub fn enable_pagination(&mut self, page: Option<u64>) -> &mut Self {
        self.set_attribute("pagination", true);
        if let Some(page) = page.filter(|&p| p != 0) {
            self.set_attribute("pageNumber", page);
        }
        self
    }

    pub fn disable_pagination(&mut self) -> &mut Self {
        self.set_attribute("pagination", false)
    }

    /// Set the initial sort column and direction.
    pub fn sort(&mut self, column: &str, order: SortOrder) -> &mut Self {
        self.set_attribute("sortName", column);
        self.set_attribute("sortOrder", order.as_str())
    }

    /// Add an action column whose cells are filled client-side by
    /// `<action>Formatter`, with events bound from `<action>Events`.
    /// An empty name removes the action column.
    pub fn set_action(&mut self, action: impl Into<String>) -> &mut Self {
        self.action = Some(action.into()).filter(|a| !a.is_empty());
        self
    }

    pub fn clear_action(&mut self) -> &mut Self {
        self.action = None;
        self
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Record a named group of columns.
    ///
    /// Groups are kept for callers to inspect; header grouping markup is
    /// not rendered.
    pub fn group_columns(&mut self, columns: impl Into<ColumnNames>, group: &str) -> &mut Self {
        self.groups
            .insert(group.to_string(), columns.into().into_vec());
        self
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<String>> {
        &self.groups
    }

    pub fn set_escape_policy(&mut self, policy: EscapePolicy) -> &mut Self {
        self.escape = policy;
        self
    }

    pub fn escape_policy(&self) -> EscapePolicy {
        self.escape
    }

    /// Render the full `<table>` markup.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(NEWLINE);
        out.push_str(&format!(
            "<table id=\"{}\" data-toggle=\"table\"{}>",
            self.id,
            self.attributes.render()
        ));
        out.push_str(NEWLINE);

        out.push_str("<thead class=\"thead-dark\">");
        out.push_str(NEWLINE);
        out.push_str("<tr>");
        out.push_str(NEWLINE);
        if self.selectable {
            out.push_str("<th data-field=\"state\" data-checkbox=\"true\"></th>");
            out.push_str(NEWLINE);
        }
        for column in &self.columns {
            out.push_str(&column.render());
            out.push_str(NEWLINE);
        }
        if let Some(action) = &self.action {
            out.push_str(&format!(
                "<th data-field=\"tableActions\" data-print-ignore=\"true\" \
                 data-formatter=\"{action}Formatter\" data-events=\"{action}Events\">&nbsp;</th>"
            ));
            out.push_str(NEWLINE);
        }
        out.push_str("</tr>");
        out.push_str(NEWLINE);
        out.push_str("</thead>");
        out.push_str(NEWLINE);

        out.push_str("<tbody>");
        out.push_str(NEWLINE);
        for (index, row) in self.rows.iter().enumerate() {
            out.push_str("<tr>");
            out.push_str(NEWLINE);
            for column in &self.columns {
                let text = match row.get(column.field()) {
                    Some(value) => self.escape.apply(&value.to_cell_text()),
                    None => {
                        log::warn!(
                            "table {}: row {} has no value for column '{}'",
                            self.id,
                            index,
                            column.field()
                        );
                        String::new()
                    }
                };
                out.push_str(&format!("<td>{text}</td>"));
                out.push_str(NEWLINE);
            }
            if self.action.is_some() {
                out.push_str("<td></td>");
                out.push_str(NEWLINE);
            }
            out.push_str("</tr>");
            out.push_str(NEWLINE);
        }
        out.push_str("</tbody>");
        out.push_str(NEWLINE);
        out.push_str("</table>");
        out.push_str(NEWLINE);
        out
    }

    /// Render the markup as a JavaScript expression: single-quoted string
    /// literals joined with `+`, one per line of [`Table::render`].
    pub fn render_as_javascript(&self) -> String {
        let mut out = String::from("''");
        for line in self.render().split(NEWLINE) {
            out.push_str(&format!("+'{}' ", escape_js_single_quoted(line)));
            out.push_str(NEWLINE);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> Vec<&str> {
        s.split(NEWLINE).collect()
    }

    #[test]
    fn new_table_has_defaults() {
        let table = Table::new("id,name,email", Vec::new());
        assert_eq!(table.attributes().len(), 15);
        assert_eq!(table.columns().count(), 3);
        assert!(!table.is_selectable());
        assert_eq!(table.action(), None);
        assert_eq!(table.attribute_default("pageList").unwrap(), &Value::from(vec![10, 25, 50, 100]));
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let a = Table::default();
        let b = Table::default();
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("bt"));
        let first = a.render();
        assert_eq!(first, a.render());
    }

    #[test]
    fn columns_from_string_and_list() {
        let t = Table::new("id,name", Vec::new());
        assert_eq!(t.column_names().collect::<Vec<_>>(), ["id", "name"]);

        let t = Table::new(vec!["a", "b", "a"], Vec::new());
        assert_eq!(t.column_names().collect::<Vec<_>>(), ["a", "b"]);

        let t = Table::new("", Vec::new());
        assert_eq!(t.columns().count(), 0);
    }

    #[test]
    fn set_columns_replaces() {
        let mut t = Table::new("id,name", Vec::new());
        t.set_columns(["email"]);
        assert_eq!(t.column_names().collect::<Vec<_>>(), ["email"]);
        assert!(t.column("id").is_err());
    }

    #[test]
    fn minimal_render_layout() {
        let table = Table::new("id", vec![Row::new().cell("id", 5)]).with_id("t1");
        assert_eq!(
            lines(&table.render()),
            [
                "",
                r#"<table id="t1" data-toggle="table">"#,
                r#"<thead class="thead-dark">"#,
                "<tr>",
                r#"<th data-field="id">Id</th>"#,
                "</tr>",
                "</thead>",
                "<tbody>",
                "<tr>",
                "<td>5</td>",
                "</tr>",
                "</tbody>",
                "</table>",
                "",
            ]
        );
    }

    #[test]
    fn unknown_table_attribute_defaults_to_false() {
        let mut t = Table::default();
        t.set_attribute("showRefresh", true);
        assert_eq!(t.attribute_default("showRefresh").unwrap(), &Value::Bool(false));
        assert!(t.render().contains(r#" data-show-refresh="true""#));

        t.set_attribute("showRefresh", false);
        assert!(!t.render().contains("data-show-refresh"));
    }

    #[test]
    fn unknown_table_attribute_lookup_fails() {
        let t = Table::default();
        assert!(matches!(
            t.attribute("nope"),
            Err(TableError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn selectable_toggles() {
        let mut t = Table::new("id", Vec::new()).with_id("t");
        t.enable_selectable();
        assert!(t.is_selectable());
        assert_eq!(t.attribute("checkbox-header").unwrap(), &Value::Bool(false));
        assert_eq!(t.attribute("click-to-select").unwrap(), &Value::Bool(true));
        let html = t.render();
        assert!(html.contains(r#"data-checkbox-header="false" data-click-to-select="true""#));
        assert!(html.contains(r#"<th data-field="state" data-checkbox="true"></th>"#));

        t.disable_selectable();
        assert!(!t.is_selectable());
        assert_eq!(t.attribute("click-to-select").unwrap(), &Value::Bool(false));
        let html = t.render();
        assert!(!html.contains("data-click-to-select"));
        assert!(!html.contains(r#"data-field="state""#));
    }

    #[test]
    fn pagination_page_number() {
        let mut t = Table::default();
        t.enable_pagination(Some(3));
        assert_eq!(t.attribute("pageNumber").unwrap(), &Value::from(3));

        let mut t = Table::default();
        t.enable_pagination(Some(0));
        assert_eq!(t.attribute("pagination").unwrap(), &Value::Bool(true));
        assert_eq!(t.attribute("pageNumber").unwrap(), &Value::from(1));

        t.disable_pagination();
        assert_eq!(t.attribute("pagination").unwrap(), &Value::Bool(false));
    }

    #[test]
    fn sort_sets_name_and_order() {
        let mut t = Table::default();
        t.sort("name", SortOrder::default());
        assert_eq!(t.attribute("sortName").unwrap(), &Value::from("name"));
        assert_eq!(t.attribute("sortOrder").unwrap(), &Value::from("asc"));
        assert!(t.render().contains(r#" data-sort-name="name" data-sort-order="asc""#));
    }

    #[test]
    fn action_adds_header_and_cells() {
        let mut t = Table::new("id", vec![Row::new().cell("id", 1)]);
        t.set_action("user");
        let html = t.render();
        assert!(html.contains(
            r#"<th data-field="tableActions" data-print-ignore="true" data-formatter="userFormatter" data-events="userEvents">&nbsp;</th>"#
        ));
        assert!(html.contains(&format!("<td>1</td>{NEWLINE}<td></td>{NEWLINE}</tr>")));

        t.clear_action();
        assert!(!t.render().contains("tableActions"));
    }

    #[test]
    fn empty_action_name_adds_no_action_column() {
        let mut t = Table::new("id", vec![Row::new().cell("id", 1)]).with_id("t");
        let plain = t.render();
        t.set_action("user").set_action("");
        assert_eq!(t.action(), None);
        assert!(!t.render().contains("tableActions"));
        assert_eq!(t.render(), plain);
    }

    #[test]
    fn groups_are_recorded_not_rendered() {
        let mut t = Table::new("id,name,email", Vec::new());
        let before = t.clone().with_id("x").render();
        t.group_columns("name,email", "contact");
        assert_eq!(t.groups()["contact"], ["name", "email"]);
        assert_eq!(t.with_id("x").render(), before);
    }

    #[test]
    fn missing_cell_renders_empty() {
        let t = Table::new("id,name", vec![Row::new().cell("id", 1)]);
        assert!(t.render().contains(&format!("<td>1</td>{NEWLINE}<td></td>")));
    }

    #[test]
    fn cells_are_verbatim_by_default() {
        let mut t = Table::new("name", vec![Row::new().cell("name", "<b>x</b>")]);
        assert!(t.render().contains("<td><b>x</b></td>"));
        t.set_escape_policy(EscapePolicy::Html);
        assert!(t.render().contains("<td>&lt;b&gt;x&lt;/b&gt;</td>"));
    }

    #[test]
    fn javascript_variant() {
        let t = Table::new("id", Vec::new()).with_id("t");
        let js = t.render_as_javascript();
        assert!(js.starts_with(&format!("''+'' {NEWLINE}+'<table id=\"t\"")));
        assert!(js.ends_with(&format!("+'</table>' {NEWLINE}+'' {NEWLINE}")));
    }

    #[test]
    fn javascript_escapes_quotes() {
        let t = Table::new("name", vec![Row::new().cell("name", "O'Brien")]);
        assert!(t.render_as_javascript().contains(r"+'<td>O\'Brien</td>' "));
    }

    #[test]
    fn javascript_escapes_line_terminators() {
        let t = Table::new("note", vec![Row::new().cell("note", "a\rb")]);
        let js = t.render_as_javascript();
        assert!(js.split(NEWLINE).all(|line| !line.contains('\r')));
        assert!(js.contains(r"+'<td>a\rb</td>' "));

        let t = Table::new("note", vec![Row::new().cell("note", "x\u{2028}y")]);
        assert!(t.render_as_javascript().contains(r"+'<td>x\u2028y</td>' "));
    }

    #[test]
    fn set_column_attribute_unknown_column() {
        let mut t = Table::new("id", Vec::new());
        let err = t.set_column_attribute("email", "sortable", true).unwrap_err();
        assert!(matches!(err, TableError::UnknownColumn(c) if c == "email"));
        assert_eq!(t.columns().count(), 1);
    }

    #[test]
    fn column_names_deserialize_from_string_or_list() {
        let a: ColumnNames = serde_yaml::from_str("id,name").unwrap();
        let b: ColumnNames = serde_yaml::from_str("[id, name]").unwrap();
        assert_eq!(a, b);
    }
}
