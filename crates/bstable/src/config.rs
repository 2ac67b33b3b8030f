//! Declarative table configuration loaded from YAML or JSON.
//!
//! ```yaml
//! id: users
//! columns: id,name,email
//! search: true
//! pagination: true
//! page: 2
//! sort: { column: name, order: desc }
//! selectable: true
//! action: user
//! escape: html
//! attributes:
//!   pageSize: 25
//!   exportTypes: [json, csv]
//! column_attributes:
//!   name: { sortable: true }
//! labels:
//!   email: E-mail
//! groups:
//!   contact: [name, email]
//! ```
//!
//! Every field is optional. Keys in `attributes` and `column_attributes` are
//! applied in key order after the flags, so an explicit `search` key there
//! wins over the `search` flag.

use crate::error::{Result, TableError};
use crate::row::Row;
use crate::table::{ColumnNames, SortOrder, Table};
use crate::util::EscapePolicy;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Initial sort settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub column: String,
    #[serde(default)]
    pub order: SortOrder,
}

/// Serializable description of a [`Table`] without its rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub id: Option<String>,
    pub columns: ColumnNames,
    pub attributes: BTreeMap<String, Value>,
    pub column_attributes: BTreeMap<String, BTreeMap<String, Value>>,
    pub labels: BTreeMap<String, String>,
    pub selectable: bool,
    pub search: bool,
    pub pagination: bool,
    pub page: Option<u64>,
    pub sort: Option<SortConfig>,
    pub action: Option<String>,
    pub groups: BTreeMap<String, ColumnNames>,
    pub escape: EscapePolicy,
}

impl TableConfig {
    /// Parse a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file, choosing the format by extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading table config from {}", path.display());
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(TableError::Config(format!(
                "unsupported config file extension: {}",
                path.display()
            ))),
        }
    }

    /// Build a table with the given rows.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`] when `column_attributes` or `labels`
    /// name a column that is not in `columns`.
    pub fn build(&self, rows: Vec<Row>) -> Result<Table> {
        let mut table = Table::new(self.columns.clone(), rows);
        if let Some(id) = &self.id {
            table.set_id(id.clone());
        }
        if self.selectable {
            table.enable_selectable();
        }
        if self.search {
            table.enable_search();
        }
        if self.pagination {
            table.enable_pagination(self.page);
        }
        if let Some(sort) = &self.sort {
            table.sort(&sort.column, sort.order);
        }
        if let Some(action) = &self.action {
            table.set_action(action.clone());
        }
        for (group, columns) in &self.groups {
            table.group_columns(columns.clone(), group);
        }
        table.set_escape_policy(self.escape);

        for (key, value) in &self.attributes {
            table.set_attribute(key, value.clone());
        }
        for (column, attributes) in &self.column_attributes {
            let column = table.column_mut(column)?;
            for (key, value) in attributes {
                column.set_attribute(key, value.clone());
            }
        }
        for (column, label) in &self.labels {
            table.column_mut(column)?.set_label(label.clone());
        }
        Ok(table)
    }
}

impl Table {
    /// Build a table from a YAML configuration and rows.
    pub fn from_yaml(yaml: &str, rows: Vec<Row>) -> Result<Table> {
        TableConfig::from_yaml(yaml)?.build(rows)
    }
}
