//! # bstable - Markup for client-side enhanced HTML tables
//!
//! `bstable` builds `<table>` markup whose configuration is carried in
//! `data-*` attributes, ready for a browser-side table widget to pick up
//! (pagination, sorting, search, row selection, export).
//!
//! The crate only writes markup. It does not sort, filter or paginate data
//! itself, and it does not validate rows against columns.
//!
//! ## Core Concepts
//!
//! - [`Attribute`]: a named value with a default. It renders as
//!   `data-<kebab-name>="..."` only once the value differs from the default.
//! - [`Column`]: the options of one column plus its display label, rendered
//!   as a `<th>` cell.
//! - [`Table`]: table options, columns and [`Row`] records, rendered as the
//!   full table or as a JavaScript string expression.
//! - [`TableConfig`]: the same setup described in YAML or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use bstable::{Row, Table};
//!
//! let rows = vec![
//!     Row::new().cell("id", 1).cell("full_name", "Ann"),
//!     Row::new().cell("id", 2).cell("full_name", "Bob"),
//! ];
//!
//! let mut table = Table::new("id,full_name", rows).with_id("people");
//! table.enable_search().enable_pagination(Some(2));
//! table.set_column_attribute("full_name", "sortable", true).unwrap();
//!
//! let html = table.render();
//! assert!(html.contains(
//!     r#"<table id="people" data-toggle="table" data-search="true" data-pagination="true" data-page-number="2">"#
//! ));
//! assert!(html.contains(r#"<th data-field="full_name" data-sortable="true">Full Name</th>"#));
//! assert!(html.contains("<td>Bob</td>"));
//! ```
//!
//! ## Rendering as JavaScript
//!
//! [`Table::render_as_javascript`] wraps every line of the markup in a
//! single-quoted literal and joins them with `+`, for assigning the table to
//! a variable inside an inline script.
//!
//! ## Cell Escaping
//!
//! Cell values are written verbatim by default. Switch to
//! [`EscapePolicy::Html`] with [`Table::set_escape_policy`] when cells may
//! hold untrusted text.

mod attribute;
mod column;
mod config;
mod error;
mod row;
mod table;
mod util;
mod value;

pub use attribute::{kebab_case, Attribute, AttributeSet, Property};
pub use column::Column;
pub use config::{SortConfig, TableConfig};
pub use error::{Result, TableError};
pub use row::{rows_from_json, rows_from_records, Row};
pub use table::{ColumnNames, SortOrder, Table};
pub use util::{escape_html, EscapePolicy, NEWLINE};
pub use value::{Number, Value};
