//! # Tabulon - Declarative Sortable Table Views
//!
//! `tabulon` builds fully-specified table structures over an arbitrary
//! in-memory collection of records. Columns stream in one at a time; each
//! addition appends a header cell reflecting the current sort state and
//! back-fills one body cell into every existing row. The result is an
//! inert [`Element`] tree an outer pipeline serializes to markup.
//!
//! It is not a templating engine, a pagination engine, or a query builder:
//! the collection is already materialized by the caller, and the builder
//! never issues data-store queries.
//!
//! ## Core Concepts
//!
//! - [`TableBuilder`]: one instance assembles exactly one table
//! - [`ColumnSpec`] / [`Column`]: a declared column and its resolved form
//!   (title, accessor, sortability, sort key)
//! - [`SortState`]: current sort parsed from the `order` query parameter,
//!   plus the toggle direction for any key
//! - [`QueryParams`]: ordered request parameters, re-issued in sort links
//! - [`Element`] / [`Node`]: the markup tree the builder emits into
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tabulon::{ColumnSpec, QueryParams, TableBuilder, TableOptions};
//!
//! let records = vec![
//!     json!({ "id": 1, "name": "Alice", "age": 30 }),
//!     json!({ "id": 2, "name": "Bob", "age": 25 }),
//! ];
//!
//! let mut table = TableBuilder::new(records, TableOptions::new().sortable(true))
//!     .with_params(QueryParams::from_pairs([("order", "age_desc")]));
//!
//! table.column(ColumnSpec::attr("name"));
//! table.column(ColumnSpec::attr("age"));
//! table.column(
//!     ColumnSpec::computed("Age Next Year", |r| json!(r["age"].as_i64().unwrap_or(0) + 1))
//!         .sort_by("age"),
//! );
//!
//! let element = table.finish();
//! assert_eq!(element.tag, "table");
//! ```
//!
//! ## Sortability Rules
//!
//! Attribute columns sort by their attribute name unless told otherwise;
//! association-backed attributes stop sorting when an
//! [`AssociationReflector`] is attached. Computed columns are only
//! sortable through an explicit key:
//!
//! ```rust
//! use serde_json::json;
//! use tabulon::{ColumnSpec, TableBuilder, TableOptions};
//!
//! let mut table = TableBuilder::new(vec![], TableOptions::new().sortable(true));
//!
//! // Sortable, key "username".
//! table.column(ColumnSpec::attr("username"));
//! // Sortable, key "login".
//! table.column(ColumnSpec::attr("username").sort_by("login"));
//! // Never sortable, even though a key could be derived.
//! table.column(ColumnSpec::attr("username").sortable(false));
//! // Not sortable: computed with no explicit key.
//! table.column(ColumnSpec::computed("Pretty", |r| r["username"].clone()));
//!
//! let columns = table.columns();
//! assert!(columns[0].is_sortable());
//! assert_eq!(columns[1].sort_key(), Some("login"));
//! assert!(!columns[2].is_sortable());
//! assert!(!columns[3].is_sortable());
//! ```
//!
//! ## Formatting
//!
//! Attribute-backed cell values are humanized with [`pretty_format`]
//! (`null` to empty, booleans to Yes/No) before optional currency
//! formatting is layered on top. Computed values skip the pretty step.

pub mod column;
pub mod context;
mod error;
pub mod filters;
pub mod format;
pub mod markup;
pub mod params;
pub mod sort;
pub mod table;
mod util;

// Error type
pub use error::TableError;

// Column model exports
pub use column::{Accessor, Column, ColumnSpec, ComputedFn, Label, RenderFn, SortSpec, VisibleFn};

// Capability exports
pub use context::{AssociationReflector, LabelProvider, RowIdFn, TableOptions};

// Filter declaration exports
pub use filters::{Filter, FilterSet};

// Formatting exports
pub use format::{display_value, format_currency, pretty_format, CurrencyOptions};

// Markup tree exports
pub use markup::{ClassList, Element, Node};

// Query parameter exports
pub use params::{QueryParams, ORDER_PARAM, PAGE_PARAM};

// Sort state exports
pub use sort::{SortDirection, SortState};

// Table assembly exports
pub use table::TableBuilder;

// Utility exports
pub use util::{css_token, titleize};
