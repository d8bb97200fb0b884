//! Table assembly: header construction, body back-fill, sort links.
//!
//! A [`TableBuilder`] is used for exactly one render of one table. Body
//! rows are pre-allocated at construction, one per record; columns stream
//! in afterwards, and each addition appends one header cell and back-fills
//! one body cell into every existing row. The builder is not shared
//! between threads and provides no internal synchronization.

use log::debug;
use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde_json::Value;

use crate::column::{Column, ColumnSpec};
use crate::context::TableOptions;
use crate::error::TableError;
use crate::format::{display_value, format_currency, pretty_format};
use crate::markup::Element;
use crate::params::{QueryParams, ORDER_PARAM, PAGE_PARAM};
use crate::sort::SortState;
use crate::util::css_token;

/// Builds one sortable table over an in-memory record collection.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tabulon::{ColumnSpec, QueryParams, TableBuilder, TableOptions};
///
/// let records = vec![
///     json!({ "id": 1, "name": "Alice", "age": 30 }),
///     json!({ "id": 2, "name": "Bob", "age": 25 }),
/// ];
///
/// let mut table = TableBuilder::new(records, TableOptions::new().sortable(true))
///     .with_params(QueryParams::from_pairs([("order", "age_desc")]));
///
/// table.column(ColumnSpec::attr("name"));
/// table.column(ColumnSpec::attr("age"));
///
/// let element = table.finish();
/// assert_eq!(element.tag, "table");
/// ```
pub struct TableBuilder {
    records: Vec<Value>,
    options: TableOptions,
    params: QueryParams,
    sort: OnceCell<SortState>,
    columns: Vec<Column>,
    header_row: Element,
    body_rows: Vec<Element>,
    visible: OnceCell<Vec<usize>>,
}

impl TableBuilder {
    /// Create a builder over a record collection.
    ///
    /// One empty body row is pre-built per record, in collection order,
    /// with alternating `odd`/`even` classes and a stable row identifier
    /// when one can be derived.
    pub fn new(records: Vec<Value>, options: TableOptions) -> Self {
        let body_rows = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let mut row = Element::new("tr");
                row.classes.add(if i % 2 == 0 { "odd" } else { "even" });
                if let Some(id) = options.row_id_for(record) {
                    row.set_attr("id", id);
                }
                row
            })
            .collect();

        TableBuilder {
            records,
            options,
            params: QueryParams::new(),
            sort: OnceCell::new(),
            columns: Vec::new(),
            header_row: Element::new("tr"),
            body_rows,
            visible: OnceCell::new(),
        }
    }

    /// Create a builder by serializing typed records.
    pub fn from_records<T: Serialize>(
        records: &[T],
        options: TableOptions,
    ) -> Result<Self, TableError> {
        let records = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TableBuilder::new(records, options))
    }

    /// Attach the request query parameters. Call before adding columns.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self.sort = OnceCell::new();
        self
    }

    /// Whether any column of this table may show sort controls.
    pub fn is_sortable(&self) -> bool {
        self.options.is_sortable()
    }

    /// The sort state parsed from the request parameters, computed once.
    pub fn sort_state(&self) -> &SortState {
        self.sort.get_or_init(|| SortState::parse(&self.params))
    }

    /// Add one column: appends a header cell and back-fills one body cell
    /// into every existing row.
    pub fn column(&mut self, spec: ColumnSpec) -> &mut Self {
        let column = Column::resolve(spec, &self.options);
        debug!(
            "adding column {:?} (sortable: {}, key: {:?})",
            column.label(),
            column.is_sortable(),
            column.sort_key()
        );

        let header_cell = self.build_header_cell(&column);
        self.header_row.push_element(header_cell);

        for (row, record) in self.body_rows.iter_mut().zip(self.records.iter()) {
            row.push_element(build_body_cell(&column, record));
        }

        self.columns.push(column);
        self
    }

    /// All columns added so far, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The columns whose visibility predicate holds for the current
    /// request parameters. Computed once and cached for the lifetime of
    /// the build.
    pub fn visible_columns(&self) -> Vec<&Column> {
        let indexes = self.visible.get_or_init(|| {
            self.columns
                .iter()
                .enumerate()
                .filter(|(_, column)| column.is_visible(&self.params))
                .map(|(i, _)| i)
                .collect()
        });
        indexes.iter().map(|&i| &self.columns[i]).collect()
    }

    /// The header row built so far.
    pub fn header_row(&self) -> &Element {
        &self.header_row
    }

    /// The body rows built so far, in collection order.
    pub fn body_rows(&self) -> &[Element] {
        &self.body_rows
    }

    /// Assemble the final table element.
    pub fn finish(self) -> Element {
        let mut thead = Element::new("thead");
        thead.push_element(self.header_row);

        let mut tbody = Element::new("tbody");
        for row in self.body_rows {
            tbody.push_element(row);
        }

        let mut table = Element::new("table");
        table.push_element(thead);
        table.push_element(tbody);
        table
    }

    fn build_header_cell(&self, column: &Column) -> Element {
        let mut th = Element::new("th");

        let sort_key = if self.is_sortable() && column.is_sortable() {
            column.sort_key()
        } else {
            None
        };

        if let Some(key) = sort_key {
            th.classes.add("sortable");
            if self.sort_state().is_current(key) {
                if let Some(direction) = self.sort_state().current_direction() {
                    th.classes.add(format!("sorted-{}", direction));
                }
            }
        }
        if let Some(name) = column.accessor().attribute_name() {
            th.classes.add(css_token(name));
        }
        if let Some(text) = column.label().text() {
            th.classes.add(css_token(text));
        }
        if let Some(extra) = column.extra_classes() {
            th.classes.add(extra);
        }

        match sort_key {
            Some(key) => {
                let next = self.sort_state().next_direction_for(key);
                let target = self
                    .params
                    .with(ORDER_PARAM, format!("{}_{}", key, next))
                    .without(PAGE_PARAM);
                let mut link =
                    Element::new("a").attr("href", format!("?{}", target.to_query_string()));
                link.push(column.label().to_node());
                th.push_element(link);
            }
            None => th.push(column.label().to_node()),
        }

        th
    }
}

/// Build one body cell for a column and record.
///
/// Content resolution: the custom render function wins outright; otherwise
/// the accessor value is formatted. Attribute-backed values pass through
/// pretty formatting first, with currency layered on the already-pretty
/// value when both apply. Computed values only receive currency formatting.
fn build_body_cell(column: &Column, record: &Value) -> Element {
    let mut td = Element::new("td");

    match column.extra_classes() {
        Some(class) => td.classes.add(class),
        None => {
            if let Some(name) = column.accessor().attribute_name() {
                td.classes.add(name.to_lowercase());
            }
        }
    }

    match column.render_fn() {
        Some(render) => td.push(render(record)),
        None => {
            let value = column.accessor().resolve(record);
            let text = if column.accessor().is_attribute() {
                let pretty = pretty_format(&value);
                match column.currency() {
                    Some(options) => format_currency(&Value::String(pretty), options),
                    None => pretty,
                }
            } else {
                match column.currency() {
                    Some(options) => format_currency(&value, options),
                    None => display_value(&value),
                }
            };
            td.push_text(text);
        }
    }

    td
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Node;
    use serde_json::json;

    fn people() -> Vec<Value> {
        vec![
            json!({ "id": 1, "name": "Alice", "age": 30 }),
            json!({ "id": 2, "name": "Bob", "age": 25 }),
        ]
    }

    fn header_cells(table: &TableBuilder) -> Vec<&Element> {
        table.header_row().child_elements().collect()
    }

    fn cell_texts(row: &Element) -> Vec<String> {
        row.child_elements().map(Element::text_content).collect()
    }

    // --- basic assembly ---

    #[test]
    fn builds_header_and_body() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("name"));
        table.column(ColumnSpec::attr("age"));

        let headers: Vec<String> = header_cells(&table)
            .iter()
            .map(|th| th.text_content())
            .collect();
        assert_eq!(headers, vec!["Name", "Age"]);

        let rows = table.body_rows();
        assert_eq!(cell_texts(&rows[0]), vec!["Alice", "30"]);
        assert_eq!(cell_texts(&rows[1]), vec!["Bob", "25"]);
    }

    #[test]
    fn finish_wraps_in_table_element() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("name"));
        let element = table.finish();

        assert_eq!(element.tag, "table");
        let sections: Vec<&str> = element.child_elements().map(|el| el.tag.as_str()).collect();
        assert_eq!(sections, vec!["thead", "tbody"]);

        let tbody = element.child_elements().nth(1).unwrap();
        assert_eq!(tbody.child_elements().count(), 2);
    }

    #[test]
    fn rows_preserve_collection_order() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("name"));
        table.column(ColumnSpec::attr("age"));

        let names: Vec<String> = table
            .body_rows()
            .iter()
            .map(|row| cell_texts(row)[0].clone())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn rows_alternate_odd_even() {
        let table = TableBuilder::new(people(), TableOptions::new());
        let rows = table.body_rows();
        assert!(rows[0].classes.contains("odd"));
        assert!(rows[1].classes.contains("even"));
    }

    #[test]
    fn rows_carry_record_ids() {
        let table = TableBuilder::new(people(), TableOptions::new());
        let rows = table.body_rows();
        assert_eq!(rows[0].attributes.get("id").map(String::as_str), Some("record_1"));
        assert_eq!(rows[1].attributes.get("id").map(String::as_str), Some("record_2"));
    }

    #[test]
    fn back_fill_adds_exactly_one_cell_per_row() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("name"));
        for row in table.body_rows() {
            assert_eq!(row.child_elements().count(), 1);
        }
        table.column(ColumnSpec::attr("age"));
        for row in table.body_rows() {
            assert_eq!(row.child_elements().count(), 2);
        }
    }

    #[test]
    fn empty_collection_builds_empty_body() {
        let mut table = TableBuilder::new(vec![], TableOptions::new());
        table.column(ColumnSpec::attr("name"));
        assert!(table.body_rows().is_empty());
        assert_eq!(header_cells(&table).len(), 1);
    }

    #[test]
    fn from_records_serializes() {
        #[derive(Serialize)]
        struct Person {
            id: u32,
            name: String,
        }

        let records = vec![Person {
            id: 1,
            name: "Alice".to_string(),
        }];
        let mut table = TableBuilder::from_records(&records, TableOptions::new()).unwrap();
        table.column(ColumnSpec::attr("name"));
        assert_eq!(cell_texts(&table.body_rows()[0]), vec!["Alice"]);
    }

    // --- header classing and sort links ---

    #[test]
    fn unsortable_table_has_no_sort_controls() {
        let mut table = TableBuilder::new(people(), TableOptions::new())
            .with_params(QueryParams::from_pairs([("order", "age_desc")]));
        table.column(ColumnSpec::attr("age"));

        let th = header_cells(&table)[0];
        assert!(!th.classes.contains("sortable"));
        assert!(!th.classes.contains("sorted-desc"));
        assert_eq!(th.child_elements().count(), 0);
        assert_eq!(th.text_content(), "Age");
    }

    #[test]
    fn sortable_header_renders_toggle_link() {
        let mut table = TableBuilder::new(people(), TableOptions::new().sortable(true))
            .with_params(QueryParams::from_pairs([("order", "age_desc"), ("page", "3")]));
        table.column(ColumnSpec::attr("age"));

        let th = header_cells(&table)[0];
        assert!(th.classes.contains("sortable"));
        assert!(th.classes.contains("sorted-desc"));
        assert!(th.classes.contains("age"));

        let link = th.child_elements().next().expect("header link");
        assert_eq!(link.tag, "a");
        assert_eq!(link.text_content(), "Age");
        let href = link.attributes.get("href").unwrap();
        assert!(href.contains("order=age_asc"), "href was {}", href);
        assert!(!href.contains("page="), "pagination must be stripped: {}", href);
    }

    #[test]
    fn inactive_column_links_start_descending() {
        let mut table = TableBuilder::new(people(), TableOptions::new().sortable(true))
            .with_params(QueryParams::from_pairs([("order", "age_desc")]));
        table.column(ColumnSpec::attr("name"));

        let th = header_cells(&table)[0];
        assert!(!th.classes.contains("sorted-desc"));
        assert!(!th.classes.contains("sorted-asc"));
        let href = th.child_elements().next().unwrap().attributes.get("href").unwrap();
        assert!(href.contains("order=name_desc"));
    }

    #[test]
    fn explicitly_unsortable_column_never_links() {
        let mut table = TableBuilder::new(people(), TableOptions::new().sortable(true));
        table.column(ColumnSpec::attr("age").sortable(false));

        let th = header_cells(&table)[0];
        assert!(!th.classes.contains("sortable"));
        assert_eq!(th.child_elements().count(), 0);
    }

    #[test]
    fn computed_column_without_key_is_plain_text() {
        let mut table = TableBuilder::new(people(), TableOptions::new().sortable(true));
        table.column(ColumnSpec::computed("Info", |_| json!("x")));

        let th = header_cells(&table)[0];
        assert!(!th.classes.contains("sortable"));
        assert_eq!(th.text_content(), "Info");
    }

    #[test]
    fn computed_column_with_key_links_by_key() {
        let mut table = TableBuilder::new(people(), TableOptions::new().sortable(true));
        table.column(
            ColumnSpec::computed("Full Name", |r| {
                json!(format!("{} Smith", r["name"].as_str().unwrap_or("")))
            })
            .sort_by("last_name"),
        );

        let th = header_cells(&table)[0];
        assert!(th.classes.contains("sortable"));
        let href = th.child_elements().next().unwrap().attributes.get("href").unwrap();
        assert!(href.contains("order=last_name_desc"));

        assert_eq!(cell_texts(&table.body_rows()[0]), vec!["Alice Smith"]);
    }

    #[test]
    fn header_classes_include_accessor_title_and_extra_tokens() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::titled("Years Old", "age").class("numeric right"));

        let th = header_cells(&table)[0];
        assert!(th.classes.contains("age"));
        assert!(th.classes.contains("years_old"));
        assert!(th.classes.contains("numeric"));
        assert!(th.classes.contains("right"));
    }

    #[test]
    fn markup_title_contributes_no_class_token() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("age").markup_title(Node::text("Rich")));

        let th = header_cells(&table)[0];
        // Only the accessor token remains.
        assert_eq!(th.classes.to_attribute(), "age");
        assert_eq!(th.text_content(), "Rich");
    }

    // --- body cells ---

    #[test]
    fn body_cells_carry_accessor_class() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("age"));
        let cell = table.body_rows()[0].child_elements().next().unwrap();
        assert!(cell.classes.contains("age"));
    }

    #[test]
    fn explicit_class_replaces_accessor_class() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("age").class("numeric"));
        let cell = table.body_rows()[0].child_elements().next().unwrap();
        assert!(cell.classes.contains("numeric"));
        assert!(!cell.classes.contains("age"));
    }

    #[test]
    fn computed_cells_have_no_class() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::computed("Info", |_| json!("x")));
        let cell = table.body_rows()[0].child_elements().next().unwrap();
        assert!(cell.classes.is_empty());
    }

    #[test]
    fn attribute_values_are_pretty_formatted() {
        let records = vec![json!({ "active": true, "note": null })];
        let mut table = TableBuilder::new(records, TableOptions::new());
        table.column(ColumnSpec::attr("active"));
        table.column(ColumnSpec::attr("note"));
        assert_eq!(cell_texts(&table.body_rows()[0]), vec!["Yes", ""]);
    }

    #[test]
    fn currency_layers_on_pretty_formatted_attribute() {
        let records = vec![json!({ "price": 1234.5 })];
        let mut table = TableBuilder::new(records, TableOptions::new());
        table.column(ColumnSpec::attr("price").currency());
        assert_eq!(cell_texts(&table.body_rows()[0]), vec!["$1,234.50"]);
    }

    #[test]
    fn computed_values_skip_pretty_format() {
        let records = vec![json!({ "flag": true })];
        let mut table = TableBuilder::new(records, TableOptions::new());
        table.column(ColumnSpec::computed("Raw", |r| r["flag"].clone()));
        // No humanization for computed values.
        assert_eq!(cell_texts(&table.body_rows()[0]), vec!["true"]);
    }

    #[test]
    fn computed_values_accept_currency() {
        let records = vec![json!({ "cents": 250 })];
        let mut table = TableBuilder::new(records, TableOptions::new());
        table.column(
            ColumnSpec::computed("Total", |r| json!(r["cents"].as_f64().unwrap_or(0.0) / 100.0))
                .currency(),
        );
        assert_eq!(cell_texts(&table.body_rows()[0]), vec!["$2.50"]);
    }

    #[test]
    fn render_function_output_is_verbatim() {
        let mut table = TableBuilder::new(people(), TableOptions::new());
        table.column(ColumnSpec::attr("name").render(|record| {
            let mut strong = Element::new("strong");
            strong.push_text(record["name"].as_str().unwrap_or(""));
            strong.into()
        }));

        let cell = table.body_rows()[0].child_elements().next().unwrap();
        assert!(cell.classes.contains("name"));
        let strong = cell.child_elements().next().unwrap();
        assert_eq!(strong.tag, "strong");
        assert_eq!(strong.text_content(), "Alice");
    }

    // --- visibility ---

    #[test]
    fn visible_columns_filters_by_predicate() {
        let mut table = TableBuilder::new(people(), TableOptions::new())
            .with_params(QueryParams::from_pairs([("audit", "1")]));
        table.column(ColumnSpec::attr("name"));
        table.column(ColumnSpec::attr("age").visible_when(|p| p.get("missing").is_some()));
        table.column(ColumnSpec::attr("id").visible_when(|p| p.get("audit").is_some()));

        let visible = table.visible_columns();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].label().text(), Some("Name"));
        assert_eq!(visible[1].label().text(), Some("Id"));
    }
}
