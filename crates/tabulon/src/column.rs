//! Column model: title derivation, sortability, and sort-key resolution.
//!
//! A column declaration ([`ColumnSpec`]) names what to display and how; the
//! resolved [`Column`] is immutable after construction and carries the
//! decisions the table assembly consumes. Resolution happens once, at the
//! moment the column is added to a table.
//!
//! Sortability follows a strict precedence:
//!
//! 1. Computed columns are sortable only when an explicit sort key string
//!    was supplied. A boolean `sortable` never makes a computed column
//!    sortable.
//! 2. An explicitly supplied boolean is used as given, including `false`.
//! 3. Attribute columns consult the association reflector when one is
//!    attached: associations are not sortable by default.
//! 4. Otherwise columns default to sortable.

use std::fmt;

use serde_json::Value;

use crate::context::TableOptions;
use crate::format::CurrencyOptions;
use crate::markup::Node;
use crate::params::QueryParams;
use crate::util::titleize;

/// Function producing a cell value from a record.
pub type ComputedFn = Box<dyn Fn(&Value) -> Value>;

/// Function producing custom cell markup from a record. Its output is used
/// verbatim, bypassing all formatting.
pub type RenderFn = Box<dyn Fn(&Value) -> Node>;

/// Per-column visibility predicate, evaluated against the request
/// parameters.
pub type VisibleFn = Box<dyn Fn(&QueryParams) -> bool>;

/// How a column obtains its value from a record.
pub enum Accessor {
    /// Read a named attribute off the record. Dot notation reaches into
    /// nested objects (`"author.name"`).
    Attribute(String),
    /// Compute the value with a function over the record.
    Computed(ComputedFn),
}

impl Accessor {
    /// Create an attribute accessor.
    pub fn attribute(name: impl Into<String>) -> Self {
        Accessor::Attribute(name.into())
    }

    /// Create a computed accessor.
    pub fn computed(f: impl Fn(&Value) -> Value + 'static) -> Self {
        Accessor::Computed(Box::new(f))
    }

    /// The attribute name, when this accessor is attribute-backed.
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            Accessor::Attribute(name) => Some(name),
            Accessor::Computed(_) => None,
        }
    }

    /// True for attribute-backed accessors.
    pub fn is_attribute(&self) -> bool {
        matches!(self, Accessor::Attribute(_))
    }

    /// Resolve the cell value for a record. A missing attribute yields
    /// `null`; it is not an error.
    pub fn resolve(&self, record: &Value) -> Value {
        match self {
            Accessor::Attribute(name) => extract_value(record, name),
            Accessor::Computed(f) => f(record),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Extract a value from a record using dot notation for nested fields.
fn extract_value(record: &Value, path: &str) -> Value {
    let mut current = record;
    for part in path.split('.') {
        match current {
            Value::Object(map) => match map.get(part) {
                Some(value) => current = value,
                None => return Value::Null,
            },
            _ => return Value::Null,
        }
    }
    current.clone()
}

/// The `sortable` option as supplied on a column declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SortSpec {
    /// No explicit option; sortability is inferred.
    #[default]
    Inherit,
    /// Explicit boolean, used as given.
    Enabled(bool),
    /// Explicit sort key; always wins as the key and makes the column
    /// sortable (including computed columns).
    Key(String),
}

/// How the column title was declared.
enum Title {
    /// A symbolic attribute name, resolved to a humanized label.
    Attribute(String),
    /// A plain string, used verbatim.
    Text(String),
    /// Caller-supplied markup, used verbatim and exempt from class
    /// derivation.
    Markup(Node),
}

/// The resolved header label of a column.
#[derive(Clone, Debug, PartialEq)]
pub enum Label {
    /// A plain text label.
    Text(String),
    /// A markup label.
    Markup(Node),
}

impl Label {
    /// The label text, when the label is plain text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Label::Text(text) => Some(text),
            Label::Markup(_) => None,
        }
    }

    pub(crate) fn to_node(&self) -> Node {
        match self {
            Label::Text(text) => Node::Text(text.clone()),
            Label::Markup(node) => node.clone(),
        }
    }
}

/// Declaration of one table column.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tabulon::ColumnSpec;
///
/// // Attribute column, titled from the attribute name.
/// let age = ColumnSpec::attr("age");
///
/// // Attribute column with an explicit title.
/// let login = ColumnSpec::titled("Login", "username");
///
/// // Computed column, sortable by an explicit key.
/// let full_name = ColumnSpec::computed("Full Name", |r| {
///     json!(format!(
///         "{} {}",
///         r["first"].as_str().unwrap_or(""),
///         r["last"].as_str().unwrap_or("")
///     ))
/// })
/// .sort_by("last_name");
/// ```
pub struct ColumnSpec {
    title: Title,
    accessor: Accessor,
    sort: SortSpec,
    class: Option<String>,
    currency: Option<CurrencyOptions>,
    render: Option<RenderFn>,
    visible: Option<VisibleFn>,
}

impl ColumnSpec {
    fn new(title: Title, accessor: Accessor) -> Self {
        ColumnSpec {
            title,
            accessor,
            sort: SortSpec::Inherit,
            class: None,
            currency: None,
            render: None,
            visible: None,
        }
    }

    /// Declare an attribute column titled from its attribute name.
    pub fn attr(name: impl Into<String>) -> Self {
        let name = name.into();
        ColumnSpec::new(Title::Attribute(name.clone()), Accessor::attribute(name))
    }

    /// Declare an attribute column titled from a different attribute name.
    ///
    /// The title resolves through the label provider exactly like
    /// [`attr`](Self::attr); values are read from `accessor` instead.
    pub fn attr_as(title: impl Into<String>, accessor: impl Into<String>) -> Self {
        ColumnSpec::new(
            Title::Attribute(title.into()),
            Accessor::attribute(accessor),
        )
    }

    /// Declare an attribute column with an explicit title.
    pub fn titled(title: impl Into<String>, name: impl Into<String>) -> Self {
        ColumnSpec::new(Title::Text(title.into()), Accessor::attribute(name))
    }

    /// Declare a computed column with an explicit title.
    pub fn computed(title: impl Into<String>, f: impl Fn(&Value) -> Value + 'static) -> Self {
        ColumnSpec::new(Title::Text(title.into()), Accessor::computed(f))
    }

    /// Replace the title with caller-supplied markup. Markup titles are
    /// used verbatim and contribute no class token.
    pub fn markup_title(mut self, title: Node) -> Self {
        self.title = Title::Markup(title);
        self
    }

    /// Set the sort behavior directly. [`sortable`](Self::sortable) and
    /// [`sort_by`](Self::sort_by) are conveniences over this.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Explicitly enable or disable sorting for this column.
    ///
    /// On a computed column a boolean has no effect; computed columns only
    /// become sortable through [`sort_by`](Self::sort_by).
    pub fn sortable(self, sortable: bool) -> Self {
        self.sort(SortSpec::Enabled(sortable))
    }

    /// Sort this column by an explicit key instead of its attribute name.
    pub fn sort_by(self, key: impl Into<String>) -> Self {
        self.sort(SortSpec::Key(key.into()))
    }

    /// Extra class tokens for the header and body cells of this column.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Format the cell value as currency with default options.
    pub fn currency(mut self) -> Self {
        self.currency = Some(CurrencyOptions::default());
        self
    }

    /// Format the cell value as currency with the given options.
    pub fn currency_with(mut self, options: CurrencyOptions) -> Self {
        self.currency = Some(options);
        self
    }

    /// Render cell content with a custom function. The output bypasses
    /// value formatting entirely.
    pub fn render(mut self, f: impl Fn(&Value) -> Node + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    /// Only include this column when the predicate holds for the current
    /// request parameters.
    pub fn visible_when(mut self, f: impl Fn(&QueryParams) -> bool + 'static) -> Self {
        self.visible = Some(Box::new(f));
        self
    }
}

/// A resolved table column, immutable after construction.
pub struct Column {
    label: Label,
    accessor: Accessor,
    sortable: bool,
    sort_key: Option<String>,
    extra_classes: Option<String>,
    currency: Option<CurrencyOptions>,
    render: Option<RenderFn>,
    visible: Option<VisibleFn>,
}

impl Column {
    /// Resolve a declaration against the table's capabilities.
    pub(crate) fn resolve(spec: ColumnSpec, options: &TableOptions) -> Self {
        let label = match spec.title {
            Title::Text(text) => Label::Text(text),
            Title::Markup(node) => Label::Markup(node),
            Title::Attribute(name) => {
                let fallback = titleize(&name);
                let text = match options.label_provider_ref() {
                    Some(provider) => provider.human_attribute_name(&name, &fallback),
                    None => fallback,
                };
                Label::Text(text)
            }
        };

        let sortable = match (&spec.accessor, &spec.sort) {
            (Accessor::Computed(_), SortSpec::Key(_)) => true,
            (Accessor::Computed(_), _) => false,
            (_, SortSpec::Enabled(enabled)) => *enabled,
            (_, SortSpec::Key(_)) => true,
            (Accessor::Attribute(name), SortSpec::Inherit) => match options.reflector_ref() {
                Some(reflector) => !reflector.is_association(name),
                None => true,
            },
        };

        let sort_key = match &spec.sort {
            SortSpec::Key(key) => Some(key.clone()),
            _ => spec.accessor.attribute_name().map(str::to_string),
        };

        Column {
            label,
            accessor: spec.accessor,
            sortable,
            sort_key,
            extra_classes: spec.class,
            currency: spec.currency,
            render: spec.render,
            visible: spec.visible,
        }
    }

    /// The resolved header label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The data accessor.
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// Whether this column participates in sorting.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The key used in the sort query parameter, when one is resolvable.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    /// Extra class tokens supplied on the declaration.
    pub fn extra_classes(&self) -> Option<&str> {
        self.extra_classes.as_deref()
    }

    /// Currency formatting options, when requested.
    pub fn currency(&self) -> Option<&CurrencyOptions> {
        self.currency.as_ref()
    }

    /// The custom render function, when supplied.
    pub fn render_fn(&self) -> Option<&RenderFn> {
        self.render.as_ref()
    }

    /// Evaluate the visibility predicate; columns without one are always
    /// visible.
    pub fn is_visible(&self, params: &QueryParams) -> bool {
        match &self.visible {
            Some(predicate) => predicate(params),
            None => true,
        }
    }
}
