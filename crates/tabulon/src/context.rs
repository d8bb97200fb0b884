//! Capability injection for table construction.
//!
//! Tables are built against collaborators the core does not own: a label
//! provider for humanizing attribute titles, an association reflector for
//! default sortability decisions, and a row identity function. All of them
//! are optional; each has a defined fallback when absent.

use serde_json::Value;

/// Provides human-readable labels for attribute names.
///
/// The fallback is the titleized attribute name; implementations may return
/// it unchanged when no better label is known.
pub trait LabelProvider {
    /// A display label for `attribute`, or `fallback` when none is defined.
    fn human_attribute_name(&self, attribute: &str, fallback: &str) -> String;
}

/// Answers whether an attribute refers to an associated record rather than
/// a plain value. Association-backed columns are not sortable by default.
pub trait AssociationReflector {
    /// True when `attribute` is an association reference.
    fn is_association(&self, attribute: &str) -> bool;
}

/// Function deriving a stable identifier for a body row from its record.
pub type RowIdFn = Box<dyn Fn(&Value) -> Option<String>>;

/// Table-level construction options.
pub struct TableOptions {
    sortable: bool,
    label_provider: Option<Box<dyn LabelProvider>>,
    reflector: Option<Box<dyn AssociationReflector>>,
    row_id: Option<RowIdFn>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            sortable: false,
            label_provider: None,
            reflector: None,
            row_id: None,
        }
    }
}

impl TableOptions {
    /// Create options with sorting disabled and no capabilities attached.
    pub fn new() -> Self {
        TableOptions::default()
    }

    /// Allow columns of this table to show sort controls.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Attach a label provider for attribute title resolution.
    pub fn label_provider(mut self, provider: impl LabelProvider + 'static) -> Self {
        self.label_provider = Some(Box::new(provider));
        self
    }

    /// Attach an association reflector for default sortability decisions.
    pub fn association_reflector(mut self, reflector: impl AssociationReflector + 'static) -> Self {
        self.reflector = Some(Box::new(reflector));
        self
    }

    /// Override how body row identifiers are derived from records.
    pub fn row_id(mut self, f: impl Fn(&Value) -> Option<String> + 'static) -> Self {
        self.row_id = Some(Box::new(f));
        self
    }

    /// Whether any column of this table may show sort controls.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The attached label provider, if any.
    pub fn label_provider_ref(&self) -> Option<&dyn LabelProvider> {
        self.label_provider.as_deref()
    }

    /// The attached association reflector, if any.
    pub fn reflector_ref(&self) -> Option<&dyn AssociationReflector> {
        self.reflector.as_deref()
    }

    /// Derive the row identifier for a record.
    ///
    /// Uses the attached function when present, otherwise `record_<id>`
    /// from the record's `id` field.
    pub fn row_id_for(&self, record: &Value) -> Option<String> {
        match &self.row_id {
            Some(f) => f(record),
            None => default_row_id(record),
        }
    }
}

fn default_row_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::Number(n) => Some(format!("record_{}", n)),
        Value::String(s) => Some(format!("record_{}", s)),
        _ => None,
    }
}
