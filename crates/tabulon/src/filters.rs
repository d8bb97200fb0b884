//! Filter declaration forwarding.
//!
//! Tables are often paired with a filter sidebar configured elsewhere. This
//! module only records filter declarations for that outer pipeline; it
//! never evaluates them and carries no filtering logic of its own.

use serde_json::{Map, Value};

/// One declared filter: an attribute plus opaque configuration options.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// The attribute the filter applies to.
    pub attribute: String,
    /// Configuration options, passed through untouched.
    pub options: Map<String, Value>,
}

/// Ordered collection of filter declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
    preserve_defaults: bool,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Append a filter declaration.
    pub fn add(&mut self, attribute: impl Into<String>, options: Map<String, Value>) {
        self.filters.push(Filter {
            attribute: attribute.into(),
            options,
        });
    }

    /// Move an existing declaration to the given position. Does nothing
    /// when the attribute is not declared; the index is clamped to the end.
    pub fn move_to_index(&mut self, attribute: &str, index: usize) {
        if let Some(position) = self.position(attribute) {
            let filter = self.filters.remove(position);
            let index = index.min(self.filters.len());
            self.filters.insert(index, filter);
        }
    }

    /// Replace the options of an existing declaration, keeping its
    /// position. Does nothing when the attribute is not declared.
    pub fn replace(&mut self, attribute: &str, options: Map<String, Value>) {
        if let Some(position) = self.position(attribute) {
            self.filters[position].options = options;
        }
    }

    /// Remove every declaration for the attribute.
    pub fn remove(&mut self, attribute: &str) {
        self.filters.retain(|filter| filter.attribute != attribute);
    }

    /// Keep default filters alongside the explicit declarations.
    pub fn preserve_defaults(&mut self) {
        self.preserve_defaults = true;
    }

    /// Whether default filters are preserved.
    pub fn is_preserving_defaults(&self) -> bool {
        self.preserve_defaults
    }

    /// The declarations in order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    fn position(&self, attribute: &str) -> Option<usize> {
        self.filters
            .iter()
            .position(|filter| filter.attribute == attribute)
    }
}
