//! Sort state parsed from request query parameters.
//!
//! The current sort is carried in the `order` parameter as `<key>_<dir>`,
//! where `<key>` contains only word characters, dots, or underscores and
//! `<dir>` is `asc` or `desc`. Anything else means no sort is active.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::params::{QueryParams, ORDER_PARAM};

/// Direction of an active or requested sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The query-string token for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sort currently requested by the caller, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<(String, SortDirection)>,
}

impl SortState {
    /// Parse the sort state from query parameters.
    ///
    /// A malformed or absent `order` parameter yields "no current sort",
    /// never an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tabulon::{QueryParams, SortDirection, SortState};
    ///
    /// let params = QueryParams::from_pairs([("order", "last_name_desc")]);
    /// let sort = SortState::parse(&params);
    /// assert_eq!(sort.current_key(), Some("last_name"));
    /// assert_eq!(sort.current_direction(), Some(SortDirection::Desc));
    /// ```
    pub fn parse(params: &QueryParams) -> Self {
        let current = params.get(ORDER_PARAM).and_then(parse_order);
        trace!("parsed sort state: {:?}", current);
        SortState { current }
    }

    /// Construct a state with no active sort.
    pub fn none() -> Self {
        SortState::default()
    }

    /// The key of the active sort, if one is active.
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|(key, _)| key.as_str())
    }

    /// The direction of the active sort, if one is active.
    pub fn current_direction(&self) -> Option<SortDirection> {
        self.current.as_ref().map(|(_, dir)| *dir)
    }

    /// True when `key` is the active sort key.
    pub fn is_current(&self, key: &str) -> bool {
        self.current_key() == Some(key)
    }

    /// Direction a toggle link for `key` should request next.
    ///
    /// Switching to a new key always starts descending. Toggling the active
    /// key flips its direction.
    pub fn next_direction_for(&self, key: &str) -> SortDirection {
        match &self.current {
            Some((current, SortDirection::Desc)) if current == key => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// Split an `order` value into key and direction.
///
/// The accepted shape is `<key>_<asc|desc>` with `<key>` limited to word
/// characters, dots, and underscores.
fn parse_order(order: &str) -> Option<(String, SortDirection)> {
    let (key, token) = order.rsplit_once('_')?;
    let direction = SortDirection::from_token(token)?;
    if key.is_empty() || !key.chars().all(is_sort_key_char) {
        return None;
    }
    Some((key.to_string(), direction))
}

fn is_sort_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
