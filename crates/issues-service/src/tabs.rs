//! Open/Closed tab navigation
//!
//! The list page has exactly two tabs. The selected one comes from the
//! `state` query parameter; every other parameter is carried over into
//! the links of both tabs.

use serde::{Deserialize, Serialize};

use issues_core::StateFilter;

use crate::services::{ServiceError, ServiceResult};

/// Query string split into ordered key/value pairs
pub type QueryPairs = Vec<(String, String)>;

/// Parse a raw query string (without the leading `?`)
pub fn parse_query(query: Option<&str>) -> ServiceResult<QueryPairs> {
    match query {
        None | Some("") => Ok(Vec::new()),
        Some(raw) => serde_urlencoded::from_str(raw)
            .map_err(|e| ServiceError::validation(format!("invalid query: {e}"))),
    }
}

/// The tab selected by the first `state` parameter.
///
/// A missing parameter and `open` both select the Open tab; any value other
/// than `open` or `closed` is rejected.
pub fn selected_filter(pairs: &[(String, String)]) -> ServiceResult<StateFilter> {
    let value = pairs
        .iter()
        .find(|(k, _)| k == StateFilter::QUERY_KEY)
        .map(|(_, v)| v.as_str());
    Ok(StateFilter::from_query(value)?)
}

/// One navigation tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub filter: StateFilter,
    pub count: u64,
    pub selected: bool,
    /// Link to the tab; `None` for the selected tab
    pub href: Option<String>,
}

/// Navigation model for the issue list header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesNav {
    pub open: Tab,
    pub closed: Tab,
}

impl IssuesNav {
    /// Build both tabs for a page at `path` with the given query.
    ///
    /// `path` is the page's absolute path; an empty path links to `/`.
    pub fn new(
        path: &str,
        pairs: &[(String, String)],
        selected: StateFilter,
        open_count: u64,
        closed_count: u64,
    ) -> Self {
        let tab = |filter: StateFilter, count: u64| {
            let is_selected = filter == selected;
            Tab {
                filter,
                count,
                selected: is_selected,
                href: (!is_selected).then(|| tab_href(path, pairs, filter)),
            }
        };
        Self {
            open: tab(StateFilter::Open, open_count),
            closed: tab(StateFilter::Closed, closed_count),
        }
    }

    pub fn selected(&self) -> StateFilter {
        if self.closed.selected {
            StateFilter::Closed
        } else {
            StateFilter::Open
        }
    }
}

/// Link to the tab for `filter`, keeping all other query parameters.
///
/// Open is the default tab, so its link drops `state` altogether.
pub fn tab_href(path: &str, pairs: &[(String, String)], filter: StateFilter) -> String {
    let mut query: Vec<(&str, &str)> = pairs
        .iter()
        .filter(|(k, _)| k != StateFilter::QUERY_KEY)
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    if filter == StateFilter::Closed {
        query.push((StateFilter::QUERY_KEY, filter.as_str()));
    }

    let path = if path.is_empty() { "/" } else { path };
    // Encoding string pairs cannot fail.
    match serde_urlencoded::to_string(&query) {
        Ok(encoded) if !encoded.is_empty() => format!("{path}?{encoded}"),
        _ => path.to_string(),
    }
}
