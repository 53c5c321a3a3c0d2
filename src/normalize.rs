use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::record::PageRecord;

/// Recognized top-level layouts of a crawl artifact.
///
/// The crawler makes no format guarantees, so the artifact is classified
/// before any field is read and each variant carries its own normalization
/// rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A list whose first element is an object: one object per page.
    ObjectList,
    /// A list whose first element is itself a list: flatten one level.
    NestedList,
    /// A single object: treated as a one-page list.
    SingleObject,
    /// A list with no elements.
    EmptyList,
    /// A list starting with something that is neither object nor list.
    UnrecognizedElement,
    /// A scalar or other non-container top level.
    UnrecognizedTopLevel,
}

/// Why normalization stopped without producing any records.
///
/// These are ordinary outcomes, not errors: the run ends gracefully with a
/// console message and no report or chart artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EmptyInput,
    UnexpectedElementType,
    UnexpectedTopLevelType,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EmptyInput => write!(f, "No data found in the crawl artifact (empty list); nothing to analyze."),
            StopReason::UnexpectedElementType => write!(
                f,
                "Unexpected element type in the crawl artifact: list elements must be objects or lists."
            ),
            StopReason::UnexpectedTopLevelType => write!(
                f,
                "Unexpected top-level JSON type in the crawl artifact: expected a list or an object."
            ),
        }
    }
}

/// Classify a decoded artifact without touching any page fields.
pub fn classify(value: &Value) -> Shape {
    match value {
        Value::Array(items) => match items.first() {
            None => Shape::EmptyList,
            Some(Value::Object(_)) => Shape::ObjectList,
            Some(Value::Array(_)) => Shape::NestedList,
            Some(_) => Shape::UnrecognizedElement,
        },
        Value::Object(_) => Shape::SingleObject,
        _ => Shape::UnrecognizedTopLevel,
    }
}

/// Normalize a decoded artifact into page records.
///
/// Per-field type mismatches never fail the run; only the three
/// [`StopReason`] conditions end it early.
pub fn normalize(value: &Value) -> Result<Vec<PageRecord>, StopReason> {
    let shape = classify(value);
    debug!(component = "normalizer", shape = ?shape, "Classified crawl artifact");

    let records = match shape {
        Shape::ObjectList => {
            // Mixed lists are tolerated: stray strings get the link/text
            // rule, anything else is skipped.
            let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
            items
                .iter()
                .filter_map(|item| record_from_item(item, false))
                .collect()
        }
        Shape::NestedList => {
            let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
            let mut records = Vec::new();
            for item in items {
                match item {
                    Value::Array(inner) => {
                        records.extend(inner.iter().filter_map(|it| record_from_item(it, true)));
                    }
                    other => records.extend(record_from_item(other, true)),
                }
            }
            records
        }
        Shape::SingleObject => value
            .as_object()
            .map(|map| vec![record_from_map(map, false)])
            .unwrap_or_default(),
        Shape::EmptyList => return Err(StopReason::EmptyInput),
        Shape::UnrecognizedElement => return Err(StopReason::UnexpectedElementType),
        Shape::UnrecognizedTopLevel => return Err(StopReason::UnexpectedTopLevelType),
    };

    info!(
        component = "normalizer",
        shape = ?shape,
        record_count = records.len(),
        "Normalized crawl artifact"
    );
    Ok(records)
}

/// One flattened item: an object becomes a page record, a string is
/// classified as a link (when it starts with `http`) or freestanding text,
/// anything else is dropped.
fn record_from_item(item: &Value, url_fallback: bool) -> Option<PageRecord> {
    match item {
        Value::Object(map) => Some(record_from_map(map, url_fallback)),
        Value::String(s) => {
            if s.starts_with("http") {
                Some(PageRecord {
                    links: vec![s.clone()],
                    ..PageRecord::default()
                })
            } else {
                Some(PageRecord {
                    text: Some(s.clone()),
                    ..PageRecord::default()
                })
            }
        }
        _ => None,
    }
}

fn record_from_map(map: &Map<String, Value>, url_fallback: bool) -> PageRecord {
    let text = map.get("text").and_then(Value::as_str).map(str::to_string);

    // A present-but-wrong-type `links` field means "no links", it does not
    // re-enable the `url` fallback.
    let links = match map.get("links") {
        Some(value) => string_items(value),
        None if url_fallback => map
            .get("url")
            .and_then(Value::as_str)
            .map(|url| vec![url.to_string()])
            .unwrap_or_default(),
        None => Vec::new(),
    };

    let image_count = map
        .get("images")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);

    PageRecord {
        text,
        links,
        image_count,
    }
}

fn string_items(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
