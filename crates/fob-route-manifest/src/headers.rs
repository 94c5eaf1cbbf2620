//! Per-route HTTP header synthesis.
//!
//! The built-in strategy renders a single preload `Link` header:
//!
//! ```text
//! </a.js>; rel=preload; as=script; crossorigin=anonymous, </b.css>; rel=preload; as=style
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::manifest::{FileMap, RouteFiles};

/// Header value; either one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Single(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(values: Vec<String>) -> Self {
        HeaderValue::Multiple(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub key: String,
    pub value: HeaderValue,
}

impl HeaderRecord {
    pub fn new(key: impl Into<String>, value: impl Into<HeaderValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Custom header builder: `(files, pattern, all routes) -> headers`.
///
/// Returning `None` yields an empty header list for the route.
pub type HeadersFn =
    dyn Fn(&RouteFiles, &str, &FileMap) -> Option<Vec<HeaderRecord>> + Send + Sync;

/// How headers are derived for each route.
#[derive(Clone)]
pub enum HeaderStrategy {
    /// Built-in preload `Link` header
    Link,
    Custom(Arc<HeadersFn>),
}

impl HeaderStrategy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&RouteFiles, &str, &FileMap) -> Option<Vec<HeaderRecord>> + Send + Sync + 'static,
    {
        HeaderStrategy::Custom(Arc::new(f))
    }

    pub fn headers(
        &self,
        files: &RouteFiles,
        pattern: &str,
        file_map: &FileMap,
    ) -> Vec<HeaderRecord> {
        match self {
            HeaderStrategy::Link => vec![link_header(files)],
            HeaderStrategy::Custom(build) => build(files, pattern, file_map).unwrap_or_default(),
        }
    }
}

impl fmt::Debug for HeaderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderStrategy::Link => f.write_str("Link"),
            HeaderStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Build the preload `Link` header for one route.
///
/// Formatted values are read leniently: entries without `href` or `type`
/// render those fields as `undefined`, and a non-list value renders nothing.
pub fn link_header(files: &RouteFiles) -> HeaderRecord {
    let value = match files {
        RouteFiles::Assets(assets) => assets
            .iter()
            .map(|asset| link_fragment(&asset.href, asset.kind.as_str()))
            .collect::<Vec<_>>()
            .join(", "),
        RouteFiles::Formatted(value) => formatted_link_value(value),
    };
    HeaderRecord::new("Link", value)
}

fn link_fragment(href: &str, kind: &str) -> String {
    let mut fragment = format!("<{href}>; rel=preload; as={kind}");
    if matches!(kind, "script" | "font") {
        fragment.push_str("; crossorigin=anonymous");
    }
    fragment
}

fn formatted_link_value(value: &Value) -> String {
    let Some(items) = value.as_array() else {
        tracing::debug!("[route-manifest] formatted files are not a list; Link header left empty");
        return String::new();
    };

    tracing::debug!("[route-manifest] building Link header from formatted files");
    items
        .iter()
        .map(|item| link_fragment(&loose_field(item, "href"), &loose_field(item, "type")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn loose_field(item: &Value, name: &str) -> String {
    match item.get(name) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}
