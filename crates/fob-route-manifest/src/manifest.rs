//! Manifest data model and serialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::assets::Asset;
use crate::error::Result;
use crate::headers::HeaderRecord;

/// Files rendered for one route.
///
/// `Formatted` holds whatever a caller-supplied formatter returned; nothing is
/// assumed about its shape.
///
/// Equality is by JSON value: a formatted value that serializes exactly like
/// an asset list (including `[]`) equals that asset list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteFiles {
    Assets(Vec<Asset>),
    Formatted(Value),
}

impl RouteFiles {
    pub fn as_assets(&self) -> Option<&[Asset]> {
        match self {
            RouteFiles::Assets(assets) => Some(assets),
            RouteFiles::Formatted(_) => None,
        }
    }

    /// The JSON value this entry serializes to.
    pub fn to_value(&self) -> Value {
        match self {
            RouteFiles::Assets(assets) => assets
                .iter()
                .map(|asset| json!({ "type": asset.kind.as_str(), "href": asset.href }))
                .collect(),
            RouteFiles::Formatted(value) => value.clone(),
        }
    }
}

impl PartialEq for RouteFiles {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RouteFiles::Assets(a), RouteFiles::Assets(b)) => a == b,
            (RouteFiles::Formatted(a), RouteFiles::Formatted(b)) => a == b,
            _ => self.to_value() == other.to_value(),
        }
    }
}

/// Route pattern -> rendered files.
pub type FileMap = IndexMap<String, RouteFiles>;

/// Replaces a route's asset list before headers are computed.
pub type FormatFn = dyn Fn(&[Asset]) -> Option<Value> + Send + Sync;

/// A route's manifest value when header synthesis is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteManifestEntry {
    pub files: RouteFiles,
    pub headers: Vec<HeaderRecord>,
}

/// The per-route preload manifest.
///
/// Serializes to a JSON object keyed by route pattern, in manifest order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    WithHeaders(IndexMap<String, RouteManifestEntry>),
    Files(FileMap),
}

impl Manifest {
    /// Route patterns in output order.
    pub fn routes(&self) -> Vec<&str> {
        match self {
            Manifest::WithHeaders(entries) => entries.keys().map(String::as_str).collect(),
            Manifest::Files(files) => files.keys().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Manifest::WithHeaders(entries) => entries.len(),
            Manifest::Files(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn files(&self, route: &str) -> Option<&RouteFiles> {
        match self {
            Manifest::WithHeaders(entries) => entries.get(route).map(|entry| &entry.files),
            Manifest::Files(files) => files.get(route),
        }
    }

    /// Headers of `route`; `None` when header synthesis is disabled.
    pub fn headers(&self, route: &str) -> Option<&[HeaderRecord]> {
        match self {
            Manifest::WithHeaders(entries) => entries.get(route).map(|entry| &entry.headers[..]),
            Manifest::Files(_) => None,
        }
    }

    /// Serialize to JSON, pretty-printed with two-space indent unless `minify`.
    pub fn to_json(&self, minify: bool) -> Result<String> {
        let json = if minify {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        Ok(json)
    }
}

/// JavaScript truthiness of a formatter result.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
