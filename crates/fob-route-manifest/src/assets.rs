//! Artifact kinds and the default extension-based classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse content classification of a built file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Script,
    Style,
    Image,
    Font,
    /// Label produced by a caller-supplied asset rule
    Custom(String),
}

impl AssetKind {
    pub fn as_str(&self) -> &str {
        match self {
            AssetKind::Script => "script",
            AssetKind::Style => "style",
            AssetKind::Image => "image",
            AssetKind::Font => "font",
            AssetKind::Custom(label) => label,
        }
    }

    /// Whether preloading this kind needs `crossorigin=anonymous`.
    pub fn is_cors(&self) -> bool {
        matches!(self.as_str(), "script" | "font")
    }
}

impl From<String> for AssetKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "script" => AssetKind::Script,
            "style" => AssetKind::Style,
            "image" => AssetKind::Image,
            "font" => AssetKind::Font,
            _ => AssetKind::Custom(label),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AssetKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(AssetKind::from)
    }
}

/// A file rendered into a route's manifest entry.
///
/// Parsing rejects extra fields, so formatter output that merely resembles an
/// asset list stays a formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Asset {
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub href: String,
}

impl Asset {
    pub fn new(kind: impl Into<AssetKind>, href: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            href: href.into(),
        }
    }
}

/// Classify a file by extension, case-insensitively.
///
/// Returns `None` for anything that is not a script, style, image or font.
pub fn default_kind(file_name: &str) -> Option<AssetKind> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "js" => Some(AssetKind::Script),
        "svg" | "jpg" | "jpeg" | "png" | "webp" => Some(AssetKind::Image),
        "woff" | "woff2" | "otf" | "ttf" | "eot" => Some(AssetKind::Font),
        "css" => Some(AssetKind::Style),
        _ => None,
    }
}
