//! Output writer: hands the serialized manifest to the bundler.
//!
//! Two independent outputs, either or both may be enabled:
//!
//! - **Named artifact**: the manifest JSON emitted under `filename`.
//! - **Inline**: `window.__rmanifest=<json>;` prepended to the main entry.
//!
//! Inlining happens after the bundler has already content-hashed the main
//! entry, so the entry's file name does not reflect the embedded manifest.

use crate::error::Result;
use crate::manifest::Manifest;

/// Default name of the emitted manifest artifact.
pub const DEFAULT_FILENAME: &str = "rmanifest.json";

/// Global the inline statement assigns to.
pub const INLINE_GLOBAL: &str = "window.__rmanifest";

/// Bundler-side capabilities the writer needs.
pub trait ManifestSink {
    /// Add a named artifact to the build output.
    fn emit_asset(&mut self, file_name: &str, source: String);

    /// Mutable code of the designated main entry, if the build has one.
    fn main_entry(&mut self) -> Option<&mut String>;
}

/// Serialization and delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// Compact instead of pretty-printed artifact
    pub minify: bool,
    /// Artifact name; `None` or empty disables emission
    pub filename: Option<String>,
    /// Prepend the manifest to the main entry
    pub inline: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            minify: false,
            filename: Some(DEFAULT_FILENAME.to_string()),
            inline: false,
        }
    }
}

impl OutputOptions {
    fn artifact_name(&self) -> Option<&str> {
        self.filename.as_deref().filter(|name| !name.is_empty())
    }
}

/// Statement embedding `json` into the main entry.
pub fn inline_statement(json: &str) -> String {
    format!("{INLINE_GLOBAL}={json};")
}

/// Deliver `manifest` to `sink` according to `options`.
pub fn write_manifest(
    manifest: &Manifest,
    options: &OutputOptions,
    sink: &mut dyn ManifestSink,
) -> Result<()> {
    if options.inline {
        match sink.main_entry() {
            Some(code) => {
                let statement = inline_statement(&manifest.to_json(true)?);
                code.insert_str(0, &statement);
                tracing::debug!("[route-manifest] inlined manifest into main entry");
            }
            None => tracing::debug!("[route-manifest] no main entry to inline into"),
        }
    }

    if let Some(name) = options.artifact_name() {
        sink.emit_asset(name, manifest.to_json(options.minify)?);
        tracing::debug!("[route-manifest] emitted {name}");
    }

    Ok(())
}

/// An artifact handed to [`ManifestSink::emit_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    pub file_name: String,
    pub source: String,
}

/// In-memory sink, for embedding the pipeline outside a bundler.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub emitted: Vec<EmittedAsset>,
    pub main_entry: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_main_entry(code: impl Into<String>) -> Self {
        Self {
            emitted: Vec::new(),
            main_entry: Some(code.into()),
        }
    }
}

impl ManifestSink for MemorySink {
    fn emit_asset(&mut self, file_name: &str, source: String) {
        self.emitted.push(EmittedAsset {
            file_name: file_name.to_string(),
            source,
        });
    }

    fn main_entry(&mut self) -> Option<&mut String> {
        self.main_entry.as_mut()
    }
}
