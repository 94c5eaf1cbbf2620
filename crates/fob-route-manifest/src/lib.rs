//! Per-route preload manifests from a bundler's output graph.
//!
//! Given one bundle snapshot (a list of [`BuiltFile`] records) this crate
//! works out which scripts, styles, images and fonts each application route
//! needs, and optionally derives HTTP preload `Link` headers for them.
//!
//! ## Pipeline
//!
//! ```text
//! BuiltFile[] → route classifier → aggregate deps → merge "*" → asset kinds
//!             → order routes → format → headers → JSON → ManifestSink
//! ```
//!
//! The crate has no opinion about the bundler. The Rolldown integration lives
//! in `fob-plugin-route-manifest`; anything else can implement
//! [`ManifestSink`] or use [`MemorySink`].
//!
//! ## Example
//!
//! ```rust
//! use fob_route_manifest::{BuiltFile, MemorySink, RouteManifestOptions};
//!
//! let bundle = vec![
//!     BuiltFile::new("index.1c5a.js").entry(true).facade("src/index.js"),
//!     BuiltFile::new("home.b0b8.js")
//!         .entry(true)
//!         .facade("src/routes/home.js")
//!         .import("index.1c5a.js")
//!         .reference("home.2d12.css"),
//! ];
//!
//! let generator = RouteManifestOptions::new()
//!     .routes_map([("src/index.js", "*"), ("src/routes/home.js", "/")])
//!     .link_headers()
//!     .build()?;
//!
//! let mut sink = MemorySink::new();
//! let manifest = generator.generate(&bundle, &mut sink)?;
//!
//! assert_eq!(manifest.routes(), ["/", "*"]);
//! assert_eq!(sink.emitted[0].file_name, "rmanifest.json");
//! # Ok::<(), fob_route_manifest::ManifestError>(())
//! ```

pub mod assets;
pub mod bundle;
pub mod config;
pub mod error;
pub mod headers;
pub mod lookup;
pub mod manifest;
pub mod options;
pub mod pipeline;
pub mod routes;
pub mod sort;
pub mod writer;

#[cfg(feature = "logging")]
pub mod logging;

pub use assets::{default_kind, Asset, AssetKind};
pub use bundle::BuiltFile;
pub use config::ManifestConfig;
pub use error::{ManifestError, Result};
pub use headers::{link_header, HeaderRecord, HeaderStrategy, HeaderValue};
pub use lookup::Lookup;
pub use manifest::{FileMap, Manifest, RouteFiles, RouteManifestEntry};
pub use options::RouteManifestOptions;
pub use pipeline::RouteManifest;
pub use routes::{RouteFileSet, SHARED_ROUTE};
pub use writer::{EmittedAsset, ManifestSink, MemorySink, OutputOptions, DEFAULT_FILENAME};
