//! Programmatic configuration for [`RouteManifest`].
//!
//! Every "mapping or function" option is normalized here, once, into a
//! [`Lookup`] or an explicit hook slot. [`RouteManifestOptions::build`] is the
//! only place that can fail.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::assets::{self, Asset, AssetKind};
use crate::error::{ManifestError, Result};
use crate::headers::{HeaderRecord, HeaderStrategy};
use crate::lookup::Lookup;
use crate::manifest::{FileMap, FormatFn, RouteFiles};
use crate::pipeline::{AssetRule, RouteManifest};
use crate::writer::OutputOptions;

/// Builder for [`RouteManifest`].
///
/// # Example
///
/// ```
/// use fob_route_manifest::RouteManifestOptions;
///
/// let manifest = RouteManifestOptions::new()
///     .routes_map([("src/routes/home.js", "/"), ("src/index.js", "*")])
///     .link_headers()
///     .merge(true)
///     .build()
///     .unwrap();
/// # let _ = manifest;
/// ```
#[derive(Clone)]
pub struct RouteManifestOptions {
    routes: Option<Lookup>,
    assets: Option<Lookup>,
    headers: Option<HeaderStrategy>,
    format: Option<Arc<FormatFn>>,
    public_path: String,
    output: OutputOptions,
    merge: bool,
    sort: bool,
}

impl Default for RouteManifestOptions {
    fn default() -> Self {
        Self {
            routes: None,
            assets: None,
            headers: None,
            format: None,
            public_path: "/".to_string(),
            output: OutputOptions::default(),
            merge: false,
            sort: true,
        }
    }
}

impl RouteManifestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify entries with a prepared [`Lookup`].
    pub fn routes(mut self, routes: Lookup) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Classify entries by literal module id -> route pattern mapping.
    pub fn routes_map<K, V>(self, map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.routes(Lookup::from_map(map))
    }

    /// Classify entries with a function; `None` or `""` leaves the file unrouted.
    pub fn routes_fn<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.routes(Lookup::from_fn(f))
    }

    /// Replace the extension-based asset classifier with a mapping.
    pub fn assets_map<K, V>(mut self, map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.assets = Some(Lookup::from_map(map));
        self
    }

    /// Replace the extension-based asset classifier with a function.
    pub fn assets_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.assets = Some(Lookup::from_fn(f));
        self
    }

    /// Emit the built-in preload `Link` header for every route.
    pub fn link_headers(mut self) -> Self {
        self.headers = Some(HeaderStrategy::Link);
        self
    }

    /// Compute each route's headers with a function.
    pub fn headers_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&RouteFiles, &str, &FileMap) -> Option<Vec<HeaderRecord>> + Send + Sync + 'static,
    {
        self.headers = Some(HeaderStrategy::custom(f));
        self
    }

    pub fn headers(mut self, strategy: Option<HeaderStrategy>) -> Self {
        self.headers = strategy;
        self
    }

    /// Replace each route's asset list with a derived value.
    pub fn format<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Asset]) -> Option<Value> + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(f));
        self
    }

    pub fn public_path(mut self, public_path: impl Into<String>) -> Self {
        self.public_path = public_path.into();
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.output.minify = minify;
        self
    }

    /// Name of the emitted manifest; an empty name disables emission.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.output.filename = Some(filename.into());
        self
    }

    /// Do not emit a manifest artifact.
    pub fn without_filename(mut self) -> Self {
        self.output.filename = None;
        self
    }

    pub fn inline(mut self, inline: bool) -> Self {
        self.output.inline = inline;
        self
    }

    /// Broadcast the `*` route into every other route.
    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Order routes by pattern specificity instead of discovery order.
    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MissingRoutes`] when no route rule was given.
    pub fn build(self) -> Result<RouteManifest> {
        let routes = self.routes.ok_or(ManifestError::MissingRoutes)?;

        let assets: AssetRule = match self.assets {
            Some(lookup) => Arc::new(move |file: &str| lookup.get(file).map(AssetKind::from)),
            None => Arc::new(assets::default_kind),
        };

        Ok(RouteManifest {
            routes,
            assets,
            headers: self.headers,
            format: self.format,
            public_path: self.public_path,
            output: self.output,
            merge: self.merge,
            sort: self.sort,
        })
    }
}

impl fmt::Debug for RouteManifestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteManifestOptions")
            .field("routes", &self.routes)
            .field("assets", &self.assets)
            .field("headers", &self.headers)
            .field("format", &self.format.is_some())
            .field("public_path", &self.public_path)
            .field("output", &self.output)
            .field("merge", &self.merge)
            .field("sort", &self.sort)
            .finish()
    }
}
