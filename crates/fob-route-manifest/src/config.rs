//! File and environment based configuration.
//!
//! Only the data-shaped options can come from a file: mapping-form `routes`
//! and `assets`, `headers = true`, and the scalar settings. Function-valued
//! options are set on [`RouteManifestOptions`] directly.
//!
//! Sources, lowest priority first: defaults, the config file (TOML when the
//! extension is `.toml`, JSON otherwise), then `FOB_ROUTE_MANIFEST_*`
//! environment variables.

use std::path::Path;

use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ManifestError, Result};
use crate::options::RouteManifestOptions;
use crate::writer::DEFAULT_FILENAME;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Module id -> route pattern
    pub routes: Option<IndexMap<String, String>>,
    /// File name -> asset kind; replaces the extension-based default
    pub assets: Option<IndexMap<String, String>>,
    /// Emit the built-in `Link` preload header
    pub headers: bool,
    pub public_path: String,
    pub minify: bool,
    /// Empty disables emission
    pub filename: String,
    pub inline: bool,
    pub merge: bool,
    pub sort: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            routes: None,
            assets: None,
            headers: false,
            public_path: "/".to_string(),
            minify: false,
            filename: DEFAULT_FILENAME.to_string(),
            inline: false,
            merge: false,
            sort: true,
        }
    }
}

impl ManifestConfig {
    pub const ENV_PREFIX: &'static str = "FOB_ROUTE_MANIFEST_";

    /// Layered sources for this config.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            let is_toml = path.extension().and_then(|ext| ext.to_str()) == Some("toml");
            figment = if is_toml {
                figment.merge(Toml::file(path))
            } else {
                figment.merge(Json::file(path))
            };
        }

        figment.merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load configuration from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .map_err(|e| ManifestError::config(e.to_string()))
    }

    /// Create from a JSON value (programmatic config).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ManifestError::config(e.to_string()))
    }

    /// Convert into builder options.
    ///
    /// A config without `routes` still converts; the error surfaces from
    /// [`RouteManifestOptions::build`].
    pub fn into_options(self) -> RouteManifestOptions {
        let mut options = RouteManifestOptions::new()
            .public_path(self.public_path)
            .minify(self.minify)
            .filename(self.filename)
            .inline(self.inline)
            .merge(self.merge)
            .sort(self.sort);

        if let Some(routes) = self.routes {
            options = options.routes_map(routes);
        }
        if let Some(assets) = self.assets {
            options = options.assets_map(assets);
        }
        if self.headers {
            options = options.link_headers();
        }
        options
    }
}
