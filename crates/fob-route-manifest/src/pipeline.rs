//! The manifest pipeline: classify, aggregate, merge, render, order, format,
//! synthesize headers.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::assets::{Asset, AssetKind};
use crate::bundle::BuiltFile;
use crate::error::Result;
use crate::headers::HeaderStrategy;
use crate::lookup::Lookup;
use crate::manifest::{is_truthy, FileMap, FormatFn, Manifest, RouteFiles, RouteManifestEntry};
use crate::routes;
use crate::sort::sort_routes;
use crate::writer::{write_manifest, ManifestSink, OutputOptions};

pub(crate) type AssetRule = Arc<dyn Fn(&str) -> Option<AssetKind> + Send + Sync>;

/// A configured route manifest generator.
///
/// Holds no state between builds; each call works on a fresh snapshot.
/// Create one with [`RouteManifestOptions`](crate::RouteManifestOptions).
#[derive(Clone)]
pub struct RouteManifest {
    pub(crate) routes: Lookup,
    pub(crate) assets: AssetRule,
    pub(crate) headers: Option<HeaderStrategy>,
    pub(crate) format: Option<Arc<FormatFn>>,
    pub(crate) public_path: String,
    pub(crate) output: OutputOptions,
    pub(crate) merge: bool,
    pub(crate) sort: bool,
}

impl RouteManifest {
    /// Compute the manifest for one bundle snapshot.
    pub fn build<'a>(&self, files: impl IntoIterator<Item = &'a BuiltFile>) -> Manifest {
        let mut pages = routes::aggregate(files, &self.routes);
        if self.merge {
            routes::merge_shared(&mut pages);
        }

        let mut file_map: FileMap = pages
            .iter()
            .map(|(route, files)| (route.clone(), RouteFiles::Assets(self.render(files))))
            .collect();

        let mut order: Vec<String> = file_map.keys().cloned().collect();
        if self.sort {
            sort_routes(&mut order);
        }

        if let Some(format) = &self.format {
            for files in file_map.values_mut() {
                let RouteFiles::Assets(assets) = files else {
                    continue;
                };
                if let Some(formatted) = format(assets).filter(is_truthy) {
                    *files = RouteFiles::Formatted(formatted);
                }
            }
        }

        tracing::debug!(
            "[route-manifest] {} routes, headers: {}",
            order.len(),
            self.headers.is_some()
        );

        let Some(strategy) = &self.headers else {
            let ordered: FileMap = order
                .into_iter()
                .filter_map(|route| {
                    let files = file_map.swap_remove(&route)?;
                    Some((route, files))
                })
                .collect();
            return Manifest::Files(ordered);
        };

        let entries: IndexMap<String, RouteManifestEntry> = order
            .into_iter()
            .filter_map(|route| {
                let files = file_map.get(&route)?.clone();
                let headers = strategy.headers(&files, &route, &file_map);
                Some((route, RouteManifestEntry { files, headers }))
            })
            .collect();
        Manifest::WithHeaders(entries)
    }

    /// Compute the manifest and deliver it to `sink`.
    pub fn generate<'a>(
        &self,
        files: impl IntoIterator<Item = &'a BuiltFile>,
        sink: &mut dyn ManifestSink,
    ) -> Result<Manifest> {
        let manifest = self.build(files);
        write_manifest(&manifest, &self.output, sink)?;
        Ok(manifest)
    }

    pub fn output(&self) -> &OutputOptions {
        &self.output
    }

    fn render(&self, files: &IndexSet<String>) -> Vec<Asset> {
        files
            .iter()
            .filter_map(|file| {
                let Some(kind) = (self.assets)(file) else {
                    tracing::trace!("[route-manifest] no asset kind for {file}");
                    return None;
                };
                Some(Asset {
                    kind,
                    href: format!("{}{}", self.public_path, file),
                })
            })
            .collect()
    }
}

impl fmt::Debug for RouteManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteManifest")
            .field("routes", &self.routes)
            .field("headers", &self.headers)
            .field("format", &self.format.is_some())
            .field("public_path", &self.public_path)
            .field("output", &self.output)
            .field("merge", &self.merge)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}
