//! Rolldown plugin emitting per-route preload manifests
//!
//! Runs the `fob-route-manifest` pipeline in the `generate_bundle` hook, after
//! chunks are final and before anything is written.
//!
//! ## Architecture
//!
//! ```text
//! Output::Chunk[] → BuiltFile[] → RouteManifest → rmanifest.json (Output::Asset)
//!                                               → window.__rmanifest in main entry
//! ```
//!
//! - Only `.js` chunks are considered; `.mjs`/`.cjs` output is left out of
//!   the manifest.
//! - Every chunk with a facade module (static or dynamic entry) is offered to
//!   the route rule, keyed by that module id.
//! - A chunk's referenced files are the emitted assets whose file name appears
//!   in its code as a whole path segment (`"a.css"`, `'./a.css'`, `/a.css`) or
//!   whose source module belongs to the chunk.
//! - The main entry is the last chunk flagged `is_entry`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_plugin_route_manifest::FobRouteManifestPlugin;
//! use fob_route_manifest::RouteManifestOptions;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = RouteManifestOptions::new()
//!     .routes_fn(|module_id| {
//!         let name = module_id.split("src/routes").nth(1)?;
//!         Some(name.trim_end_matches(".js").to_string())
//!     })
//!     .link_headers();
//!
//! let plugin = Arc::new(FobRouteManifestPlugin::new(options)?);
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use fob_route_manifest::{BuiltFile, Manifest, ManifestSink, RouteManifest, RouteManifestOptions};
use rolldown_common::{Output, OutputAsset, OutputChunk};
use rolldown_plugin::{HookGenerateBundleArgs, HookNoopReturn, HookUsage, Plugin, PluginContext};

/// Rolldown plugin that writes the route manifest for each generated bundle
#[derive(Debug, Clone)]
pub struct FobRouteManifestPlugin {
    manifest: RouteManifest,
}

impl FobRouteManifestPlugin {
    /// Create the plugin, validating `options`
    ///
    /// # Errors
    ///
    /// Fails when `options` has no route rule.
    pub fn new(options: RouteManifestOptions) -> fob_route_manifest::Result<Self> {
        Ok(Self {
            manifest: options.build()?,
        })
    }

    pub fn from_manifest(manifest: RouteManifest) -> Self {
        Self { manifest }
    }
}

impl Plugin for FobRouteManifestPlugin {
    fn name(&self) -> Cow<'static, str> {
        "fob-route-manifest".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle
    }

    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let manifest = self.manifest.clone();

        async move {
            process_bundle(&manifest, args.bundle)?;
            Ok(())
        }
    }
}

/// Run the manifest pipeline over a generated bundle, mutating it in place
pub fn process_bundle(
    manifest: &RouteManifest,
    bundle: &mut Vec<Output>,
) -> fob_route_manifest::Result<Manifest> {
    let files = built_files(bundle);
    let main_entry = bundle
        .iter()
        .rposition(|output| matches!(output, Output::Chunk(chunk) if chunk.is_entry));

    let mut sink = BundleSink { bundle, main_entry };
    let result = manifest.generate(&files, &mut sink)?;

    tracing::debug!(
        "[fob-route-manifest] {} routes from {} chunks",
        result.len(),
        files.len()
    );
    Ok(result)
}

/// Convert every `.js` chunk of `bundle` into a [`BuiltFile`]
pub fn built_files(bundle: &[Output]) -> Vec<BuiltFile> {
    let assets: Vec<&OutputAsset> = bundle
        .iter()
        .filter_map(|output| match output {
            Output::Asset(asset) => Some(asset.as_ref()),
            Output::Chunk(_) => None,
        })
        .collect();

    bundle
        .iter()
        .filter_map(|output| match output {
            Output::Chunk(chunk) if chunk.filename.ends_with(".js") => {
                Some(built_file(chunk, &assets))
            }
            _ => None,
        })
        .collect()
}

fn built_file(chunk: &OutputChunk, assets: &[&OutputAsset]) -> BuiltFile {
    let facade_module_id = chunk.facade_module_id.as_ref().map(|id| id.to_string());

    BuiltFile {
        file_name: chunk.filename.to_string(),
        is_entry_point: facade_module_id.is_some(),
        facade_module_id,
        imports: chunk.imports.iter().map(|name| name.to_string()).collect(),
        referenced_files: assets
            .iter()
            .filter(|asset| is_referenced(chunk, asset))
            .map(|asset| asset.filename.to_string())
            .collect(),
    }
}

fn is_referenced(chunk: &OutputChunk, asset: &OutputAsset) -> bool {
    if mentions(&chunk.code, &asset.filename) {
        return true;
    }
    asset.original_file_names.iter().any(|source| {
        chunk
            .module_ids
            .iter()
            .any(|module_id| module_id.as_ref() == source.as_str())
    })
}

/// Whether `code` names `file_name` as a whole path segment.
fn mentions(code: &str, file_name: &str) -> bool {
    if file_name.is_empty() {
        return false;
    }
    code.match_indices(file_name).any(|(start, _)| {
        let before = code[..start].chars().next_back();
        let after = code[start + file_name.len()..].chars().next();
        let opens = before
            .is_none_or(|c| matches!(c, '"' | '\'' | '`' | '/' | '(') || c.is_whitespace());
        let closes = after
            .is_none_or(|c| matches!(c, '"' | '\'' | '`' | '?' | '#' | ')') || c.is_whitespace());
        opens && closes
    })
}

/// [`ManifestSink`] over a Rolldown bundle
struct BundleSink<'a> {
    bundle: &'a mut Vec<Output>,
    main_entry: Option<usize>,
}

impl ManifestSink for BundleSink<'_> {
    fn emit_asset(&mut self, file_name: &str, source: String) {
        let asset = OutputAsset {
            names: vec![],
            original_file_names: vec![],
            filename: file_name.into(),
            source: source.into(),
        };
        self.bundle.push(Output::Asset(Arc::new(asset)));
    }

    fn main_entry(&mut self) -> Option<&mut String> {
        match self.bundle.get_mut(self.main_entry?)? {
            Output::Chunk(chunk) => Some(&mut Arc::make_mut(chunk).code),
            Output::Asset(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcstr::ArcStr;
    use rolldown_common::{ModuleId, Modules, StrOrBytes};

    fn chunk(filename: &str, facade: Option<&str>, is_entry: bool, imports: &[&str]) -> Output {
        Output::Chunk(Arc::new(OutputChunk {
            name: ArcStr::from(filename),
            filename: ArcStr::from(filename),
            code: format!("/* {filename} */"),
            map: None,
            sourcemap_filename: None,
            preliminary_filename: filename.to_string(),
            is_entry,
            is_dynamic_entry: !is_entry && facade.is_some(),
            facade_module_id: facade.map(ModuleId::new),
            module_ids: facade.map(ModuleId::new).into_iter().collect(),
            imports: imports.iter().map(|name| ArcStr::from(*name)).collect(),
            dynamic_imports: vec![],
            exports: vec![],
            modules: Modules {
                keys: vec![],
                values: vec![],
            },
        }))
    }

    fn asset(filename: &str, original: Option<&str>) -> Output {
        Output::Asset(Arc::new(OutputAsset {
            names: vec![],
            original_file_names: original.map(str::to_string).into_iter().collect(),
            filename: ArcStr::from(filename),
            source: StrOrBytes::Str(String::new()),
        }))
    }

    fn bundle() -> Vec<Output> {
        vec![
            chunk("index.js", Some("src/index.js"), true, &[]),
            chunk("home.js", Some("src/routes/home.js"), false, &["index.js", "shared.js"]),
            chunk("shared.js", None, false, &[]),
            asset("home.css", Some("src/routes/home.js")),
            asset("unrelated.png", Some("src/other.png")),
        ]
    }

    fn plugin() -> FobRouteManifestPlugin {
        FobRouteManifestPlugin::new(RouteManifestOptions::new().routes_map([
            ("src/index.js", "*"),
            ("src/routes/home.js", "/"),
        ]))
        .unwrap()
    }

    #[test]
    fn test_plugin_name() {
        assert_eq!(plugin().name(), "fob-route-manifest");
    }

    #[test]
    fn test_plugin_requires_routes() {
        assert!(FobRouteManifestPlugin::new(RouteManifestOptions::new()).is_err());
    }

    #[test]
    fn test_built_files_from_chunks() {
        let files = built_files(&bundle());

        assert_eq!(files.len(), 3);
        assert!(files[0].is_entry_point);
        assert_eq!(files[0].facade_module_id.as_deref(), Some("src/index.js"));
        assert_eq!(files[1].imports, ["index.js", "shared.js"]);
        assert_eq!(files[1].referenced_files, ["home.css"]);
        assert!(!files[2].is_entry_point);
    }

    #[test]
    fn test_asset_named_in_code_is_referenced() {
        let mut output = bundle();
        if let Output::Chunk(chunk) = &mut output[2] {
            Arc::make_mut(chunk).code = "new URL('unrelated.png', import.meta.url)".into();
        }
        let files = built_files(&output);

        assert_eq!(files[2].referenced_files, ["unrelated.png"]);
    }

    #[test]
    fn test_asset_name_inside_other_names_is_not_referenced() {
        let mut output = bundle();
        output.push(asset("a.css", None));
        if let Output::Chunk(chunk) = &mut output[2] {
            Arc::make_mut(chunk).code = "import './data.css'; import './theme-a.css';\n\
                 //# sourceMappingURL=/x/a.css.map"
                .into();
        }
        let files = built_files(&output);

        assert!(files[2].referenced_files.is_empty());
    }

    #[test]
    fn test_mentions_requires_path_boundaries() {
        assert!(mentions("import './a.css';", "a.css"));
        assert!(mentions("new URL(\"a.css\", import.meta.url)", "a.css"));
        assert!(mentions("fetch(`/assets/a.css?v=1`)", "a.css"));
        assert!(!mentions("import './data.css';", "a.css"));
        assert!(!mentions("'theme-a.css'", "a.css"));
        assert!(!mentions("'/x/a.css.map'", "a.css"));
        assert!(!mentions("anything", ""));
    }

    #[test]
    fn test_only_js_chunks_are_converted() {
        let mut output = bundle();
        output.push(chunk("worker.mjs", Some("src/worker.js"), true, &[]));
        let files = built_files(&output);

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|file| file.file_name.ends_with(".js")));
    }

    #[test]
    fn test_process_bundle_emits_manifest_asset() {
        let mut output = bundle();
        let manifest = process_bundle(&plugin().manifest, &mut output).unwrap();

        assert_eq!(manifest.routes(), ["/", "*"]);
        let Some(Output::Asset(emitted)) = output.last() else {
            panic!("expected emitted manifest asset");
        };
        assert_eq!(emitted.filename.as_str(), "rmanifest.json");

        let StrOrBytes::Str(source) = &emitted.source else {
            panic!("expected string source");
        };
        let json: serde_json::Value = serde_json::from_str(source).unwrap();
        assert_eq!(json["/"][0]["href"], "/home.js");
        assert_eq!(json["/"][3]["href"], "/home.css");
    }

    #[test]
    fn test_inline_rewrites_last_static_entry() {
        let plugin = FobRouteManifestPlugin::new(
            RouteManifestOptions::new()
                .routes_map([("src/routes/home.js", "/")])
                .inline(true)
                .without_filename(),
        )
        .unwrap();
        let mut output = bundle();
        process_bundle(&plugin.manifest, &mut output).unwrap();

        let Output::Chunk(entry) = &output[0] else {
            panic!("expected entry chunk");
        };
        assert!(entry.code.starts_with("window.__rmanifest={\"/\":"));
        assert!(entry.code.ends_with("/* index.js */"));

        let Output::Chunk(home) = &output[1] else {
            panic!("expected route chunk");
        };
        assert_eq!(home.code, "/* home.js */");
        assert_eq!(output.len(), 5);
    }
}
