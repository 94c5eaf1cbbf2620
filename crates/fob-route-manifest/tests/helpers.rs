//! Shared fixture for the manifest integration tests
//!
//! A small app build: one main entry (`src/index.js`, routed to `*`), four
//! route entries, shared chunks and per-route stylesheets.

#![allow(dead_code)]

use fob_route_manifest::{BuiltFile, Manifest, MemorySink, RouteManifestOptions};
use serde_json::{json, Value};

pub const MAIN_ENTRY: &str = "index.1c5aebde.js";
pub const MAIN_CODE: &str = "console.log('ello')";

/// Bundle snapshot in bundler emission order
pub fn fixture() -> Vec<BuiltFile> {
    vec![
        BuiltFile::new(MAIN_ENTRY)
            .entry(true)
            .facade("src/index.js")
            .reference("index.4f1c8549.css"),
        BuiltFile::new("index.f6c1450e.js")
            .entry(true)
            .facade("src/routes/error.js")
            .import(MAIN_ENTRY)
            .import("index.daf64d39.js")
            .reference("r.error.08ca7a60.css"),
        BuiltFile::new("index.b0b86791.js")
            .entry(true)
            .facade("src/routes/home.js")
            .import(MAIN_ENTRY)
            .import("index.daf64d39.js")
            .import("format.ed6aedc1.js")
            .import("form.64be9112.js")
            .reference("r.home.2d12cbd5.css"),
        BuiltFile::new("index.daf64d39.js").import(MAIN_ENTRY),
        BuiltFile::new("format.ed6aedc1.js"),
        BuiltFile::new("form.64be9112.js").import("format.ed6aedc1.js"),
        BuiltFile::new("index.97759469.js")
            .entry(true)
            .facade("src/routes/search.js")
            .import(MAIN_ENTRY)
            .import("index.daf64d39.js")
            .import("format.ed6aedc1.js")
            .import("form.64be9112.js")
            .import("index.4d89a60f.js")
            .import("icons.ebab2333.js")
            .reference("r.search.6cdea0b8.css"),
        BuiltFile::new("index.4d89a60f.js"),
        BuiltFile::new("icons.ebab2333.js"),
        BuiltFile::new("index.5c6634f2.js")
            .entry(true)
            .facade("src/routes/article.js")
            .import(MAIN_ENTRY)
            .import("index.daf64d39.js")
            .import("format.ed6aedc1.js")
            .import("index.4d89a60f.js")
            .import("icons.ebab2333.js")
            .reference("r.job.6b12277a.css")
            .reference("index.4f1c8549.css"),
        BuiltFile::new("index.4f1c8549.css"),
        BuiltFile::new("r.error.08ca7a60.css"),
        BuiltFile::new("r.home.2d12cbd5.css"),
        BuiltFile::new("r.search.6cdea0b8.css"),
        BuiltFile::new("r.job.6b12277a.css"),
    ]
}

/// Route rule used by most tests: everything outside `src/routes` is shared
pub fn default_routes(file: &str) -> Option<String> {
    if !file.contains("src/routes") {
        return Some("*".to_string());
    }
    let name = file.replace("src/routes", "").replace(".js", "");
    let pattern = match name.as_str() {
        "/article" => "/:slug",
        "/home" => "/",
        other => other,
    };
    Some(pattern.to_string())
}

pub fn options() -> RouteManifestOptions {
    RouteManifestOptions::new().routes_fn(default_routes)
}

/// Run `options` over the fixture; returns the manifest and the sink
pub fn run(options: RouteManifestOptions) -> (Manifest, MemorySink) {
    let generator = options.build().expect("options should build");
    let mut sink = MemorySink::with_main_entry(MAIN_CODE);
    let manifest = generator
        .generate(&fixture(), &mut sink)
        .expect("manifest should generate");
    (manifest, sink)
}

/// Parse the single emitted manifest artifact
pub fn parse_emitted(sink: &MemorySink) -> Value {
    assert_eq!(sink.emitted.len(), 1, "~> emits 1 file");
    serde_json::from_str(&sink.emitted[0].source).expect("emitted manifest is JSON")
}

pub fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .expect("manifest is an object")
        .keys()
        .cloned()
        .collect()
}

fn script(name: &str) -> Value {
    json!({ "type": "script", "href": format!("/{name}") })
}

fn style(name: &str) -> Value {
    json!({ "type": "style", "href": format!("/{name}") })
}

/// Expected asset list of each route with default options
pub fn expected_files(route: &str) -> Value {
    let list = match route {
        "/error" => vec![
            script("index.f6c1450e.js"),
            script("index.1c5aebde.js"),
            script("index.daf64d39.js"),
            style("r.error.08ca7a60.css"),
        ],
        "/" => vec![
            script("index.b0b86791.js"),
            script("index.1c5aebde.js"),
            script("index.daf64d39.js"),
            script("format.ed6aedc1.js"),
            script("form.64be9112.js"),
            style("r.home.2d12cbd5.css"),
        ],
        "/search" => vec![
            script("index.97759469.js"),
            script("index.1c5aebde.js"),
            script("index.daf64d39.js"),
            script("format.ed6aedc1.js"),
            script("form.64be9112.js"),
            script("index.4d89a60f.js"),
            script("icons.ebab2333.js"),
            style("r.search.6cdea0b8.css"),
        ],
        "/:slug" => vec![
            script("index.5c6634f2.js"),
            script("index.1c5aebde.js"),
            script("index.daf64d39.js"),
            script("format.ed6aedc1.js"),
            script("index.4d89a60f.js"),
            script("icons.ebab2333.js"),
            style("r.job.6b12277a.css"),
            style("index.4f1c8549.css"),
        ],
        "*" => vec![script("index.1c5aebde.js"), style("index.4f1c8549.css")],
        other => panic!("no expected files for {other}"),
    };
    Value::Array(list)
}

/// Expected manifest object for the given routes, in that order
pub fn expected_manifest(routes: &[&str]) -> Value {
    let mut map = serde_json::Map::new();
    for route in routes {
        map.insert(route.to_string(), expected_files(route));
    }
    Value::Object(map)
}
