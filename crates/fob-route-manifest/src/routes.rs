//! Route classification, dependency aggregation and the global merge step.

use indexmap::{IndexMap, IndexSet};

use crate::bundle::BuiltFile;
use crate::lookup::Lookup;

/// Route pattern reserved for files shared by every route.
pub const SHARED_ROUTE: &str = "*";

/// Route pattern -> deduplicated file names, both in first-seen order.
pub type RouteFileSet = IndexMap<String, IndexSet<String>>;

/// Group the files of a bundle snapshot by route.
///
/// Only entry points are classified. Each classified entry contributes itself,
/// its static imports and its referenced files to its route's set; entries
/// sharing a pattern accumulate into one set. Routes without files never
/// appear.
pub fn aggregate<'a>(
    files: impl IntoIterator<Item = &'a BuiltFile>,
    routes: &Lookup,
) -> RouteFileSet {
    let mut pages = RouteFileSet::default();

    for file in files {
        if !file.is_entry_point {
            continue;
        }

        let Some(pattern) = routes.get(file.route_key()) else {
            tracing::trace!("[route-manifest] no route for {}", file.route_key());
            continue;
        };

        let set = pages.entry(pattern).or_default();
        for dependency in file.dependencies() {
            if !set.contains(dependency) {
                set.insert(dependency.to_string());
            }
        }
    }

    pages
}

/// Broadcast the shared route's files into every other route, then drop it.
///
/// Files already owned by a route keep their position; shared files are
/// appended after them. A no-op when there is no shared route.
pub fn merge_shared(pages: &mut RouteFileSet) {
    let Some(shared) = pages.shift_remove(SHARED_ROUTE) else {
        return;
    };

    for set in pages.values_mut() {
        for file in &shared {
            if !set.contains(file) {
                set.insert(file.clone());
            }
        }
    }
}
