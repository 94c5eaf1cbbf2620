//! Uniform "mapping or callback" lookups.
//!
//! Route and asset rules may be configured either as a literal mapping or as
//! a function. Both are resolved once, at configuration time, into a
//! [`Lookup`] so the pipeline never branches on the configured shape.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

type LookupFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// A key -> label rule, where an absent or empty label means "no match".
#[derive(Clone)]
pub struct Lookup {
    inner: Arc<LookupFn>,
}

impl Lookup {
    /// Literal lookup over an immutable mapping; missing keys are no match.
    pub fn from_map<K, V>(map: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map: IndexMap<String, String> = map
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            inner: Arc::new(move |key| map.get(key).cloned()),
        }
    }

    /// Rule backed by a caller-supplied function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Resolve `key`, treating an empty label the same as no label.
    pub fn get(&self, key: &str) -> Option<String> {
        (self.inner)(key).filter(|label| !label.is_empty())
    }
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lookup(..)")
    }
}
