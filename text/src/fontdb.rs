//! Process-wide registry of font metrics, keyed by font name.
//!
//! The registry is created on first use with the built-in [`Helvetica`]
//! metrics registered under [`DEFAULT_FONT_NAME`]. Registration takes the
//! write lock; lookups only read.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use statplot_base::font::DEFAULT_FONT_NAME;

use crate::metrics::{Helvetica, Metrics};
use crate::ttf_metrics::TtfMetrics;
use crate::Error;

type Registry = RwLock<HashMap<String, Arc<dyn Metrics>>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let mut map: HashMap<String, Arc<dyn Metrics>> = HashMap::new();
        map.insert(DEFAULT_FONT_NAME.to_string(), Arc::new(Helvetica));
        RwLock::new(map)
    })
}

/// Register (or replace) the metrics used for `name`
pub fn register(name: impl Into<String>, metrics: Arc<dyn Metrics>) {
    let mut map = registry().write().unwrap_or_else(|e| e.into_inner());
    map.insert(name.into(), metrics);
}

/// Parse a TrueType/OpenType face and register it under `name`
pub fn register_ttf(name: impl Into<String>, data: Vec<u8>) -> Result<(), Error> {
    let metrics = TtfMetrics::from_data(data, 0)?;
    register(name, Arc::new(metrics));
    Ok(())
}

/// The metrics registered for `name`, if any
pub fn lookup(name: &str) -> Option<Arc<dyn Metrics>> {
    let map = registry().read().unwrap_or_else(|e| e.into_inner());
    map.get(name).cloned()
}

/// The metrics registered for `name`, falling back to the default font
pub fn metrics(name: &str) -> Arc<dyn Metrics> {
    if let Some(m) = lookup(name) {
        return m;
    }
    log::debug!("no font registered as {:?}, using {}", name, DEFAULT_FONT_NAME);
    lookup(DEFAULT_FONT_NAME).unwrap_or_else(|| Arc::new(Helvetica))
}

/// Names of all registered fonts, sorted
pub fn names() -> Vec<String> {
    let map = registry().read().unwrap_or_else(|e| e.into_inner());
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}
