//! Target registry: the single table mapping target identifiers to emitters.

use crate::error::{CodegenError, Result};
use crate::generators::{Emitter, LayoutMode, TargetInfo, Tooling};
use indexmap::IndexMap;
use serde::Serialize;

/// Registry of target emitters.
///
/// Built once at startup and then only read, so a shared reference can be
/// handed to any number of concurrent generation runs.
pub struct TargetRegistry {
    emitters: IndexMap<&'static str, Box<dyn Emitter>>,
}

/// One row of `list-targets` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSummary {
    pub name: &'static str,
    pub framework: &'static str,
    pub layout: LayoutMode,
    /// Whether the target offers optional tooling. Tooling is never required.
    pub tooling_optional: bool,
    pub tooling: String,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            emitters: IndexMap::new(),
        }
    }

    /// Create a registry with every emitter compiled into this build.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "web")]
        registry.register(crate::generators::WebEmitter::new());

        #[cfg(feature = "react")]
        registry.register(crate::generators::ReactEmitter::new());

        #[cfg(feature = "flutter")]
        registry.register(crate::generators::FlutterEmitter::new());

        registry
    }

    /// Register an emitter under its target name.
    ///
    /// # Panics
    ///
    /// Panics if the name is already taken. Registration happens while the
    /// registry is being built, so a collision is a programming error.
    pub fn register<E: Emitter + 'static>(&mut self, emitter: E) {
        let name = emitter.info().name;
        assert!(
            !self.emitters.contains_key(name),
            "target '{}' registered twice",
            name
        );
        self.emitters.insert(name, Box::new(emitter));
        self.emitters.sort_keys();
    }

    /// Look up an emitter. Names are matched exactly, case included.
    pub fn resolve(&self, target: &str) -> Result<&dyn Emitter> {
        self.emitters
            .get(target)
            .map(|e| e.as_ref())
            .ok_or_else(|| CodegenError::UnsupportedTarget {
                requested: target.to_string(),
                available: self.targets().map(str::to_string).collect(),
            })
    }

    /// Registered target names in sorted order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.emitters.keys().copied()
    }

    /// Static descriptions in sorted order.
    pub fn infos(&self) -> impl Iterator<Item = &TargetInfo> {
        self.emitters.values().map(|e| e.info())
    }

    /// Capability summary for each target, sorted by name.
    pub fn describe(&self) -> Vec<TargetSummary> {
        self.infos()
            .map(|info| TargetSummary {
                name: info.name,
                framework: info.framework,
                layout: info.layout,
                tooling_optional: matches!(info.tooling, Tooling::Optional { .. }),
                tooling: info.tooling.describe(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }
}
