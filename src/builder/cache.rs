use std::sync::OnceLock;

use super::template::SymbolTemplate;
use crate::common::metadata::Version;

/// Holds one structural template per version, built on first use.
pub struct TemplateCache {
    slots: [OnceLock<SymbolTemplate>; 40],
}

impl TemplateCache {
    pub const fn new() -> Self {
        Self { slots: [const { OnceLock::new() }; 40] }
    }

    /// Process wide cache used by the builder.
    pub fn global() -> &'static TemplateCache {
        static CACHE: TemplateCache = TemplateCache::new();
        &CACHE
    }

    /// Returns an owned copy of the template for `version`. The cached entry is
    /// never handed out mutably.
    pub fn get(&self, version: Version) -> SymbolTemplate {
        self.slots[version.index()].get_or_init(|| SymbolTemplate::new(version)).clone()
    }

    pub fn is_cached(&self, version: Version) -> bool {
        self.slots[version.index()].get().is_some()
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}
