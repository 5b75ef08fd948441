//! Registry of country code standards.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use country_model::{StandardInfo, StandardKey, VersionSpec};

use crate::error::{Result, StandardsError};
use crate::fips::Fips104Standard;
use crate::genc::GencStandard;
use crate::iso::Iso3166Standard;
use crate::traits::Standard;

/// Standards known to the process, keyed by name and version.
///
/// A registry is built once and then only read, so it can be shared freely
/// between threads. Name-only lookups that match several versions resolve to
/// the most recently published one.
#[derive(Debug, Default)]
pub struct StandardRegistry {
    standards: BTreeMap<Arc<StandardInfo>, Box<dyn Standard>>,
}

impl StandardRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled ISO 3166-1, FIPS 10-4 and GENC standards.
    ///
    /// Entries are parsed lazily on first use.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Iso3166Standard::embedded()?)?;
        registry.register(Fips104Standard::embedded()?)?;
        registry.register(GencStandard::embedded()?)?;
        Ok(registry)
    }

    /// Bundled standards with every entry set parsed up front.
    pub fn load_all() -> Result<Self> {
        let registry = Self::builtin()?;
        for (info, standard) in &registry.standards {
            let entries = standard.entries()?;
            tracing::debug!(standard = %info, entries = entries.len(), "standard loaded");
        }
        Ok(registry)
    }

    /// Add a standard. Fails if one with the same name and version exists.
    pub fn register(&mut self, standard: impl Standard + 'static) -> Result<()> {
        let info = Arc::clone(standard.info());
        if self.standards.contains_key(&info) {
            return Err(StandardsError::DuplicateStandard {
                standard: info.to_string(),
            });
        }
        self.standards.insert(info, Box::new(standard));
        Ok(())
    }

    /// Most recently published standard named `name`.
    pub fn lookup(&self, name: &str) -> Option<&Arc<StandardInfo>> {
        latest(self.named(name))
    }

    /// Standard with exactly `name` and `version` (`None` for unversioned).
    pub fn lookup_version(&self, name: &str, version: Option<&str>) -> Option<&Arc<StandardInfo>> {
        self.standards.keys().find(|info| info.is(name, version))
    }

    /// Standard named `name` published on `date`.
    pub fn lookup_published(&self, name: &str, date: NaiveDate) -> Option<&Arc<StandardInfo>> {
        latest(self.named(name).filter(|info| info.published() == date))
    }

    /// Latest standard named `name` published strictly before `date`.
    pub fn lookup_before(&self, name: &str, date: NaiveDate) -> Option<&Arc<StandardInfo>> {
        latest(self.named(name).filter(|info| info.published() < date))
    }

    /// Latest standard named `name` published strictly after `date`.
    pub fn lookup_after(&self, name: &str, date: NaiveDate) -> Option<&Arc<StandardInfo>> {
        latest(self.named(name).filter(|info| info.published() > date))
    }

    /// Latest standard named `name` published within `start..=end`.
    pub fn lookup_between(
        &self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<&Arc<StandardInfo>> {
        latest(
            self.named(name)
                .filter(|info| (start..=end).contains(&info.published())),
        )
    }

    /// Resolve a parsed `NAME`, `NAME:` or `NAME:VERSION` key.
    pub fn lookup_key(&self, key: &StandardKey) -> Option<&Arc<StandardInfo>> {
        match &key.version {
            VersionSpec::Latest => self.lookup(&key.name),
            VersionSpec::Unversioned => self.lookup_version(&key.name, None),
            VersionSpec::Exact(version) => self.lookup_version(&key.name, Some(version)),
        }
    }

    /// Provider registered for `info`.
    pub fn resolve(&self, info: &StandardInfo) -> Result<&dyn Standard> {
        self.standards
            .get(info)
            .map(Box::as_ref)
            .ok_or_else(|| StandardsError::StandardNotFound {
                standard: info.to_string(),
            })
    }

    /// All registered standards ordered by name, then version.
    pub fn registered_standards(&self) -> impl Iterator<Item = &Arc<StandardInfo>> {
        self.standards.keys()
    }

    pub fn len(&self) -> usize {
        self.standards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standards.is_empty()
    }

    fn named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Arc<StandardInfo>> {
        self.standards.keys().filter(move |info| info.name() == name)
    }
}

fn latest<'a>(
    candidates: impl Iterator<Item = &'a Arc<StandardInfo>>,
) -> Option<&'a Arc<StandardInfo>> {
    candidates.max_by(|a, b| {
        a.published()
            .cmp(&b.published())
            .then_with(|| a.cmp(b))
    })
}
