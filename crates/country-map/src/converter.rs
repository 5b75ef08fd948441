//! Conversion of country code values between standards.

use std::collections::BTreeSet;
use std::sync::Arc;

use country_model::{CodeSet, StandardInfo, StandardKey};
use country_standards::StandardRegistry;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, MappingError, Result};
use crate::index::MappingIndex;
use crate::table::{LoadReport, load_table};

/// Converts code values from one standard to another using a mapping table.
///
/// # Example
///
/// ```
/// use country_map::CountryCodeConverter;
/// use country_standards::StandardRegistry;
///
/// let registry = StandardRegistry::builtin().unwrap();
/// let converter = CountryCodeConverter::with_defaults(&registry).unwrap();
///
/// let iso = registry.lookup("ISO").unwrap();
/// let fips = registry.lookup("FIPS").unwrap();
/// let codes = converter.convert("AFG", iso, fips).unwrap();
/// assert_eq!(codes.len(), 1);
/// assert!(converter.convert("ZZZ", iso, fips).unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CountryCodeConverter {
    index: MappingIndex,
    default_standard: Arc<StandardInfo>,
    report: LoadReport,
}

impl CountryCodeConverter {
    /// Converter over the embedded table with ISO 3166-1 as default standard.
    pub fn with_defaults(registry: &StandardRegistry) -> Result<Self> {
        Self::from_config(&ConverterConfig::default(), registry)
    }

    /// Load the configured table and resolve the default standard.
    ///
    /// # Errors
    ///
    /// Fails if the table cannot be read or loaded, or if the default
    /// standard is unknown to `registry` or not mapped by the table.
    pub fn from_config(config: &ConverterConfig, registry: &StandardRegistry) -> Result<Self> {
        let name = config.mappings.name();
        let content = config.mappings.read()?;
        let (table, report) = load_table(&name, &content, registry, config.header_mode)?;
        let index = MappingIndex::new(table);

        let default_standard = registry
            .lookup_key(&config.default_standard)
            .cloned()
            .ok_or_else(|| MappingError::UnknownDefault {
                standard: config.default_standard.to_string(),
            })?;
        if !index.is_mapped(&default_standard) {
            return Err(MappingError::DefaultNotMapped {
                standard: default_standard.to_string(),
                table: name.into_owned(),
            });
        }

        Ok(Self {
            index,
            default_standard,
            report,
        })
    }

    /// Entries of `to` corresponding to `value` in `from`.
    ///
    /// When `from` and `to` are the same standard, every entry of that
    /// standard carrying `value` in any format is returned, regardless of
    /// the table's join fields.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnsupportedStandard`] if either standard is not mapped.
    /// A value without a mapping is not an error and yields an empty set.
    pub fn convert(
        &self,
        value: &str,
        from: &StandardInfo,
        to: &StandardInfo,
    ) -> std::result::Result<CodeSet, ConvertError> {
        self.ensure_supported(from)?;
        self.ensure_supported(to)?;

        if from == to {
            return Ok(self.index.entries_with_value(from, value));
        }
        Ok(self
            .index
            .lookup(from, value)
            .into_iter()
            .filter(|code| code.belongs_to(to))
            .collect())
    }

    pub fn to_default_standard(
        &self,
        value: &str,
        from: &StandardInfo,
    ) -> std::result::Result<CodeSet, ConvertError> {
        self.convert(value, from, &self.default_standard)
    }

    pub fn from_default_standard(
        &self,
        value: &str,
        to: &StandardInfo,
    ) -> std::result::Result<CodeSet, ConvertError> {
        self.convert(value, &self.default_standard, to)
    }

    /// Mapped standard matching `key`; a bare name picks the latest published.
    pub fn standard(&self, key: &StandardKey) -> std::result::Result<Arc<StandardInfo>, ConvertError> {
        self.supported_standards()
            .into_iter()
            .filter(|info| key.matches(info))
            .max_by(|a, b| a.published().cmp(&b.published()).then_with(|| a.cmp(b)))
            .ok_or_else(|| ConvertError::UnsupportedStandard {
                standard: key.to_string(),
            })
    }

    pub fn supported_standards(&self) -> BTreeSet<Arc<StandardInfo>> {
        self.index.mapped_standards()
    }

    pub fn default_standard(&self) -> &Arc<StandardInfo> {
        &self.default_standard
    }

    /// Rows rejected and columns dropped while loading the table.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn index(&self) -> &MappingIndex {
        &self.index
    }

    fn ensure_supported(&self, standard: &StandardInfo) -> std::result::Result<(), ConvertError> {
        if self.index.is_mapped(standard) {
            Ok(())
        } else {
            Err(ConvertError::UnsupportedStandard {
                standard: standard.to_string(),
            })
        }
    }
}
