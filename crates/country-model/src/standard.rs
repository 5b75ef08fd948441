//! Standard descriptors and the keys used to look them up.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ModelError, Result};

/// Metadata describing one country code standard, such as FIPS 10-4.
///
/// Two descriptors are the same standard when their name and version match
/// exactly; the publish date and format names do not take part in equality,
/// hashing or ordering.
#[derive(Debug, Clone, Serialize)]
pub struct StandardInfo {
    name: String,
    version: Option<String>,
    published: NaiveDate,
    format_names: BTreeSet<String>,
}

impl StandardInfo {
    /// Create a descriptor. An empty `version` is treated as unversioned.
    pub fn new<I, S>(
        name: impl Into<String>,
        version: Option<&str>,
        published: NaiveDate,
        format_names: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyStandardName);
        }
        let version = version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(Self {
            name,
            version,
            published,
            format_names: format_names.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version of the standard, `None` when the standard is unversioned.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn published(&self) -> NaiveDate {
        self.published
    }

    /// Formats every entry of this standard may carry (e.g. "alpha2", "numeric").
    pub fn format_names(&self) -> &BTreeSet<String> {
        &self.format_names
    }

    pub fn supports_format(&self, format: &str) -> bool {
        self.format_names.contains(format)
    }

    /// Whether `name` and `version` identify this standard.
    pub fn is(&self, name: &str, version: Option<&str>) -> bool {
        self.name == name && self.version.as_deref() == version
    }
}

impl PartialEq for StandardInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Eq for StandardInfo {}

impl Hash for StandardInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
    }
}

impl PartialOrd for StandardInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StandardInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl fmt::Display for StandardInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{version}", self.name),
            None => write!(f, "{}:", self.name),
        }
    }
}

/// Which version of a named standard a [`StandardKey`] asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpec {
    /// The most recently published standard with the name.
    Latest,
    /// The standard registered without a version.
    Unversioned,
    /// The standard with exactly this version.
    Exact(String),
}

/// A textual reference to a standard: `NAME`, `NAME:` or `NAME:VERSION`.
///
/// # Example
///
/// ```
/// use country_model::{StandardKey, VersionSpec};
///
/// let key: StandardKey = "ISO:2020".parse().unwrap();
/// assert_eq!(key.name, "ISO");
/// assert_eq!(key.version, VersionSpec::Exact("2020".to_string()));
///
/// let latest: StandardKey = "GENC".parse().unwrap();
/// assert_eq!(latest.version, VersionSpec::Latest);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StandardKey {
    pub name: String,
    pub version: VersionSpec,
}

impl StandardKey {
    /// Key for an exact name and version.
    pub fn exact(name: impl Into<String>, version: Option<&str>) -> Self {
        let version = match version {
            Some(v) => VersionSpec::Exact(v.to_string()),
            None => VersionSpec::Unversioned,
        };
        Self {
            name: name.into(),
            version,
        }
    }

    /// Whether `info` satisfies this key, ignoring which of several
    /// candidates is the latest.
    pub fn matches(&self, info: &StandardInfo) -> bool {
        if info.name() != self.name {
            return false;
        }
        match &self.version {
            VersionSpec::Latest => true,
            VersionSpec::Unversioned => info.version().is_none(),
            VersionSpec::Exact(v) => info.version() == Some(v.as_str()),
        }
    }
}

impl FromStr for StandardKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ModelError::InvalidStandardKey(s.to_string());
        let trimmed = s.trim();
        let (name, version) = match trimmed.split_once(':') {
            None => (trimmed, VersionSpec::Latest),
            Some((_, rest)) if rest.contains(':') => return Err(invalid()),
            Some((name, rest)) => {
                let rest = rest.trim();
                let version = if rest.is_empty() {
                    VersionSpec::Unversioned
                } else {
                    VersionSpec::Exact(rest.to_string())
                };
                (name.trim(), version)
            }
        };
        if name.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

impl fmt::Display for StandardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            VersionSpec::Latest => f.write_str(&self.name),
            VersionSpec::Unversioned => write!(f, "{}:", self.name),
            VersionSpec::Exact(v) => write!(f, "{}:{v}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn equality_ignores_date_and_formats() {
        let a = StandardInfo::new("ISO", Some("2020"), date(2020, 1, 1), ["alpha2"]).unwrap();
        let b = StandardInfo::new("ISO", Some("2020"), date(2021, 6, 1), ["alpha3"]).unwrap();
        let c = StandardInfo::new("ISO", Some("2013"), date(2020, 1, 1), ["alpha2"]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_is_case_sensitive() {
        let a = StandardInfo::new("ISO", None, date(2020, 1, 1), ["alpha2"]).unwrap();
        let b = StandardInfo::new("iso", None, date(2020, 1, 1), ["alpha2"]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_version_is_unversioned() {
        let info = StandardInfo::new("GENC", Some("  "), date(2016, 3, 31), ["alpha2"]).unwrap();
        assert_eq!(info.version(), None);
        assert_eq!(info.to_string(), "GENC:");
    }

    #[test]
    fn rejects_empty_name() {
        let err = StandardInfo::new(" ", None, date(2020, 1, 1), ["alpha2"]).unwrap_err();
        assert_eq!(err, ModelError::EmptyStandardName);
    }

    #[test]
    fn key_parsing() {
        let key: StandardKey = "FIPS : 2014".parse().unwrap();
        assert_eq!(key, StandardKey::exact("FIPS", Some("2014")));

        let key: StandardKey = "FIPS:".parse().unwrap();
        assert_eq!(key.version, VersionSpec::Unversioned);

        assert!("".parse::<StandardKey>().is_err());
        assert!(":2020".parse::<StandardKey>().is_err());
        assert!("ISO:2020:extra".parse::<StandardKey>().is_err());
    }

    #[test]
    fn key_matching() {
        let iso = StandardInfo::new("ISO", Some("2020"), date(2020, 1, 1), ["alpha2"]).unwrap();
        assert!("ISO".parse::<StandardKey>().unwrap().matches(&iso));
        assert!("ISO:2020".parse::<StandardKey>().unwrap().matches(&iso));
        assert!(!"ISO:".parse::<StandardKey>().unwrap().matches(&iso));
        assert!(!"FIPS".parse::<StandardKey>().unwrap().matches(&iso));
    }
}
