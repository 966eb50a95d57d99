//! Dispatch configuration.

/// What a lookup does for a type its table does not cover.
///
/// A type is covered when it is the table's root object type or derives
/// from it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CoveragePolicy {
    /// Fail with [`DispatchError::UnsupportedType`](crate::DispatchError).
    #[default]
    Strict,

    /// Return whatever the slot holds, or [`Behavior::Default`](crate::Behavior)
    /// past the end of the table.
    Lenient,
}

impl CoveragePolicy {
    /// Parse `strict` / `lenient` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "lenient" => Some(Self::Lenient),
            _ => None,
        }
    }
}

/// Settings shared by every table of one [`DispatchTables`](crate::DispatchTables).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Policy for uncovered lookups.
    pub coverage: CoveragePolicy,
}

impl DispatchConfig {
    /// Environment variable selecting the [`CoveragePolicy`].
    pub const COVERAGE_ENV: &'static str = "SCN_DISPATCH_COVERAGE";

    /// Read overrides from the process environment.
    ///
    /// Unset or unrecognized values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup(Self::COVERAGE_ENV) {
            match CoveragePolicy::from_name(&value) {
                Some(coverage) => config.coverage = coverage,
                None => tracing::warn!(
                    value = %value,
                    var = Self::COVERAGE_ENV,
                    "unrecognized coverage policy, keeping default"
                ),
            }
        }
        config
    }

    /// Replace the coverage policy.
    #[must_use]
    pub fn with_coverage(mut self, coverage: CoveragePolicy) -> Self {
        self.coverage = coverage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        assert_eq!(DispatchConfig::default().coverage, CoveragePolicy::Strict);
    }

    #[test]
    fn policy_names() {
        assert_eq!(CoveragePolicy::from_name("strict"), Some(CoveragePolicy::Strict));
        assert_eq!(CoveragePolicy::from_name(" Lenient "), Some(CoveragePolicy::Lenient));
        assert_eq!(CoveragePolicy::from_name("loose"), None);
    }

    #[test]
    fn lookup_overrides_coverage() {
        let config = DispatchConfig::from_lookup(|key| {
            (key == DispatchConfig::COVERAGE_ENV).then(|| "lenient".to_owned())
        });
        assert_eq!(config.coverage, CoveragePolicy::Lenient);
    }

    #[test]
    fn bad_value_keeps_default() {
        let config = DispatchConfig::from_lookup(|_| Some("sometimes".to_owned()));
        assert_eq!(config, DispatchConfig::default());

        let config = DispatchConfig::from_lookup(|_| None);
        assert_eq!(config, DispatchConfig::default());
    }

    #[test]
    fn with_coverage_replaces_policy() {
        let config = DispatchConfig::default().with_coverage(CoveragePolicy::Lenient);
        assert_eq!(config.coverage, CoveragePolicy::Lenient);
    }
}
