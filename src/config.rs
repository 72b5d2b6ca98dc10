//! Configuration for the pager: chunking policy, grouping and retention

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::chunker::{ChunkPolicy, DEFAULT_MAX_LINES, DEFAULT_MAX_PAGES};
use crate::extract::ArchiveLimits;
use crate::registry::RetentionPolicy;
use crate::series::{DEFAULT_PAGES_PER_SERIES, OrdinalLocale};

pub const ENV_POLICY: &str = "DOCPAGER_POLICY";
pub const ENV_CHUNK_SIZE: &str = "DOCPAGER_CHUNK_SIZE";
pub const ENV_MAX_LINES: &str = "DOCPAGER_MAX_LINES";
pub const ENV_MAX_PAGES: &str = "DOCPAGER_MAX_PAGES";
pub const ENV_PAGES_PER_SERIES: &str = "DOCPAGER_PAGES_PER_SERIES";
pub const ENV_LOCALE: &str = "DOCPAGER_LOCALE";
pub const ENV_RETENTION: &str = "DOCPAGER_RETENTION";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, value: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    pub policy: ChunkPolicy,
    pub pages_per_series: usize,
    pub locale: OrdinalLocale,
    pub retention: RetentionPolicy,
    pub limits: ArchiveLimits,
}

impl Default for PagerConfig {
    fn default() -> Self {
        PagerConfig {
            policy: ChunkPolicy::default(),
            pages_per_series: DEFAULT_PAGES_PER_SERIES,
            locale: OrdinalLocale::default(),
            retention: RetentionPolicy::default(),
            limits: ArchiveLimits::default(),
        }
    }
}

impl PagerConfig {
    /// Load from `DOCPAGER_*` environment variables, reading `.env` first if present.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, using the `DOCPAGER_*` key names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PagerConfig::default();

        let overrides = PolicyOverrides {
            kind: lookup(ENV_POLICY),
            chunk_size: parse_var(&lookup, ENV_CHUNK_SIZE)?,
            max_lines: parse_var(&lookup, ENV_MAX_LINES)?,
            max_pages: parse_var(&lookup, ENV_MAX_PAGES)?,
        };

        let config = PagerConfig {
            policy: overrides.apply(defaults.policy)?,
            pages_per_series: parse_var(&lookup, ENV_PAGES_PER_SERIES)?
                .unwrap_or(defaults.pages_per_series),
            locale: parse_var(&lookup, ENV_LOCALE)?.unwrap_or(defaults.locale),
            retention: parse_var(&lookup, ENV_RETENTION)?.unwrap_or(defaults.retention),
            limits: defaults.limits,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make pagination meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(limit) = self.policy.zero_limit() {
            return Err(ConfigError::ZeroLimit(limit));
        }
        if self.pages_per_series == 0 {
            return Err(ConfigError::ZeroLimit("pages_per_series"));
        }
        if self.limits.max_entry_size == 0 {
            return Err(ConfigError::ZeroLimit("max_entry_size"));
        }
        if self.limits.max_total_size == 0 {
            return Err(ConfigError::ZeroLimit("max_total_size"));
        }
        Ok(())
    }
}

/// Policy settings given piecemeal, e.g. by environment or command line.
///
/// Unset fields keep whatever the base policy has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    /// `fixed`, `sentence`, `hybrid` or `lines`
    pub kind: Option<String>,
    pub chunk_size: Option<usize>,
    pub max_lines: Option<usize>,
    pub max_pages: Option<usize>,
}

impl PolicyOverrides {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.chunk_size.is_none()
            && self.max_lines.is_none()
            && self.max_pages.is_none()
    }

    /// Layer these settings over `base`
    pub fn apply(&self, base: ChunkPolicy) -> Result<ChunkPolicy, ConfigError> {
        let (mut chunk_size, mut max_lines, mut max_pages) = match base {
            ChunkPolicy::FixedWidth { chunk_size } | ChunkPolicy::Sentence { chunk_size } => {
                (chunk_size, DEFAULT_MAX_LINES, DEFAULT_MAX_PAGES)
            }
            ChunkPolicy::Hybrid {
                chunk_size,
                max_pages,
            } => (chunk_size, DEFAULT_MAX_LINES, max_pages),
            ChunkPolicy::LineBounded {
                max_lines,
                max_chars,
            } => (max_chars, max_lines, DEFAULT_MAX_PAGES),
        };

        chunk_size = self.chunk_size.unwrap_or(chunk_size);
        max_lines = self.max_lines.unwrap_or(max_lines);
        max_pages = self.max_pages.unwrap_or(max_pages);

        let kind = self.kind.as_deref().unwrap_or(base.name());
        match kind.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(ChunkPolicy::FixedWidth { chunk_size }),
            "sentence" => Ok(ChunkPolicy::Sentence { chunk_size }),
            "hybrid" => Ok(ChunkPolicy::Hybrid {
                chunk_size,
                max_pages,
            }),
            "lines" => Ok(ChunkPolicy::LineBounded {
                max_lines,
                max_chars: chunk_size,
            }),
            _ => Err(ConfigError::invalid(
                "policy",
                kind,
                "expected fixed, sentence, hybrid or lines",
            )),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::invalid(key, &raw, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_vars() {
        let config = PagerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, PagerConfig::default());
        assert_eq!(
            config.policy,
            ChunkPolicy::Hybrid {
                chunk_size: 220,
                max_pages: 10
            }
        );
        assert_eq!(config.pages_per_series, 10);
        assert_eq!(config.locale, OrdinalLocale::Korean);
        assert_eq!(config.retention, RetentionPolicy::Replace);
    }

    #[test]
    fn test_vars_override_defaults() {
        let config = PagerConfig::from_lookup(lookup_from(&[
            (ENV_POLICY, "lines"),
            (ENV_CHUNK_SIZE, "80"),
            (ENV_MAX_LINES, "4"),
            (ENV_PAGES_PER_SERIES, "3"),
            (ENV_LOCALE, "en"),
            (ENV_RETENTION, "accumulate"),
        ]))
        .unwrap();

        assert_eq!(
            config.policy,
            ChunkPolicy::LineBounded {
                max_lines: 4,
                max_chars: 80
            }
        );
        assert_eq!(config.pages_per_series, 3);
        assert_eq!(config.locale, OrdinalLocale::English);
        assert_eq!(config.retention, RetentionPolicy::Accumulate);
    }

    #[test]
    fn test_size_without_kind_keeps_default_kind() {
        let config =
            PagerConfig::from_lookup(lookup_from(&[(ENV_MAX_PAGES, "3")])).unwrap();
        assert_eq!(
            config.policy,
            ChunkPolicy::Hybrid {
                chunk_size: 220,
                max_pages: 3
            }
        );
    }

    #[test]
    fn test_blank_var_is_unset() {
        let config = PagerConfig::from_lookup(lookup_from(&[(ENV_CHUNK_SIZE, "  ")])).unwrap();
        assert_eq!(config.policy, ChunkPolicy::default());
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = PagerConfig::from_lookup(lookup_from(&[(ENV_CHUNK_SIZE, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_CHUNK_SIZE));
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let err = PagerConfig::from_lookup(lookup_from(&[(ENV_POLICY, "paragraph")])).unwrap_err();
        assert!(err.to_string().contains("paragraph"));
    }

    #[test]
    fn test_unknown_locale_is_error() {
        let result = PagerConfig::from_lookup(lookup_from(&[(ENV_LOCALE, "fr")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let err = PagerConfig::from_lookup(lookup_from(&[(ENV_CHUNK_SIZE, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroLimit("chunk_size"));

        let err =
            PagerConfig::from_lookup(lookup_from(&[(ENV_PAGES_PER_SERIES, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroLimit("pages_per_series"));

        let config = PagerConfig {
            policy: ChunkPolicy::LineBounded {
                max_lines: 0,
                max_chars: 10,
            },
            ..PagerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLimit("max_lines")));
    }

    #[test]
    fn test_overrides_switch_kind_keeping_sizes() {
        let base = ChunkPolicy::LineBounded {
            max_lines: 5,
            max_chars: 100,
        };
        let overrides = PolicyOverrides {
            kind: Some("Sentence".to_string()),
            ..Default::default()
        };

        assert_eq!(
            overrides.apply(base).unwrap(),
            ChunkPolicy::Sentence { chunk_size: 100 }
        );
    }

    #[test]
    fn test_empty_overrides_keep_base() {
        let overrides = PolicyOverrides::default();
        assert!(overrides.is_empty());

        let base = ChunkPolicy::FixedWidth { chunk_size: 42 };
        assert_eq!(overrides.apply(base).unwrap(), base);
    }

    #[test]
    fn test_config_serializes_policy() {
        let json = serde_json::to_value(PagerConfig::default()).unwrap();
        assert_eq!(json["policy"]["kind"], "hybrid");
        assert_eq!(json["locale"], "korean");
        assert_eq!(json["retention"], "replace");
    }
}
