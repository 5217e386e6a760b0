use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::SimilarityAlgo;
use crate::models::{LocationMode, MatchPolicy, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8001 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self { path: default_dataset_path() }
    }
}

fn default_dataset_path() -> String { "data/internships.csv".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
    #[serde(default = "default_skill_match_threshold")]
    pub skill_match_threshold: f64,
    #[serde(default = "default_field_threshold")]
    pub field_threshold: f64,
    #[serde(default = "default_skill_metric")]
    pub skill_metric: SimilarityAlgo,
    #[serde(default)]
    pub field_metric: SimilarityAlgo,
    #[serde(default)]
    pub location_mode: LocationMode,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
            skill_match_threshold: default_skill_match_threshold(),
            field_threshold: default_field_threshold(),
            skill_metric: default_skill_metric(),
            field_metric: SimilarityAlgo::default(),
            location_mode: LocationMode::default(),
        }
    }
}

fn default_top_n() -> usize { 5 }
fn default_max_top_n() -> usize { 20 }
fn default_skill_match_threshold() -> f64 { 0.70 }
fn default_field_threshold() -> f64 { 0.80 }
fn default_skill_metric() -> SimilarityAlgo { SimilarityAlgo::PartialLevenshtein }

impl MatchingSettings {
    pub fn to_policy(&self) -> MatchPolicy {
        MatchPolicy {
            skill_match_threshold: self.skill_match_threshold,
            field_threshold: self.field_threshold,
            skill_metric: self.skill_metric,
            field_metric: self.field_metric,
            location_mode: self.location_mode,
            default_top_n: self.default_top_n,
            max_top_n: self.max_top_n,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_field_weight")]
    pub field: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            field: default_field_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            skills: config.skills,
            field: config.field,
        }
    }
}

fn default_skills_weight() -> f64 { 0.6 }
fn default_field_weight() -> f64 { 0.4 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Output formatter for the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    Pretty,
    Compact,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INTERN_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INTERN__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("INTERN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        // DATASET_PATH wins over everything else
        if let Ok(path) = std::env::var("DATASET_PATH") {
            builder = builder.set_override("dataset.path", path)?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("INTERN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would silently empty or skew every result
    pub fn validate(&self) -> Result<(), ConfigError> {
        let matching = &self.matching;
        for (name, value) in [
            ("matching.skill_match_threshold", matching.skill_match_threshold),
            ("matching.field_threshold", matching.field_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Message(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }

        let weights = &self.scoring.weights;
        for (name, value) in [("scoring.weights.skills", weights.skills), ("scoring.weights.field", weights.field)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Message(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        if matching.max_top_n == 0 {
            return Err(ConfigError::Message("matching.max_top_n must be at least 1".to_string()));
        }
        if matching.default_top_n == 0 || matching.default_top_n > matching.max_top_n {
            return Err(ConfigError::Message(format!(
                "matching.default_top_n must be within [1, {}], got {}",
                matching.max_top_n, matching.default_top_n
            )));
        }

        Ok(())
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    pub fn policy(&self) -> MatchPolicy {
        self.matching.to_policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.skills, 0.6);
        assert_eq!(weights.field, 0.4);
    }

    #[test]
    fn test_default_matching_matches_policy_defaults() {
        assert_eq!(MatchingSettings::default().to_policy(), MatchPolicy::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Json);
    }

    fn settings_from(toml: &str) -> Result<Settings, ConfigError> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        Settings::load_from(file.path())
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let invalid = [
            "[matching]\nfield_threshold = 1.5\n",
            "[matching]\nskill_match_threshold = -0.1\n",
            "[matching]\nmax_top_n = 0\n",
            "[matching]\ndefault_top_n = 30\n",
            "[scoring.weights]\nskills = -0.6\n",
        ];

        for toml in invalid {
            let err = settings_from(toml).unwrap_err();
            assert!(matches!(err, ConfigError::Message(_)), "{:?} accepted: {}", toml, err);
        }
    }

    #[test]
    fn test_log_format_from_file() {
        let settings = settings_from("[logging]\nformat = \"pretty\"\n").unwrap();
        assert_eq!(settings.logging.format, LogFormat::Pretty);

        let settings = settings_from("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(settings.logging.format, LogFormat::Json);

        assert!(settings_from("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_accepts_boundary_values() {
        let settings = settings_from("[matching]\nfield_threshold = 0.0\nskill_match_threshold = 1.0\nmax_top_n = 1\ndefault_top_n = 1\n").unwrap();
        assert_eq!(settings.matching.max_top_n, 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[dataset]
path = "/srv/listings.csv"

[matching]
max_top_n = 10
skill_metric = "jaro_winkler"
location_mode = "contains"

[scoring.weights]
skills = 0.7
field = 0.3
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.dataset.path, "/srv/listings.csv");
        assert_eq!(settings.server.port, 8001);
        assert_eq!(settings.matching.max_top_n, 10);
        assert_eq!(settings.matching.default_top_n, 5);
        assert_eq!(settings.matching.skill_metric, SimilarityAlgo::JaroWinkler);
        assert_eq!(settings.matching.location_mode, LocationMode::Contains);
        assert_eq!(settings.weights(), ScoringWeights { skills: 0.7, field: 0.3 });
    }
}
