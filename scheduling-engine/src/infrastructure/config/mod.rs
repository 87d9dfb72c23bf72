use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::rules::{SchedulingRules, ScorePenalties};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub scheduling: SchedulingSettings,
}

/// Engine tunables exposed through the configuration layer. Every field
/// defaults to the built-in rules so running without any config file or
/// environment override is valid.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SchedulingSettings {
    pub max_consecutive_work_days: u32,
    pub preferred_consecutive_work_days: u32,
    pub max_consecutive_days_off: u32,
    pub preferred_consecutive_days_off: u32,
    pub min_consecutive_days_off_before_work: u32,
    pub minimum_rest_hours_between_shifts: i64,
    pub default_target_complete_weekends_off: u32,
    pub max_attempts: u32,
    pub target_score: i32,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        let rules = SchedulingRules::default();
        Self {
            max_consecutive_work_days: rules.max_consecutive_work_days,
            preferred_consecutive_work_days: rules.preferred_consecutive_work_days,
            max_consecutive_days_off: rules.max_consecutive_days_off,
            preferred_consecutive_days_off: rules.preferred_consecutive_days_off,
            min_consecutive_days_off_before_work: rules.min_consecutive_days_off_before_work,
            minimum_rest_hours_between_shifts: rules.minimum_rest_hours_between_shifts,
            default_target_complete_weekends_off: rules.default_target_complete_weekends_off,
            max_attempts: rules.max_attempts,
            target_score: rules.target_score,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn scheduling_rules(&self) -> SchedulingRules {
        let scheduling = &self.scheduling;
        SchedulingRules {
            max_consecutive_work_days: scheduling.max_consecutive_work_days,
            preferred_consecutive_work_days: scheduling.preferred_consecutive_work_days,
            max_consecutive_days_off: scheduling.max_consecutive_days_off,
            preferred_consecutive_days_off: scheduling.preferred_consecutive_days_off,
            min_consecutive_days_off_before_work: scheduling.min_consecutive_days_off_before_work,
            minimum_rest_hours_between_shifts: scheduling.minimum_rest_hours_between_shifts,
            default_target_complete_weekends_off: scheduling.default_target_complete_weekends_off,
            max_attempts: scheduling.max_attempts,
            target_score: scheduling.target_score,
            penalties: ScorePenalties::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_rule_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.scheduling_rules(), SchedulingRules::default());
    }
}
