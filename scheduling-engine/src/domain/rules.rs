use serde::{Deserialize, Serialize};

use crate::domain::entities::Service;

/// Penalty weights applied by the evaluator, per violation occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScorePenalties {
    /// Per missing employee per shift type per day.
    pub staffing_shortage_per_employee: i32,
    pub min_rest_between_shifts: i32,
    pub min_rest_before_work: i32,
    pub max_consecutive_work_days: i32,
    pub max_consecutive_days_off: i32,
    /// Per weekend below the target, capped per employee per month.
    pub weekend_target_not_met_per_weekend: i32,
    pub max_weekend_target_penalty: i32,
}

impl Default for ScorePenalties {
    fn default() -> Self {
        Self {
            staffing_shortage_per_employee: 5,
            min_rest_between_shifts: 10,
            min_rest_before_work: 5,
            max_consecutive_work_days: 10,
            max_consecutive_days_off: 2,
            weekend_target_not_met_per_weekend: 3,
            max_weekend_target_penalty: 15,
        }
    }
}

/// Scheduling rules configuration. Defaults apply to every service; a
/// service may carry its own override, and a caller may override both for
/// a single run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulingRules {
    /// Hard upper bound on consecutive work-code days.
    pub max_consecutive_work_days: u32,
    /// Soft target used for candidate ranking.
    pub preferred_consecutive_work_days: u32,
    /// Soft upper bound; exceeding it raises a warning.
    pub max_consecutive_days_off: u32,
    /// Soft target used for candidate ranking.
    pub preferred_consecutive_days_off: u32,
    /// Hard: rest days required immediately before switching to work.
    pub min_consecutive_days_off_before_work: u32,
    /// Hard: hours between the last work shift's end and the next start.
    pub minimum_rest_hours_between_shifts: i64,
    /// Soft per-month target per employee, unless the service sets one.
    pub default_target_complete_weekends_off: u32,
    /// Restart budget of the best-of-K generation loop.
    pub max_attempts: u32,
    /// Early-exit score for the restart loop.
    pub target_score: i32,
    pub penalties: ScorePenalties,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            max_consecutive_work_days: 6,
            preferred_consecutive_work_days: 5,
            max_consecutive_days_off: 3,
            preferred_consecutive_days_off: 2,
            min_consecutive_days_off_before_work: 1,
            minimum_rest_hours_between_shifts: 12,
            default_target_complete_weekends_off: 1,
            max_attempts: 15,
            target_score: 80,
            penalties: ScorePenalties::default(),
        }
    }
}

impl SchedulingRules {
    /// Effective rules for one generation run: a per-call override wins,
    /// then the service's own override, then the defaults.
    pub fn resolve(service: &Service, run_override: Option<&SchedulingRules>) -> SchedulingRules {
        if let Some(rules) = run_override {
            return rules.clone();
        }
        if let Some(rules) = &service.rules_override {
            return rules.clone();
        }
        SchedulingRules::default()
    }

    /// Lookback window for history seeding.
    pub fn lookback_days(&self) -> i64 {
        self.max_consecutive_work_days
            .max(self.max_consecutive_days_off)
            .max(7) as i64
    }
}
