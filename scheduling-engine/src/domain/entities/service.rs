use serde::{Deserialize, Serialize};
use shared::Identifiable;
use uuid::Uuid;

use crate::domain::rules::SchedulingRules;

/// Required headcount per shift type for one day class.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftCoverage {
    pub morning: u32,
    pub afternoon: u32,
    pub night: u32,
}

/// Staffing targets, split by weekday versus weekend-or-holiday days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffingTargets {
    pub weekday: ShiftCoverage,
    pub weekend: ShiftCoverage,
}

/// Hospital service (ward) entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub enable_night_shift: bool,
    pub staffing: StaffingTargets,
    /// Complete weekends off per employee per month; falls back to the
    /// rules default when unset.
    pub target_complete_weekends_off: Option<u32>,
    pub rules_override: Option<SchedulingRules>,
}

impl Service {
    pub fn new(name: impl Into<String>, staffing: StaffingTargets) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            enable_night_shift: false,
            staffing,
            target_complete_weekends_off: None,
            rules_override: None,
        }
    }

    pub fn coverage_for(&self, weekend_or_holiday: bool) -> ShiftCoverage {
        if weekend_or_holiday {
            self.staffing.weekend
        } else {
            self.staffing.weekday
        }
    }

    pub fn effective_weekend_target(&self, rules: &SchedulingRules) -> u32 {
        self.target_complete_weekends_off
            .unwrap_or(rules.default_target_complete_weekends_off)
    }
}

impl Identifiable for Service {
    fn id(&self) -> Uuid {
        self.id
    }
}
