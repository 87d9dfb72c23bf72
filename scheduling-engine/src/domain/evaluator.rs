use chrono::{Datelike, NaiveDate, Weekday};
use shared::{Severity, ShiftCode, ViolationCategory};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::domain::calendar;
use crate::domain::entities::{
    AiShift, Employee, ScheduleViolation, ScoreBreakdown, Service, ViolationRule,
};
use crate::domain::history::seed_employee_states;
use crate::domain::rules::SchedulingRules;
use crate::domain::state::EmployeeState;

/// Result of scoring one candidate schedule.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub score: i32,
    pub breakdown: ScoreBreakdown,
    pub violations: Vec<ScheduleViolation>,
    pub summary_text: String,
}

/// Running totals of an evaluation. Every penalty hits the overall score
/// and the subscore of its category; clamping happens once at the end, so
/// intermediate values may go negative.
struct Scorecard {
    score: i32,
    service_rules: i32,
    employee_wellbeing: i32,
    violations: Vec<ScheduleViolation>,
}

impl Scorecard {
    fn new() -> Self {
        Self {
            score: 100,
            service_rules: 100,
            employee_wellbeing: 100,
            violations: Vec::new(),
        }
    }

    fn penalize(&mut self, violation: ScheduleViolation, penalty: i32) {
        self.score -= penalty;
        match violation.category {
            ViolationCategory::ServiceRule => self.service_rules -= penalty,
            ViolationCategory::EmployeeWellbeing => self.employee_wellbeing -= penalty,
        }
        self.violations.push(violation);
    }
}

/// Deterministic rule evaluator: replays a candidate schedule against its
/// own freshly seeded states and enumerates every violation.
pub struct ScheduleEvaluator<'a> {
    service: &'a Service,
    employees: &'a [Employee],
    holidays: &'a HashSet<NaiveDate>,
    rules: &'a SchedulingRules,
}

impl<'a> ScheduleEvaluator<'a> {
    pub fn new(
        service: &'a Service,
        employees: &'a [Employee],
        holidays: &'a HashSet<NaiveDate>,
        rules: &'a SchedulingRules,
    ) -> Self {
        Self {
            service,
            employees,
            holidays,
            rules,
        }
    }

    pub fn evaluate(
        &self,
        shifts: &[AiShift],
        year: i32,
        month: u32,
        prev_shifts: &[AiShift],
    ) -> Evaluation {
        let mut lookup: HashMap<(&str, NaiveDate), ShiftCode> = HashMap::new();
        for shift in shifts {
            lookup.insert((shift.employee_name.as_str(), shift.date), shift.shift_code());
        }

        let mut states = seed_employee_states(self.employees, prev_shifts, year, month, self.rules);
        let mut card = Scorecard::new();
        let days = calendar::month_days(year, month);

        for &day in &days {
            self.evaluate_day(day, &lookup, &mut states, &mut card);
        }
        self.evaluate_weekend_targets(&days, &lookup, &mut card);

        let score = card.score.clamp(0, 100);
        let breakdown = ScoreBreakdown {
            service_rules: card.service_rules.clamp(0, 100),
            employee_wellbeing: card.employee_wellbeing.clamp(0, 100),
        };
        let summary_text = self.compose_summary(year, month, score, &breakdown, &card.violations);

        Evaluation {
            score,
            breakdown,
            violations: card.violations,
            summary_text,
        }
    }

    fn evaluate_day(
        &self,
        day: NaiveDate,
        lookup: &HashMap<(&str, NaiveDate), ShiftCode>,
        states: &mut HashMap<Uuid, EmployeeState>,
        card: &mut Scorecard,
    ) {
        let penalties = &self.rules.penalties;
        let mut tally = HashMap::from([
            (ShiftCode::Morning, 0u32),
            (ShiftCode::Afternoon, 0u32),
            (ShiftCode::Night, 0u32),
        ]);

        for employee in self.employees {
            let code = lookup
                .get(&(employee.name.as_str(), day))
                .copied()
                .unwrap_or(ShiftCode::DayOff);
            let state = states.entry(employee.id).or_default();

            if code.is_work() {
                if let Some(count) = tally.get_mut(&code) {
                    *count += 1;
                }

                if let Some(start) = calendar::shift_start_instant(day, code) {
                    if !state.can_start_work_at(start, self.rules.minimum_rest_hours_between_shifts)
                    {
                        card.penalize(
                            ScheduleViolation::error(
                                ViolationRule::MinRestBetweenShifts,
                                ViolationCategory::EmployeeWellbeing,
                                format!(
                                    "{} starts {} with less than {}h of rest since the previous shift",
                                    employee.name, day, self.rules.minimum_rest_hours_between_shifts
                                ),
                            )
                            .for_employee(employee.name.clone())
                            .on_date(day)
                            .with_code(code),
                            penalties.min_rest_between_shifts,
                        );
                    }
                }

                if state.is_resting()
                    && state.consecutive_rest_days < self.rules.min_consecutive_days_off_before_work
                {
                    card.penalize(
                        ScheduleViolation::error(
                            ViolationRule::MinRestBeforeWork,
                            ViolationCategory::ServiceRule,
                            format!(
                                "{} returns to work on {} after {} rest days (minimum {})",
                                employee.name,
                                day,
                                state.consecutive_rest_days,
                                self.rules.min_consecutive_days_off_before_work
                            ),
                        )
                        .for_employee(employee.name.clone())
                        .on_date(day)
                        .with_code(code),
                        penalties.min_rest_before_work,
                    );
                }

                match calendar::shift_end_instant(day, code) {
                    Some(end) => state.record_work(code, end),
                    None => state.record_rest(code),
                }

                if state.consecutive_work_days > self.rules.max_consecutive_work_days {
                    card.penalize(
                        ScheduleViolation::error(
                            ViolationRule::MaxConsecutiveWorkDays,
                            ViolationCategory::ServiceRule,
                            format!(
                                "{} reaches {} consecutive work days on {} (maximum {})",
                                employee.name,
                                state.consecutive_work_days,
                                day,
                                self.rules.max_consecutive_work_days
                            ),
                        )
                        .for_employee(employee.name.clone())
                        .on_date(day)
                        .with_code(code),
                        penalties.max_consecutive_work_days,
                    );
                }
            } else {
                state.record_rest(code);

                // Leave codes grow the rest streak but are excused from
                // the days-off warning; only ordinary rest triggers it.
                if state.consecutive_rest_days > self.rules.max_consecutive_days_off
                    && !code.is_leave()
                {
                    card.penalize(
                        ScheduleViolation::warning(
                            ViolationRule::MaxConsecutiveDaysOff,
                            ViolationCategory::EmployeeWellbeing,
                            format!(
                                "{} reaches {} consecutive days off on {} (soft maximum {})",
                                employee.name,
                                state.consecutive_rest_days,
                                day,
                                self.rules.max_consecutive_days_off
                            ),
                        )
                        .for_employee(employee.name.clone())
                        .on_date(day)
                        .with_code(code),
                        penalties.max_consecutive_days_off,
                    );
                }
            }
        }

        self.evaluate_staffing(day, &tally, card);
    }

    fn evaluate_staffing(
        &self,
        day: NaiveDate,
        tally: &HashMap<ShiftCode, u32>,
        card: &mut Scorecard,
    ) {
        let weekend_or_holiday = calendar::is_weekend_or_holiday(day, self.holidays);
        let coverage = self.service.coverage_for(weekend_or_holiday);

        let mut checks = vec![
            (ShiftCode::Morning, coverage.morning),
            (ShiftCode::Afternoon, coverage.afternoon),
        ];
        if self.service.enable_night_shift {
            checks.push((ShiftCode::Night, coverage.night));
        }

        for (code, target) in checks {
            let assigned = tally.get(&code).copied().unwrap_or(0);
            let shortage = target.saturating_sub(assigned);
            if shortage > 0 {
                card.penalize(
                    ScheduleViolation::error(
                        ViolationRule::StaffingShortage,
                        ViolationCategory::ServiceRule,
                        format!(
                            "{} is short {} employee(s) on shift {} ({} of {} covered)",
                            day, shortage, code, assigned, target
                        ),
                    )
                    .on_date(day)
                    .with_code(code),
                    shortage as i32 * self.rules.penalties.staffing_shortage_per_employee,
                );
            }
        }
    }

    /// Complete weekends off: Saturdays whose Saturday and Sunday both
    /// carry rest codes, both days falling inside the month.
    fn evaluate_weekend_targets(
        &self,
        days: &[NaiveDate],
        lookup: &HashMap<(&str, NaiveDate), ShiftCode>,
        card: &mut Scorecard,
    ) {
        let target = self.service.effective_weekend_target(self.rules);
        if target == 0 {
            return;
        }
        let penalties = &self.rules.penalties;

        for employee in self.employees {
            let rest_on = |day: NaiveDate| {
                lookup
                    .get(&(employee.name.as_str(), day))
                    .copied()
                    .unwrap_or(ShiftCode::DayOff)
                    .is_rest()
            };

            let complete = days
                .iter()
                .filter(|day| day.weekday() == Weekday::Sat)
                .filter(|saturday| {
                    saturday
                        .succ_opt()
                        .filter(|sunday| sunday.month() == saturday.month())
                        .map_or(false, |sunday| rest_on(**saturday) && rest_on(sunday))
                })
                .count() as u32;

            if complete < target {
                let missing = (target - complete) as i32;
                let penalty = (missing * penalties.weekend_target_not_met_per_weekend)
                    .min(penalties.max_weekend_target_penalty);
                card.penalize(
                    ScheduleViolation::warning(
                        ViolationRule::WeekendTargetNotMet,
                        ViolationCategory::EmployeeWellbeing,
                        format!(
                            "{} has {} of {} complete weekends off this month",
                            employee.name, complete, target
                        ),
                    )
                    .for_employee(employee.name.clone()),
                    penalty,
                );
            }
        }
    }

    fn compose_summary(
        &self,
        year: i32,
        month: u32,
        score: i32,
        breakdown: &ScoreBreakdown,
        violations: &[ScheduleViolation],
    ) -> String {
        let errors = violations
            .iter()
            .filter(|violation| violation.severity == Severity::Error)
            .count();
        let warnings = violations.len() - errors;

        format!(
            "{} {:02}/{}: score {}/100 (service rules {}, employee wellbeing {}); {} errors, {} warnings",
            self.service.name,
            month,
            year,
            score,
            breakdown.service_rules,
            breakdown.employee_wellbeing,
            errors,
            warnings
        )
    }
}
