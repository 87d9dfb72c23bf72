#[path = "common/mod.rs"]
mod common;

use chrono::Datelike;
use common::{
    basic_service, code_of, date, flat_staffing, longest_work_streak, request, rotation_employee,
    shift_of,
};
use scheduling_engine::domain::calendar::month_days;
use scheduling_engine::domain::entities::{Employee, ViolationRule};
use scheduling_engine::domain::history::seed_employee_states;
use scheduling_engine::domain::orchestrator::generate;
use scheduling_engine::domain::rules::SchedulingRules;
use scheduling_engine::domain::state::EmployeeState;
use shared::{Severity, ShiftCode, WorkPattern};
use std::collections::HashSet;

/// Minimal staffing with two rotation employees: both are needed every
/// day, so only the hard 6-day cap forces rest days, each of which shows
/// up as a staffing shortage.
#[test]
fn test_scenario_minimal_staffing_two_employees() {
    let service = basic_service(flat_staffing(1, 1, 0));
    let employees = vec![
        rotation_employee(&service, "E1"),
        rotation_employee(&service, "E2"),
    ];
    let schedule = generate(&request(service, employees, 2025, 2, 42));

    // Full month, both employees, one code per day.
    assert_eq!(schedule.shifts.len(), 28 * 2);
    assert!(longest_work_streak(&schedule, "E1") <= 6);
    assert!(longest_work_streak(&schedule, "E2") <= 6);

    // Days without a reported shortage carry exactly one M and one T.
    let shortage_days: HashSet<_> = schedule
        .violations
        .iter()
        .filter(|violation| violation.rule == ViolationRule::StaffingShortage)
        .filter_map(|violation| violation.date)
        .collect();
    for day in month_days(2025, 2) {
        if shortage_days.contains(&day) {
            continue;
        }
        let codes: Vec<ShiftCode> = schedule
            .shifts
            .iter()
            .filter(|shift| shift.date == day)
            .map(|shift| shift.shift_code())
            .collect();
        assert!(codes.contains(&ShiftCode::Morning), "no M on {day}");
        assert!(codes.contains(&ShiftCode::Afternoon), "no T on {day}");
    }

    // 28 days under a 6-on-1-off cap cost each employee 4 rest days,
    // which is 8 uncovered slots at 5 points apiece.
    let shortages = schedule
        .violations
        .iter()
        .filter(|violation| violation.rule == ViolationRule::StaffingShortage)
        .count();
    assert_eq!(shortages, 8);
    assert_eq!(schedule.score, 60);
    assert_eq!(schedule.breakdown.service_rules, 60);
    assert_eq!(schedule.breakdown.employee_wellbeing, 100);
}

/// A holiday Monday turns a fixed-pattern employee's M into F and the
/// morning slot falls to the rotation employee.
#[test]
fn test_scenario_holiday_for_fixed_pattern_employee() {
    let service = basic_service(flat_staffing(1, 1, 0));
    let e1 = Employee::new("E1", service.id, WorkPattern::MondayToFridayMorning);
    let e2 = rotation_employee(&service, "E2");

    let mut generation_request = request(service, vec![e1, e2], 2025, 2, 42);
    generation_request.holidays.insert(date(2025, 2, 17));
    let schedule = generate(&generation_request);

    let holiday = date(2025, 2, 17);
    assert_eq!(code_of(&schedule, "E1", holiday), ShiftCode::HolidayRest);
    let holiday_shift = shift_of(&schedule, "E1", holiday).unwrap();
    assert!(holiday_shift.notes.starts_with('F'));
    assert_eq!(holiday_shift.start_time, "");

    assert_eq!(code_of(&schedule, "E2", holiday), ShiftCode::Morning);

    // Plain weekdays keep the pattern's morning shift.
    assert_eq!(
        code_of(&schedule, "E1", date(2025, 2, 10)),
        ShiftCode::Morning
    );
    // Weekends rest the pattern employee.
    assert_eq!(code_of(&schedule, "E1", date(2025, 2, 15)), ShiftCode::DayOff);
}

/// Night work blocks any shift starting less than 12 hours after the
/// night's 07:00 end, so a night is never followed by a morning or an
/// afternoon.
#[test]
fn test_scenario_rest_gap_after_night_shifts() {
    let mut service = basic_service(flat_staffing(0, 0, 1));
    service.enable_night_shift = true;
    let employees = vec![
        rotation_employee(&service, "E1"),
        rotation_employee(&service, "E2"),
    ];
    let schedule = generate(&request(service, employees, 2025, 3, 9));

    for name in ["E1", "E2"] {
        for day in month_days(2025, 3) {
            if code_of(&schedule, name, day) != ShiftCode::Night {
                continue;
            }
            let Some(next) = day.succ_opt() else {
                continue;
            };
            if next.month() != 3 {
                continue;
            }
            let following = code_of(&schedule, name, next);
            assert!(
                following == ShiftCode::Night || following.is_rest(),
                "{name} works {following} on {next} right after a night shift"
            );
        }
    }

    // The generator had a feasible night candidate every day, so the
    // rest-gap rule is never violated.
    assert!(!schedule
        .violations
        .iter()
        .any(|violation| violation.rule == ViolationRule::MinRestBetweenShifts));
}

/// A date-ranged leave overrides generation for its whole span and the
/// vacated staffing is picked up by the rest of the roster.
#[test]
fn test_scenario_leave_overlay() {
    let service = basic_service(flat_staffing(1, 1, 0));
    let e1 = rotation_employee(&service, "E1").with_fixed_assignment(
        ShiftCode::PaidLeave,
        date(2025, 5, 10),
        date(2025, 5, 20),
        "Annual leave",
    );
    let others: Vec<_> = (2..=5)
        .map(|n| rotation_employee(&service, &format!("E{n}")))
        .collect();
    let mut employees = vec![e1];
    employees.extend(others);

    let schedule = generate(&request(service, employees, 2025, 5, 17));

    for day in 10..=20 {
        assert_eq!(
            code_of(&schedule, "E1", date(2025, 5, day)),
            ShiftCode::PaidLeave
        );
    }

    // Leave days are excused from the days-off warning.
    assert!(!schedule.violations.iter().any(|violation| {
        violation.rule == ViolationRule::MaxConsecutiveDaysOff
            && violation.employee_name.as_deref() == Some("E1")
            && violation
                .date
                .map_or(false, |day| day >= date(2025, 5, 10) && day <= date(2025, 5, 20))
    }));

    // Three remaining employees keep both day slots covered.
    assert!(!schedule.violations.iter().any(|violation| {
        violation.rule == ViolationRule::StaffingShortage
            && violation
                .date
                .map_or(false, |day| day >= date(2025, 5, 10) && day <= date(2025, 5, 20))
    }));
}

/// With a comfortable roster the restart loop reaches the target score
/// and the schedule stays fully covered.
#[test]
fn test_comfortable_roster_reaches_target_score() {
    let service = basic_service(flat_staffing(1, 1, 0));
    let employees = (1..=4)
        .map(|n| rotation_employee(&service, &format!("E{n}")))
        .collect();
    let schedule = generate(&request(service, employees, 2025, 6, 23));

    assert!(schedule.score >= 80, "score was {}", schedule.score);
    assert!(!schedule
        .violations
        .iter()
        .any(|violation| violation.rule == ViolationRule::StaffingShortage));
    assert!(!schedule
        .violations
        .iter()
        .any(|violation| violation.severity == Severity::Error));
}

/// Single employee, single morning slot: the month degenerates into
/// 6-on-1-off blocks with a shortage on every forced rest day.
#[test]
fn test_single_employee_boundary() {
    let service = basic_service(flat_staffing(1, 0, 0));
    let employees = vec![rotation_employee(&service, "E1")];
    let schedule = generate(&request(service, employees, 2025, 2, 3));

    assert_eq!(schedule.shifts.len(), 28);
    assert_eq!(longest_work_streak(&schedule, "E1"), 6);

    let shortages = schedule
        .violations
        .iter()
        .filter(|violation| violation.rule == ViolationRule::StaffingShortage)
        .count();
    assert_eq!(shortages, 4);
    assert_eq!(schedule.score, 80);

    // No rest-gap issues are possible in a pure morning rotation.
    assert!(!schedule
        .violations
        .iter()
        .any(|violation| violation.rule == ViolationRule::MinRestBetweenShifts));
}

/// Seeding the next month from the generated one reproduces the counters
/// that were in effect at the end of generation.
#[test]
fn test_history_seeding_round_trip() {
    let service = basic_service(flat_staffing(1, 0, 0));
    let employees = vec![rotation_employee(&service, "E1")];
    let generation_request = request(service, employees, 2025, 2, 3);
    let schedule = generate(&generation_request);
    let rules = SchedulingRules::default();

    // Replay the generated month to know the true end-of-month counters.
    let mut replayed = EmployeeState::default();
    replayed.consecutive_rest_days = rules.lookback_days() as u32;
    for day in month_days(2025, 2) {
        let code = code_of(&schedule, "E1", day);
        match scheduling_engine::domain::calendar::shift_end_instant(day, code) {
            Some(end) if code.is_work() => replayed.record_work(code, end),
            _ => replayed.record_rest(code),
        }
    }

    let seeded = seed_employee_states(
        &generation_request.employees,
        &schedule.shifts,
        2025,
        3,
        &rules,
    );
    let seeded = &seeded[&generation_request.employees[0].id];

    assert_eq!(seeded.consecutive_work_days, replayed.consecutive_work_days);
    assert_eq!(seeded.consecutive_rest_days, replayed.consecutive_rest_days);
    assert_eq!(seeded.last_work_shift_end, replayed.last_work_shift_end);
    assert_eq!(seeded.shifts_this_month, 0);
}

/// Weekend-target warnings come from the evaluator with the capped
/// penalty applied to the wellbeing subscore.
#[test]
fn test_weekend_target_warning_in_generated_schedule() {
    let mut service = basic_service(flat_staffing(1, 0, 0));
    service.target_complete_weekends_off = Some(2);
    let employees = vec![rotation_employee(&service, "E1")];
    let schedule = generate(&request(service, employees, 2025, 6, 31));

    // One employee against a daily slot cannot take two full weekends
    // off without leaving even more shortages; whichever attempt wins,
    // the evaluator reports the target shortfall at most once.
    let weekend_warnings: Vec<_> = schedule
        .violations
        .iter()
        .filter(|violation| violation.rule == ViolationRule::WeekendTargetNotMet)
        .collect();
    assert!(weekend_warnings.len() <= 1);
    if let Some(warning) = weekend_warnings.first() {
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.employee_name.as_deref(), Some("E1"));
    }
}
