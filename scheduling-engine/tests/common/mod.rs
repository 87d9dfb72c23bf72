use chrono::NaiveDate;
use scheduling_engine::domain::entities::{
    AiShift, Employee, MonthlySchedule, Service, ShiftCoverage, StaffingTargets,
};
use scheduling_engine::domain::orchestrator::GenerationRequest;
use shared::{ShiftCode, WorkPattern};
use std::collections::HashSet;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Identical coverage on weekdays and weekends.
pub fn flat_staffing(morning: u32, afternoon: u32, night: u32) -> StaffingTargets {
    let coverage = ShiftCoverage {
        morning,
        afternoon,
        night,
    };
    StaffingTargets {
        weekday: coverage,
        weekend: coverage,
    }
}

/// Service without night shift and without a weekend-off target.
pub fn basic_service(staffing: StaffingTargets) -> Service {
    let mut service = Service::new("Cardiology", staffing);
    service.target_complete_weekends_off = Some(0);
    service
}

pub fn rotation_employee(service: &Service, name: &str) -> Employee {
    Employee::new(name, service.id, WorkPattern::StandardRotation)
}

pub fn request(
    service: Service,
    employees: Vec<Employee>,
    year: i32,
    month: u32,
    seed: u64,
) -> GenerationRequest {
    GenerationRequest {
        service,
        employees,
        holidays: HashSet::new(),
        year,
        month,
        prev_shifts: Vec::new(),
        rules_override: None,
        seed: Some(seed),
    }
}

pub fn code_of(schedule: &MonthlySchedule, name: &str, day: NaiveDate) -> ShiftCode {
    shift_of(schedule, name, day)
        .map(AiShift::shift_code)
        .unwrap_or(ShiftCode::DayOff)
}

pub fn shift_of<'a>(
    schedule: &'a MonthlySchedule,
    name: &str,
    day: NaiveDate,
) -> Option<&'a AiShift> {
    schedule
        .shifts
        .iter()
        .find(|shift| shift.employee_name == name && shift.date == day)
}

/// Longest run of consecutive work days in the employee's month.
pub fn longest_work_streak(schedule: &MonthlySchedule, name: &str) -> u32 {
    let mut days: Vec<&AiShift> = schedule
        .shifts
        .iter()
        .filter(|shift| shift.employee_name == name)
        .collect();
    days.sort_by_key(|shift| shift.date);

    let mut longest = 0u32;
    let mut current = 0u32;
    for shift in days {
        if shift.shift_code().is_work() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
