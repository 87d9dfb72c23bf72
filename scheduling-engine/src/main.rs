use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scheduling_engine::domain::calendar::DayOfWeek;
use scheduling_engine::domain::entities::{Employee, Service, ShiftCoverage, StaffingTargets};
use scheduling_engine::domain::services::{DraftRequest, ScheduleService};
use scheduling_engine::infrastructure::config::Settings;
use scheduling_engine::infrastructure::repositories::InMemoryScheduleRepository;
use shared::{Severity, ShiftCode, WorkPattern};

/// Demo run: build a small roster in memory, generate one month, publish
/// the draft and print the outcome.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduling_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Scheduling Engine demo...");

    // Load configuration
    let settings = Settings::new()?;
    let rules = settings.scheduling_rules();
    tracing::info!("Configuration loaded: {:?}", settings);

    let (year, month) = (2025, 6);
    let mut service = Service::new(
        "Internal Medicine",
        StaffingTargets {
            weekday: ShiftCoverage {
                morning: 2,
                afternoon: 2,
                night: 1,
            },
            weekend: ShiftCoverage {
                morning: 1,
                afternoon: 1,
                night: 1,
            },
        },
    );
    service.enable_night_shift = true;
    service.target_complete_weekends_off = Some(1);

    let employees = demo_roster(&service)?;
    let holidays: HashSet<NaiveDate> = [day(year, month, 24)?].into_iter().collect();

    let scheduler = ScheduleService::new(InMemoryScheduleRepository::new());
    let draft = scheduler.generate_draft(DraftRequest {
        service: service.clone(),
        employees,
        holidays,
        year,
        month,
        rules_override: Some(rules),
        seed: None,
    })?;

    println!("{}", draft.summary_text);
    for violation in &draft.violations {
        let marker = match violation.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("  [{}] {}: {}", marker, violation.rule, violation.details);
    }
    println!("breakdown: {}", serde_json::to_string(&draft.breakdown)?);

    let published = scheduler.publish_draft(year, month, service.id)?;
    tracing::info!(
        version = published.version,
        score = published.score,
        "schedule published"
    );

    Ok(())
}

fn demo_roster(service: &Service) -> Result<Vec<Employee>> {
    let mut employees = vec![
        Employee::new("Nurse 1", service.id, WorkPattern::StandardRotation)
            .with_weekend_preference(),
        Employee::new("Nurse 2", service.id, WorkPattern::StandardRotation)
            .with_fixed_weekly(DayOfWeek::Wednesday, ShiftCode::DayOff),
        Employee::new("Nurse 3", service.id, WorkPattern::StandardRotation)
            .with_fixed_assignment(
                ShiftCode::PaidLeave,
                day(2025, 6, 9)?,
                day(2025, 6, 13)?,
                "Annual leave",
            ),
    ];
    for n in 4..=6 {
        employees.push(Employee::new(
            format!("Nurse {n}"),
            service.id,
            WorkPattern::StandardRotation,
        ));
    }
    employees.push(Employee::new(
        "Clerk 1",
        service.id,
        WorkPattern::MondayToFridayMorning,
    ));
    Ok(employees)
}

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid demo date {year}-{month:02}-{day:02}"))
}
