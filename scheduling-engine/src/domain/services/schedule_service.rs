use chrono::NaiveDate;
use shared::{DomainError, DomainResult};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::entities::{Employee, MonthlySchedule, Service};
use crate::domain::orchestrator::{self, GenerationRequest};
use crate::domain::repositories::ScheduleRepository;
use crate::domain::rules::SchedulingRules;

/// Inputs for generating a draft schedule through the schedule service.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub service: Service,
    pub employees: Vec<Employee>,
    pub holidays: HashSet<NaiveDate>,
    pub year: i32,
    pub month: u32,
    pub rules_override: Option<SchedulingRules>,
    pub seed: Option<u64>,
}

/// Coordinator between the generation engine and the schedule store:
/// seeds history from the previous month's published shifts, runs the
/// restart loop, and persists the outcome.
pub struct ScheduleService<R: ScheduleRepository> {
    repository: R,
}

impl<R: ScheduleRepository> ScheduleService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Generate a schedule for the requested month and save it as the
    /// key's draft.
    pub fn generate_draft(&self, request: DraftRequest) -> DomainResult<MonthlySchedule> {
        let (prev_year, prev_month) = previous_month(request.year, request.month);
        let prev_shifts =
            self.repository
                .published_shifts(request.service.id, prev_year, prev_month)?;
        tracing::info!(
            service = %request.service.name,
            year = request.year,
            month = request.month,
            history_shifts = prev_shifts.len(),
            "generating draft schedule"
        );

        let schedule = orchestrator::generate(&GenerationRequest {
            service: request.service,
            employees: request.employees,
            holidays: request.holidays,
            year: request.year,
            month: request.month,
            prev_shifts,
            rules_override: request.rules_override,
            seed: request.seed,
        });

        self.repository.save_draft(schedule)
    }

    /// Promote the key's draft to the published schedule.
    pub fn publish_draft(
        &self,
        year: i32,
        month: u32,
        service_id: Uuid,
    ) -> DomainResult<MonthlySchedule> {
        let draft = self
            .repository
            .find_draft(year, month, service_id)?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "No draft schedule for service {} in {:02}/{}",
                    service_id, month, year
                ))
            })?;

        let published = self.repository.publish(draft)?;
        tracing::info!(
            service_id = %service_id,
            version = published.version,
            "schedule published"
        );
        Ok(published)
    }
}

/// Previous calendar month of a (year, month) pair.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
