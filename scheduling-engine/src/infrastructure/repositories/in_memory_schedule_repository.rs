use chrono::Utc;
use shared::{DomainError, DomainResult, ScheduleStatus};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{AiShift, MonthlySchedule};
use crate::domain::repositories::ScheduleRepository;

type ScheduleKey = (i32, u32, Uuid);

/// In-memory schedule store. Keeps the full record history per key so
/// archival stays a status transition rather than a deletion.
#[derive(Default)]
pub struct InMemoryScheduleRepository {
    schedules: RwLock<HashMap<ScheduleKey, Vec<MonthlySchedule>>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_version(records: &[MonthlySchedule]) -> u32 {
        records
            .iter()
            .filter(|record| record.status == ScheduleStatus::Published)
            .map(|record| record.version)
            .max()
            .map_or(1, |version| version + 1)
    }
}

impl ScheduleRepository for InMemoryScheduleRepository {
    fn save_draft(&self, mut schedule: MonthlySchedule) -> DomainResult<MonthlySchedule> {
        let mut schedules = self.schedules.write().map_err(lock_poisoned)?;
        let records = schedules
            .entry((schedule.year, schedule.month, schedule.service_id))
            .or_default();

        // A key holds at most one draft; saving replaces it.
        records.retain(|record| record.status != ScheduleStatus::Draft);

        schedule.status = ScheduleStatus::Draft;
        schedule.version = Self::next_version(records);
        schedule.updated_at = Utc::now();
        records.push(schedule.clone());
        Ok(schedule)
    }

    fn publish(&self, mut schedule: MonthlySchedule) -> DomainResult<MonthlySchedule> {
        let mut schedules = self.schedules.write().map_err(lock_poisoned)?;
        let records = schedules
            .entry((schedule.year, schedule.month, schedule.service_id))
            .or_default();

        let version = Self::next_version(records);
        for record in records.iter_mut() {
            if matches!(
                record.status,
                ScheduleStatus::Published | ScheduleStatus::Draft
            ) {
                record.status = ScheduleStatus::Archived;
                record.updated_at = Utc::now();
            }
        }

        schedule.status = ScheduleStatus::Published;
        schedule.version = version;
        schedule.updated_at = Utc::now();
        records.push(schedule.clone());
        Ok(schedule)
    }

    fn find(&self, year: i32, month: u32, service_id: Uuid) -> DomainResult<Vec<MonthlySchedule>> {
        let schedules = self.schedules.read().map_err(lock_poisoned)?;
        Ok(schedules
            .get(&(year, month, service_id))
            .cloned()
            .unwrap_or_default())
    }

    fn find_published(
        &self,
        year: i32,
        month: u32,
        service_id: Uuid,
    ) -> DomainResult<Option<MonthlySchedule>> {
        let schedules = self.schedules.read().map_err(lock_poisoned)?;
        Ok(schedules
            .get(&(year, month, service_id))
            .and_then(|records| {
                records
                    .iter()
                    .find(|record| record.status == ScheduleStatus::Published)
                    .cloned()
            }))
    }

    fn find_draft(
        &self,
        year: i32,
        month: u32,
        service_id: Uuid,
    ) -> DomainResult<Option<MonthlySchedule>> {
        let schedules = self.schedules.read().map_err(lock_poisoned)?;
        Ok(schedules
            .get(&(year, month, service_id))
            .and_then(|records| {
                records
                    .iter()
                    .find(|record| record.status == ScheduleStatus::Draft)
                    .cloned()
            }))
    }

    fn published_shifts(
        &self,
        service_id: Uuid,
        year: i32,
        month: u32,
    ) -> DomainResult<Vec<AiShift>> {
        Ok(self
            .find_published(year, month, service_id)?
            .map(|schedule| schedule.shifts)
            .unwrap_or_default())
    }
}

fn lock_poisoned<T>(_: std::sync::PoisonError<T>) -> DomainError {
    DomainError::InternalError("schedule store lock poisoned".to_string())
}
