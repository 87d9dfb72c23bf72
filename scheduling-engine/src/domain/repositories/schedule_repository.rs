use shared::DomainResult;
use uuid::Uuid;

use crate::domain::entities::{AiShift, MonthlySchedule};

/// Storage contract for generated schedules, keyed by
/// `(year, month, service_id)`. At most one record per key is published;
/// superseded records are archived, never deleted.
pub trait ScheduleRepository: Send + Sync {
    /// Insert or overwrite the single draft for the schedule's key.
    fn save_draft(&self, schedule: MonthlySchedule) -> DomainResult<MonthlySchedule>;

    /// Atomic publish: archive the published record if any, archive the
    /// draft being published if any, insert a new published record with
    /// the next version number.
    fn publish(&self, schedule: MonthlySchedule) -> DomainResult<MonthlySchedule>;

    /// Every record for the key, archived versions included.
    fn find(&self, year: i32, month: u32, service_id: Uuid) -> DomainResult<Vec<MonthlySchedule>>;

    fn find_published(
        &self,
        year: i32,
        month: u32,
        service_id: Uuid,
    ) -> DomainResult<Option<MonthlySchedule>>;

    fn find_draft(
        &self,
        year: i32,
        month: u32,
        service_id: Uuid,
    ) -> DomainResult<Option<MonthlySchedule>>;

    /// Shifts of the published schedule, empty when none is published.
    /// Used to seed the next month's history.
    fn published_shifts(
        &self,
        service_id: Uuid,
        year: i32,
        month: u32,
    ) -> DomainResult<Vec<AiShift>>;
}
