pub mod in_memory_schedule_repository;

pub use in_memory_schedule_repository::InMemoryScheduleRepository;
