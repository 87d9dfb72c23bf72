use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{ScheduleStatus, ViolationCategory};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::entities::{
    AiShift, Employee, MonthlySchedule, ScheduleViolation, ScoreBreakdown, Service, ViolationRule,
};
use crate::domain::evaluator::{Evaluation, ScheduleEvaluator};
use crate::domain::generator::ScheduleGenerator;
use crate::domain::history::seed_employee_states;
use crate::domain::rules::SchedulingRules;

/// All inputs of one generation run, as in-memory values. Loading the
/// entities and persisting the result belong to the caller.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub service: Service,
    pub employees: Vec<Employee>,
    pub holidays: HashSet<NaiveDate>,
    pub year: i32,
    pub month: u32,
    pub prev_shifts: Vec<AiShift>,
    pub rules_override: Option<SchedulingRules>,
    /// Base RNG seed; attempt k uses `seed + k`. Derived from year and
    /// month when unset so repeated runs are reproducible.
    pub seed: Option<u64>,
}

/// Fixed seed used when the caller does not supply one.
pub fn default_seed(year: i32, month: u32) -> u64 {
    (year as i64 * 100 + month as i64) as u64
}

/// Best-of-K restart loop around the greedy generator.
///
/// Every attempt reseeds employee states from history, builds a full
/// month and gets scored by the evaluator; the best attempt wins, ties
/// going to the earlier one. The loop exits early once the target score
/// is reached. The result is always a complete draft schedule; an empty
/// roster short-circuits to the "No Employees" signal.
pub fn generate(request: &GenerationRequest) -> MonthlySchedule {
    if request.employees.is_empty() {
        tracing::warn!(
            service = %request.service.name,
            "schedule requested for a service without employees"
        );
        return assemble(request, Vec::new(), no_employees_evaluation(request));
    }

    let rules = SchedulingRules::resolve(&request.service, request.rules_override.as_ref());
    let seeded = seed_employee_states(
        &request.employees,
        &request.prev_shifts,
        request.year,
        request.month,
        &rules,
    );
    let generator = ScheduleGenerator::new(
        &request.service,
        &request.employees,
        &request.holidays,
        &rules,
    );
    let evaluator = ScheduleEvaluator::new(
        &request.service,
        &request.employees,
        &request.holidays,
        &rules,
    );

    let base_seed = request
        .seed
        .unwrap_or_else(|| default_seed(request.year, request.month));
    let mut best: Option<(Vec<AiShift>, Evaluation)> = None;

    for attempt in 0..rules.max_attempts.max(1) {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(attempt as u64));
        let shifts = generator.generate_attempt(request.year, request.month, &seeded, &mut rng);
        let evaluation = evaluator.evaluate(&shifts, request.year, request.month, &request.prev_shifts);
        tracing::debug!(attempt, score = evaluation.score, "generation attempt scored");

        let improved = best
            .as_ref()
            .map_or(true, |(_, incumbent)| evaluation.score > incumbent.score);
        if improved {
            best = Some((shifts, evaluation));
        }

        let best_score = best.as_ref().map_or(0, |(_, evaluation)| evaluation.score);
        if best_score >= rules.target_score {
            tracing::info!(
                attempts = attempt + 1,
                score = best_score,
                "target score reached, stopping restarts"
            );
            break;
        }
    }

    let (shifts, evaluation) = match best {
        Some(found) => found,
        None => (Vec::new(), no_employees_evaluation(request)),
    };
    tracing::info!(
        service = %request.service.name,
        score = evaluation.score,
        violations = evaluation.violations.len(),
        "schedule generated"
    );
    assemble(request, shifts, evaluation)
}

fn no_employees_evaluation(request: &GenerationRequest) -> Evaluation {
    let violation = ScheduleViolation::error(
        ViolationRule::NoEmployees,
        ViolationCategory::ServiceRule,
        format!(
            "Service {} has no employees to schedule",
            request.service.name
        ),
    );
    Evaluation {
        score: 0,
        breakdown: ScoreBreakdown {
            service_rules: 0,
            employee_wellbeing: 0,
        },
        violations: vec![violation],
        summary_text: format!(
            "{} {:02}/{}: score 0/100 (service rules 0, employee wellbeing 0); 1 errors, 0 warnings",
            request.service.name, request.month, request.year
        ),
    }
}

fn assemble(
    request: &GenerationRequest,
    shifts: Vec<AiShift>,
    evaluation: Evaluation,
) -> MonthlySchedule {
    let now = Utc::now();
    MonthlySchedule {
        id: Uuid::new_v4(),
        year: request.year,
        month: request.month,
        service_id: request.service.id,
        service_name: request.service.name.clone(),
        shifts,
        score: evaluation.score,
        breakdown: evaluation.breakdown,
        violations: evaluation.violations,
        summary_text: evaluation.summary_text,
        status: ScheduleStatus::Draft,
        version: 1,
        created_at: now,
        updated_at: now,
    }
}
