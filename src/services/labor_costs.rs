//! Labor cost aggregation: per-execution substage cost via the duck-typed
//! position lookup, annual caseload-driven labor, and the monthly fixed
//! payroll (salaries plus employer contributions).

use std::collections::HashMap;

use crate::domain::portfolio::CaseloadDistribution;
use crate::domain::stage::{Stage, SubStage};
use crate::domain::staff::StaffType;
use crate::services::rounding::distribute_integer;
use crate::services::taxes::{ContributionSchedule, employer_contributions};

pub fn hourly_rate(monthly_salary: f64, monthly_working_hours: f64) -> f64 {
    if monthly_working_hours <= 0.0 {
        0.0
    } else {
        monthly_salary / monthly_working_hours
    }
}

/// Result of resolving a substage's `executor_position`. The unmatched case
/// costs nothing but stays observable instead of silently vanishing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutorLookup<'a> {
    Matched(&'a StaffType),
    Unmatched,
}

/// Lookup table over `StaffType::position`, keyed by the normalized string.
/// Positions are assumed unique; a duplicate keeps the first entry and warns.
pub struct StaffDirectory<'a> {
    by_position: HashMap<String, &'a StaffType>,
}

fn normalize_position(position: &str) -> String {
    position.trim().to_lowercase()
}

impl<'a> StaffDirectory<'a> {
    pub fn new(staff: &'a [StaffType]) -> Self {
        let mut by_position: HashMap<String, &StaffType> = HashMap::with_capacity(staff.len());
        for entry in staff {
            let key = normalize_position(&entry.position);
            if by_position.contains_key(&key) {
                log::warn!("duplicate staff position '{}', keeping the first entry", entry.position);
            } else {
                by_position.insert(key, entry);
            }
        }
        Self { by_position }
    }

    pub fn lookup(&self, executor_position: &str) -> ExecutorLookup<'a> {
        match self.by_position.get(&normalize_position(executor_position)) {
            Some(staff) => ExecutorLookup::Matched(staff),
            None => ExecutorLookup::Unmatched,
        }
    }
}

/// Cost of executing a substage once. An unmatched executor costs 0 (with a
/// warning); zero working hours or efficiency short-circuit to 0 rather than
/// producing a NaN.
pub fn sub_stage_execution_cost(sub_stage: &SubStage, directory: &StaffDirectory) -> f64 {
    let staff = match directory.lookup(&sub_stage.executor_position) {
        ExecutorLookup::Matched(staff) => staff,
        ExecutorLookup::Unmatched => {
            log::warn!(
                "substage '{}' names executor position '{}' with no matching staff, costing 0",
                sub_stage.name,
                sub_stage.executor_position
            );
            return 0.0;
        }
    };

    let rate = hourly_rate(staff.monthly_salary, staff.monthly_working_hours);
    let efficiency = (staff.efficiency_percent.clamp(1.0, 100.0)) / 100.0;
    (sub_stage.normative_minutes / 60.0) / efficiency * rate
}

/// Cases entering each stage, `total_cases` split by the caseload
/// percentages with exact residual correction. Order follows `stages`.
pub fn distribute_cases(
    total_cases: u64,
    stages: &[Stage],
    caseload: &CaseloadDistribution,
) -> Vec<u64> {
    let percentages: Vec<f64> = stages.iter().map(|stage| caseload.share(&stage.id)).collect();
    distribute_integer(total_cases, &percentages)
}

/// Annual labor cost of working the whole caseload: execution cost times
/// repetitions times cases entering, over every substage of every stage.
pub fn annual_caseload_labor_cost(
    stages: &[Stage],
    staff: &[StaffType],
    caseload: &CaseloadDistribution,
    total_cases: u64,
) -> f64 {
    let directory = StaffDirectory::new(staff);
    let cases = distribute_cases(total_cases, stages, caseload);

    stages
        .iter()
        .zip(cases)
        .map(|(stage, cases_at_stage)| {
            stage
                .sub_stages
                .iter()
                .map(|sub| {
                    sub_stage_execution_cost(sub, &directory)
                        * sub.repetitions as f64
                        * cases_at_stage as f64
                })
                .sum::<f64>()
        })
        .sum()
}

/// Monthly fixed payroll: salaries plus employer contributions, scaled by
/// headcount. Contributions are computed on annual income and prorated.
pub fn monthly_fixed_labor_cost(staff: &[StaffType], schedule: &ContributionSchedule) -> f64 {
    staff
        .iter()
        .map(|entry| {
            let annual = entry.annual_salary();
            let loaded = annual + employer_contributions(annual, schedule);
            loaded / 12.0 * entry.count as f64
        })
        .sum()
}
