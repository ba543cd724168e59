//! Probabilistic flow simulation: propagates the caseload, expressed as
//! percentage mass, through the `next_stage_ids` graph. Each visited stage
//! splits its incoming mass into recovered, written-off and transitioning
//! shares; transitioning mass divides evenly across successors. Mass left
//! over at a stage with no successors drops out of the process and never
//! re-enters any total.

use std::collections::VecDeque;

use thiserror::Error;

use crate::domain::portfolio::CaseloadDistribution;
use crate::domain::stage::Stage;
use crate::services::rounding::reconcile_to_total;
use crate::services::stage_graph::{stage_map, successor_map};

pub const DAYS_PER_MONTH: f64 = 30.0;
/// The monthly allocation looks this far ahead before folding into the
/// modeled year.
pub const MONTH_HORIZON: usize = 36;
pub const MODELED_MONTHS: usize = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowSimulationError {
    #[error("flow simulation exceeded the {0}-iteration cap, successor graph is likely cyclic")]
    IterationCapExceeded(usize),
}

/// Raw mass balance of one propagation run.
#[derive(Debug, Clone, PartialEq)]
pub struct MassFlow {
    pub initial_mass: f64,
    pub recovered_mass: f64,
    pub written_off_mass: f64,
    /// Recovered plus written off; mass lost at dead ends is excluded.
    pub exit_mass: f64,
    /// Sum of exiting mass weighted by its exit day.
    pub exit_day_weighted: f64,
    pub recovered_by_month: [f64; MONTH_HORIZON],
    pub last_exit_month: usize,
}

impl MassFlow {
    pub fn recovery_rate_percent(&self) -> f64 {
        if self.initial_mass <= 0.0 {
            0.0
        } else {
            self.recovered_mass / self.initial_mass * 100.0
        }
    }
}

struct Packet<'a> {
    stage: &'a Stage,
    mass: f64,
    elapsed_days: f64,
}

/// Breadth-first mass propagation with a hard iteration cap of
/// `stage_count²`; exhausting the cap is fatal for the calculation and
/// surfaces as an error, never a hang.
pub fn propagate(
    stages: &[Stage],
    caseload: &CaseloadDistribution,
) -> Result<MassFlow, FlowSimulationError> {
    let map = stage_map(stages);
    let successors = successor_map(stages);
    let iteration_cap = (stages.len() * stages.len()).max(1);

    let mut queue: VecDeque<Packet> = VecDeque::new();
    let mut flow = MassFlow {
        initial_mass: 0.0,
        recovered_mass: 0.0,
        written_off_mass: 0.0,
        exit_mass: 0.0,
        exit_day_weighted: 0.0,
        recovered_by_month: [0.0; MONTH_HORIZON],
        last_exit_month: 0,
    };

    for stage in stages {
        let share = caseload.share(&stage.id);
        if share > 0.0 {
            flow.initial_mass += share;
            queue.push_back(Packet {
                stage,
                mass: share,
                elapsed_days: 0.0,
            });
        }
    }

    let mut iterations = 0usize;
    while let Some(packet) = queue.pop_front() {
        iterations += 1;
        if iterations > iteration_cap {
            return Err(FlowSimulationError::IterationCapExceeded(iteration_cap));
        }

        let (recovery, write_off) = packet.stage.effective_probabilities();
        let recovered = packet.mass * recovery / 100.0;
        let written_off = packet.mass * write_off / 100.0;
        let transitioning = (packet.mass - recovered - written_off).max(0.0);

        let exit_day = packet.elapsed_days + packet.stage.duration_days.max;
        let exiting = recovered + written_off;
        if exiting > 0.0 {
            let month = ((exit_day / DAYS_PER_MONTH) as usize).min(MONTH_HORIZON - 1);
            flow.recovered_mass += recovered;
            flow.written_off_mass += written_off;
            flow.exit_mass += exiting;
            flow.exit_day_weighted += exiting * exit_day;
            flow.recovered_by_month[month] += recovered;
            flow.last_exit_month = flow.last_exit_month.max(month);
        }

        if transitioning <= 0.0 {
            continue;
        }
        let next = &successors[packet.stage.id.as_str()];
        if next.is_empty() {
            // Dead end: this mass leaves the balance entirely.
            continue;
        }
        let split = transitioning / next.len() as f64;
        for next_id in next {
            // successor_map only returns ids present in the stage map
            let stage = map[next_id];
            queue.push_back(Packet {
                stage,
                mass: split,
                elapsed_days: exit_day,
            });
        }
    }

    Ok(flow)
}

/// Overall recovery rate (0-100) across the whole process.
pub fn overall_recovery_rate(
    stages: &[Stage],
    caseload: &CaseloadDistribution,
) -> Result<f64, FlowSimulationError> {
    Ok(propagate(stages, caseload)?.recovery_rate_percent())
}

/// Mass-weighted average days until a case exits the process (recovered or
/// written off). Cap exhaustion degrades to `INFINITY`; no exiting mass is 0.
pub fn average_collection_time(stages: &[Stage], caseload: &CaseloadDistribution) -> f64 {
    match propagate(stages, caseload) {
        Err(_) => f64::INFINITY,
        Ok(flow) if flow.exit_mass <= 0.0 => 0.0,
        Ok(flow) => flow.exit_day_weighted / flow.exit_mass,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome {
    pub recovery_rate_percent: f64,
    pub monthly_income: [f64; MODELED_MONTHS],
    pub monthly_variable_labor: [f64; MODELED_MONTHS],
}

/// Monthly allocation over the modeled year. Recovered mass per 30-day month
/// becomes that month's income (one percentage point of mass is worth
/// `portfolio_value / 100`); mass completing beyond the modeled year is
/// reconciled back into the twelve buckets so the array totals the expected
/// recovery value exactly. The caseload-driven labor cost spreads evenly
/// across the active months.
pub fn simulate_flow(
    stages: &[Stage],
    caseload: &CaseloadDistribution,
    portfolio_value: f64,
    annual_caseload_labor_cost: f64,
) -> Result<FlowOutcome, FlowSimulationError> {
    let flow = propagate(stages, caseload)?;

    let value_per_point = portfolio_value / 100.0;
    let mut monthly_income = [0.0; MODELED_MONTHS];
    for (month, recovered) in flow.recovered_by_month.iter().enumerate().take(MODELED_MONTHS) {
        monthly_income[month] = recovered * value_per_point;
    }
    let expected_income = flow.recovered_mass * value_per_point;
    reconcile_to_total(&mut monthly_income, expected_income);

    let mut monthly_variable_labor = [0.0; MODELED_MONTHS];
    if annual_caseload_labor_cost > 0.0 {
        let active_months = if flow.exit_mass > 0.0 {
            (flow.last_exit_month + 1).min(MODELED_MONTHS)
        } else {
            1
        };
        let per_month = annual_caseload_labor_cost / active_months as f64;
        for month in monthly_variable_labor.iter_mut().take(active_months) {
            *month = per_month;
        }
    }

    Ok(FlowOutcome {
        recovery_rate_percent: flow.recovery_rate_percent(),
        monthly_income,
        monthly_variable_labor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{caseload, flow_stage};

    #[test]
    fn single_stage_recovery_leaves_unrouted_mass_out_of_totals() {
        // 30% recovered, 20% written off, 50% transitions to nowhere.
        let stages = vec![flow_stage("s1", 10.0, 30.0, 20.0, &[])];
        let distribution = caseload(&[("s1", 100.0)]);

        let flow = propagate(&stages, &distribution).unwrap();
        assert_eq!(flow.recovery_rate_percent(), 30.0);
        assert_eq!(flow.written_off_mass, 20.0);
        assert_eq!(flow.exit_mass, 50.0);
    }

    #[test]
    fn oversized_probability_sum_clamps_write_off_in_simulation() {
        let stages = vec![flow_stage("s1", 10.0, 70.0, 50.0, &[])];
        let distribution = caseload(&[("s1", 100.0)]);

        let flow = propagate(&stages, &distribution).unwrap();
        assert_eq!(flow.recovered_mass, 70.0);
        assert_eq!(flow.written_off_mass, 30.0);
    }

    #[test]
    fn chain_accumulates_recovery_across_stages() {
        let stages = vec![
            flow_stage("a", 10.0, 50.0, 0.0, &["b"]),
            flow_stage("b", 20.0, 100.0, 0.0, &[]),
        ];
        let distribution = caseload(&[("a", 100.0)]);

        let rate = overall_recovery_rate(&stages, &distribution).unwrap();
        assert!((rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn transitioning_mass_splits_evenly_across_successors() {
        let stages = vec![
            flow_stage("a", 10.0, 0.0, 0.0, &["b", "c"]),
            flow_stage("b", 10.0, 100.0, 0.0, &[]),
            flow_stage("c", 10.0, 50.0, 0.0, &[]),
        ];
        let distribution = caseload(&[("a", 100.0)]);

        // 50 enters each branch: b recovers 50, c recovers 25.
        let rate = overall_recovery_rate(&stages, &distribution).unwrap();
        assert!((rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn cyclic_successors_hit_the_iteration_cap() {
        let stages = vec![
            flow_stage("a", 10.0, 0.0, 0.0, &["b"]),
            flow_stage("b", 10.0, 0.0, 0.0, &["a"]),
        ];
        let distribution = caseload(&[("a", 100.0)]);

        let error = propagate(&stages, &distribution).unwrap_err();
        assert_eq!(error, FlowSimulationError::IterationCapExceeded(4));
        assert_eq!(average_collection_time(&stages, &distribution), f64::INFINITY);
    }

    #[test]
    fn average_collection_time_weights_exits_by_elapsed_duration() {
        // All mass exits at b after 10 + 20 days.
        let stages = vec![
            flow_stage("a", 10.0, 0.0, 0.0, &["b"]),
            flow_stage("b", 20.0, 100.0, 0.0, &[]),
        ];
        let distribution = caseload(&[("a", 100.0)]);
        assert!((average_collection_time(&stages, &distribution) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn average_collection_time_mixes_exit_points_by_mass() {
        // Half exits at a (day 10), the rest at b (day 30): mean is 20.
        let stages = vec![
            flow_stage("a", 10.0, 50.0, 0.0, &["b"]),
            flow_stage("b", 20.0, 100.0, 0.0, &[]),
        ];
        let distribution = caseload(&[("a", 100.0)]);
        assert!((average_collection_time(&stages, &distribution) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn no_exits_means_zero_average_time() {
        let stages = vec![flow_stage("a", 10.0, 0.0, 0.0, &[])];
        let distribution = caseload(&[("a", 100.0)]);
        assert_eq!(average_collection_time(&stages, &distribution), 0.0);
    }

    #[test]
    fn monthly_income_lands_in_the_completion_month() {
        // Exit day 40 falls into month 1 (30-day months).
        let stages = vec![flow_stage("s1", 40.0, 100.0, 0.0, &[])];
        let distribution = caseload(&[("s1", 100.0)]);

        let outcome = simulate_flow(&stages, &distribution, 1_000_000.0, 0.0).unwrap();
        assert!((outcome.monthly_income[1] - 1_000_000.0).abs() < 1e-6);
        assert!((outcome.monthly_income.iter().sum::<f64>() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn income_beyond_the_modeled_year_reconciles_into_the_array() {
        // Exit day 400 is month 13; the whole value must still appear in the
        // twelve modeled buckets (first-bucket fallback).
        let stages = vec![flow_stage("s1", 400.0, 100.0, 0.0, &[])];
        let distribution = caseload(&[("s1", 100.0)]);

        let outcome = simulate_flow(&stages, &distribution, 500_000.0, 0.0).unwrap();
        assert!((outcome.monthly_income.iter().sum::<f64>() - 500_000.0).abs() < 1e-6);
        assert!((outcome.monthly_income[0] - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn variable_labor_spreads_evenly_across_active_months() {
        let stages = vec![flow_stage("s1", 70.0, 100.0, 0.0, &[])];
        let distribution = caseload(&[("s1", 100.0)]);

        // Exit at day 70 => months 0..=2 active.
        let outcome = simulate_flow(&stages, &distribution, 0.0, 3_600.0).unwrap();
        assert!((outcome.monthly_variable_labor[0] - 1_200.0).abs() < 1e-9);
        assert!((outcome.monthly_variable_labor[2] - 1_200.0).abs() < 1e-9);
        assert_eq!(outcome.monthly_variable_labor[3], 0.0);
        assert!((outcome.monthly_variable_labor.iter().sum::<f64>() - 3_600.0).abs() < 1e-9);
    }

    #[test]
    fn missing_caseload_entries_enter_nothing() {
        let stages = vec![
            flow_stage("a", 10.0, 100.0, 0.0, &[]),
            flow_stage("b", 10.0, 100.0, 0.0, &[]),
        ];
        let distribution = caseload(&[("a", 60.0)]);

        let flow = propagate(&stages, &distribution).unwrap();
        assert_eq!(flow.initial_mass, 60.0);
        assert_eq!(flow.recovery_rate_percent(), 100.0);
    }
}
