//! Assembles the 12-month cash flow from the flow simulation, the payroll
//! and the cost schedule. Corporate tax is computed separately and carried
//! on the row for report purposes; it is not part of `net`.

use serde::Serialize;

use crate::domain::model::Model;
use crate::services::cost_schedule::{MONTHS, monthly_cost_buckets};
use crate::services::flow_simulation::{FlowSimulationError, simulate_flow};
use crate::services::labor_costs::{annual_caseload_labor_cost, monthly_fixed_labor_cost};
use crate::services::taxes::{ContributionSchedule, corporate_tax_payments};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthlyCashFlow {
    /// 1-12.
    pub month: u32,
    pub inflow: f64,
    pub fixed_labor: f64,
    pub variable_labor: f64,
    pub fixed_other: f64,
    pub variable_other: f64,
    pub capital: f64,
    /// Corporate tax remitted this month.
    pub tax: f64,
    pub net: f64,
    pub cumulative: f64,
}

pub fn generate_cash_flow(model: &Model) -> Result<Vec<MonthlyCashFlow>, FlowSimulationError> {
    let annual_labor = annual_caseload_labor_cost(
        &model.stages,
        &model.staff,
        &model.caseload,
        model.portfolio.total_cases,
    );
    let outcome = simulate_flow(
        &model.stages,
        &model.caseload,
        model.portfolio.face_value(),
        annual_labor,
    )?;

    let buckets = monthly_cost_buckets(&model.costs, model.modeling_year);
    let fixed_labor = monthly_fixed_labor_cost(&model.staff, &ContributionSchedule::default());
    let commission_rate = model.params.variable_commission_rate;

    let mut profit_before_tax = [0.0; MONTHS];
    let mut rows = Vec::with_capacity(MONTHS);
    let mut cumulative = 0.0;

    for month in 0..MONTHS {
        let inflow = outcome.monthly_income[month];
        let variable_labor = outcome.monthly_variable_labor[month];
        let variable_other = buckets.variable_other[month] + inflow * commission_rate;
        let fixed_other = buckets.fixed_other[month];
        let capital = buckets.capital[month];

        profit_before_tax[month] =
            inflow - fixed_labor - variable_labor - fixed_other - variable_other;

        let net = inflow - (fixed_labor + variable_labor + fixed_other + variable_other + capital);
        cumulative += net;

        rows.push(MonthlyCashFlow {
            month: month as u32 + 1,
            inflow,
            fixed_labor,
            variable_labor,
            fixed_other,
            variable_other,
            capital,
            tax: 0.0,
            net,
            cumulative,
        });
    }

    let tax = corporate_tax_payments(
        &profit_before_tax,
        model.params.tax_rate,
        model.params.pay_taxes_monthly,
    );
    for (row, payment) in rows.iter_mut().zip(tax) {
        row.tax = payment;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::small_model;

    #[test]
    fn cash_flow_has_twelve_months_with_running_cumulative() {
        let model = small_model();
        let rows = generate_cash_flow(&model).unwrap();

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows[11].month, 12);

        let mut running = 0.0;
        for row in &rows {
            running += row.net;
            assert!((row.cumulative - running).abs() < 1e-6);
        }
    }

    #[test]
    fn net_excludes_tax_but_includes_every_cost_bucket() {
        let model = small_model();
        let rows = generate_cash_flow(&model).unwrap();

        for row in &rows {
            let expected = row.inflow
                - (row.fixed_labor
                    + row.variable_labor
                    + row.fixed_other
                    + row.variable_other
                    + row.capital);
            assert!((row.net - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn commission_scales_with_monthly_inflow() {
        let mut model = small_model();
        model.params.variable_commission_rate = 0.0;
        let without = generate_cash_flow(&model).unwrap();

        model.params.variable_commission_rate = 0.1;
        let with = generate_cash_flow(&model).unwrap();

        for (before, after) in without.iter().zip(&with) {
            let expected = before.variable_other + 0.1 * before.inflow;
            assert!((after.variable_other - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn total_inflow_matches_expected_recovery_value() {
        let model = small_model();
        let rows = generate_cash_flow(&model).unwrap();
        let total: f64 = rows.iter().map(|row| row.inflow).sum();
        assert!(total > 0.0);
        // The simulator reconciles monthly income to face value times the
        // recovery rate; the cash flow must preserve that aggregate.
        assert!(total <= model.portfolio.face_value() + 1e-6);
    }
}
