//! Investment metrics over the assembled cash flow: NPV, IRR, EBITDA,
//! break-even case count and cost per recovered case. `f64::INFINITY` is the
//! deliberate "unreachable" signal for break-even and cost per case; IRR is
//! `None` when the flow sequence admits no rate at all.

use serde::Serialize;

use crate::domain::model::Model;
use crate::services::cash_flow::MonthlyCashFlow;
use crate::services::pnl::PnLData;

const IRR_RATE_TOLERANCE: f64 = 1e-10;
const IRR_MAX_ITERATIONS: usize = 200;

/// Monthly-equivalent rate of an annual rate.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Present value of a flow sequence where `flows[0]` happens now and each
/// later entry is one month out.
fn present_value(rate: f64, flows: &[f64]) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(period, flow)| flow / (1.0 + rate).powi(period as i32))
        .sum()
}

/// NPV of the monthly nets discounted at the monthly equivalent of the
/// annual rate, minus the upfront investment.
pub fn npv(monthly_net: &[f64], annual_discount_rate: f64, initial_investment: f64) -> f64 {
    let rate = monthly_rate(annual_discount_rate);
    let mut flows = Vec::with_capacity(monthly_net.len() + 1);
    flows.push(-initial_investment);
    flows.extend_from_slice(monthly_net);
    present_value(rate, &flows)
}

/// Annualized internal rate of return of `[-investment, net…]`, found by
/// bisection on the monthly rate. `None` when the sequence has no sign
/// change (no rate exists; a rate is never fabricated) or no bracket is
/// found.
pub fn irr(initial_investment: f64, monthly_net: &[f64]) -> Option<f64> {
    let mut flows = Vec::with_capacity(monthly_net.len() + 1);
    flows.push(-initial_investment);
    flows.extend_from_slice(monthly_net);

    let has_positive = flows.iter().any(|flow| *flow > 0.0);
    let has_negative = flows.iter().any(|flow| *flow < 0.0);
    if !has_positive || !has_negative {
        return None;
    }

    let mut low = -0.9999;
    let mut high = 10.0;
    let mut value_low = present_value(low, &flows);
    let value_high = present_value(high, &flows);
    if (value_low > 0.0) == (value_high > 0.0) {
        return None;
    }

    for _ in 0..IRR_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let value_mid = present_value(mid, &flows);
        if value_mid.abs() < 1e-9 || (high - low) / 2.0 < IRR_RATE_TOLERANCE {
            return Some((1.0 + mid).powi(12) - 1.0);
        }
        if (value_low > 0.0) == (value_mid > 0.0) {
            low = mid;
            value_low = value_mid;
        } else {
            high = mid;
        }
    }

    let mid = (low + high) / 2.0;
    Some((1.0 + mid).powi(12) - 1.0)
}

/// EBITDA: profit before tax plus the straight-line annual depreciation of
/// one-time capital costs (interest is not modeled).
pub fn ebitda(profit_before_tax: f64, one_time_capital: f64, depreciation_years: u32) -> f64 {
    let years = depreciation_years.max(1) as f64;
    profit_before_tax + one_time_capital / years
}

/// Cases needed to cover fixed annual costs. Contribution margin per case is
/// the expected recovered value minus the variable cost; a non-positive
/// margin means break-even is unreachable.
pub fn break_even_cases(
    fixed_annual_costs: f64,
    average_debt_amount: f64,
    recovery_rate_percent: f64,
    variable_cost_per_case: f64,
) -> f64 {
    let expected_revenue_per_case = average_debt_amount * recovery_rate_percent / 100.0;
    let contribution_margin = expected_revenue_per_case - variable_cost_per_case;
    if contribution_margin <= 0.0 {
        f64::INFINITY
    } else {
        fixed_annual_costs / contribution_margin
    }
}

/// Total operating cost per successfully recovered case; `INFINITY` when
/// nothing is recovered.
pub fn cost_per_case(
    total_operating_costs: f64,
    total_cases: u64,
    recovery_rate_percent: f64,
) -> f64 {
    let recovered = total_cases as f64 * recovery_rate_percent / 100.0;
    if recovered <= 0.0 {
        f64::INFINITY
    } else {
        total_operating_costs / recovered
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InvestmentMetrics {
    pub initial_investment: f64,
    pub npv: f64,
    /// Annualized; absent when the cash-flow sequence defines no rate.
    pub irr: Option<f64>,
    pub ebitda: f64,
    pub break_even_cases: f64,
    pub cost_per_case: f64,
}

/// Assembles every metric from the model, its cash flow and P&L. The upfront
/// investment is the one-time capital total plus the portfolio purchase.
pub fn investment_metrics(
    model: &Model,
    cash_flow: &[MonthlyCashFlow],
    pnl: &PnLData,
    one_time_capital: f64,
    recovery_rate_percent: f64,
) -> InvestmentMetrics {
    let initial_investment = one_time_capital + model.portfolio.purchase_price();
    let monthly_net: Vec<f64> = cash_flow.iter().map(|row| row.net).collect();

    let total_cases = model.portfolio.total_cases;
    let variable_cost_per_case = if total_cases == 0 {
        0.0
    } else {
        (pnl.variable_labor + pnl.variable_other) / total_cases as f64
    };

    InvestmentMetrics {
        initial_investment,
        npv: npv(&monthly_net, model.params.discount_rate, initial_investment),
        irr: irr(initial_investment, &monthly_net),
        ebitda: ebitda(
            pnl.profit_before_tax,
            one_time_capital,
            model.params.project_duration_years,
        ),
        break_even_cases: break_even_cases(
            pnl.fixed_labor + pnl.fixed_other,
            model.portfolio.average_debt_amount,
            recovery_rate_percent,
            variable_cost_per_case,
        ),
        cost_per_case: cost_per_case(pnl.operating_costs, total_cases, recovery_rate_percent),
    }
}
