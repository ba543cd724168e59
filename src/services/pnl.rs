use serde::Serialize;

use crate::domain::params::FinancialParams;
use crate::services::cash_flow::MonthlyCashFlow;

/// Annual profit and loss assembled from the monthly cash flow. Capital
/// outflows are not operating costs and stay out of the P&L.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PnLData {
    pub revenue: f64,
    pub fixed_labor: f64,
    pub variable_labor: f64,
    pub fixed_other: f64,
    pub variable_other: f64,
    pub operating_costs: f64,
    pub profit_before_tax: f64,
    pub tax: f64,
    pub net_profit: f64,
}

pub fn generate_pnl(cash_flow: &[MonthlyCashFlow], params: &FinancialParams) -> PnLData {
    let revenue: f64 = cash_flow.iter().map(|row| row.inflow).sum();
    let fixed_labor: f64 = cash_flow.iter().map(|row| row.fixed_labor).sum();
    let variable_labor: f64 = cash_flow.iter().map(|row| row.variable_labor).sum();
    let fixed_other: f64 = cash_flow.iter().map(|row| row.fixed_other).sum();
    let variable_other: f64 = cash_flow.iter().map(|row| row.variable_other).sum();

    let operating_costs = fixed_labor + variable_labor + fixed_other + variable_other;
    let profit_before_tax = revenue - operating_costs;
    let tax = profit_before_tax.max(0.0) * params.tax_rate;
    let net_profit = profit_before_tax - tax;

    PnLData {
        revenue,
        fixed_labor,
        variable_labor,
        fixed_other,
        variable_other,
        operating_costs,
        profit_before_tax,
        tax,
        net_profit,
    }
}
