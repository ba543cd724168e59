use crate::commands::simulate_cmd::FlowSummary;
use crate::services::cash_flow::MonthlyCashFlow;
use crate::services::graph_validation::ModelWarning;
use crate::services::metrics::InvestmentMetrics;
use crate::services::pnl::PnLData;

pub fn format_flow_summary(summary: &FlowSummary) -> String {
    let mut lines = Vec::new();
    lines.push("Flow Simulation Summary".to_string());
    lines.push(format!(
        "Recovery rate: {:.2}%",
        summary.recovery_rate_percent
    ));
    lines.push(format!(
        "Average collection time: {}",
        format_days(summary.average_collection_days)
    ));
    lines.push(format!(
        "Maximum collection time: {}",
        format_days(summary.max_collection_days)
    ));
    lines.push(String::new());
    lines.push("Month | Income | Caseload labor".to_string());
    lines.push("------|--------|---------------".to_string());
    for (month, (income, labor)) in summary
        .monthly_income
        .iter()
        .zip(&summary.monthly_variable_labor)
        .enumerate()
    {
        lines.push(format!("{} | {income:.2} | {labor:.2}", month + 1));
    }
    lines.join("\n")
}

pub fn format_cash_flow_table(cash_flow: &[MonthlyCashFlow]) -> String {
    let mut lines = Vec::new();
    lines.push("Monthly Cash Flow".to_string());
    lines.push(
        "Month | Inflow | Fixed labor | Variable labor | Fixed other | Variable other | Capital | Tax | Net | Cumulative"
            .to_string(),
    );
    lines.push(
        "------|--------|-------------|----------------|-------------|----------------|---------|-----|-----|-----------"
            .to_string(),
    );
    for row in cash_flow {
        lines.push(format!(
            "{} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2}",
            row.month,
            row.inflow,
            row.fixed_labor,
            row.variable_labor,
            row.fixed_other,
            row.variable_other,
            row.capital,
            row.tax,
            row.net,
            row.cumulative
        ));
    }
    lines.join("\n")
}

pub fn format_pnl(pnl: &PnLData) -> String {
    let mut lines = Vec::new();
    lines.push("Profit and Loss".to_string());
    lines.push(format!("Revenue: {:.2}", pnl.revenue));
    lines.push(format!("Fixed labor: {:.2}", pnl.fixed_labor));
    lines.push(format!("Variable labor: {:.2}", pnl.variable_labor));
    lines.push(format!("Fixed other: {:.2}", pnl.fixed_other));
    lines.push(format!("Variable other: {:.2}", pnl.variable_other));
    lines.push(format!("Operating costs: {:.2}", pnl.operating_costs));
    lines.push(format!("Profit before tax: {:.2}", pnl.profit_before_tax));
    lines.push(format!("Tax: {:.2}", pnl.tax));
    lines.push(format!("Net profit: {:.2}", pnl.net_profit));
    lines.join("\n")
}

pub fn format_metrics(metrics: &InvestmentMetrics) -> String {
    let irr = match metrics.irr {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Investment Metrics".to_string());
    lines.push(format!(
        "Initial investment: {:.2}",
        metrics.initial_investment
    ));
    lines.push(format!("NPV: {:.2}", metrics.npv));
    lines.push(format!("IRR: {irr}"));
    lines.push(format!("EBITDA: {:.2}", metrics.ebitda));
    lines.push(format!(
        "Break-even cases: {}",
        format_cases(metrics.break_even_cases)
    ));
    lines.push(format!(
        "Cost per recovered case: {}",
        format_cases(metrics.cost_per_case)
    ));
    lines.join("\n")
}

pub fn format_warnings(warnings: &[ModelWarning]) -> String {
    if warnings.is_empty() {
        return "Model check passed, no issues found".to_string();
    }

    let mut lines = vec![format!("Model check found {} issue(s):", warnings.len())];
    for warning in warnings {
        lines.push(format!("- {warning}"));
    }
    lines.join("\n")
}

fn format_days(days: f64) -> String {
    if days.is_infinite() {
        "unbounded (cyclic process)".to_string()
    } else {
        format!("{days:.1} days")
    }
}

fn format_cases(value: f64) -> String {
    if value.is_infinite() {
        "unreachable".to_string()
    } else {
        format!("{value:.2}")
    }
}
