//! Cash-flow-statement report: hierarchical category rows over the eight
//! {Operating, Financial, Investment, Tax} × {Income, Expense} groups, each
//! followed by its line rows with monthly amounts. Declared cost items are
//! grouped by their `cf_category`; collections, payroll, corporate tax and
//! the portfolio purchase are synthesized from the other calculators.

use serde::Serialize;

use crate::domain::cost::{CfActivity, CfCategory, CfDirection, CostItem};
use crate::domain::portfolio::DebtPortfolio;
use crate::domain::staff::StaffType;
use crate::services::cash_flow::MonthlyCashFlow;
use crate::services::cost_schedule::{MONTHS, item_monthly_amounts};
use crate::services::labor_costs::monthly_fixed_labor_cost;
use crate::services::taxes::ContributionSchedule;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRowKind {
    Category,
    Line,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub kind: ReportRowKind,
    pub label: String,
    pub monthly: Vec<f64>,
    pub total: f64,
}

const CATEGORY_ORDER: [CfCategory; 8] = [
    CfCategory { activity: CfActivity::Operating, direction: CfDirection::Income },
    CfCategory { activity: CfActivity::Operating, direction: CfDirection::Expense },
    CfCategory { activity: CfActivity::Investment, direction: CfDirection::Income },
    CfCategory { activity: CfActivity::Investment, direction: CfDirection::Expense },
    CfCategory { activity: CfActivity::Financial, direction: CfDirection::Income },
    CfCategory { activity: CfActivity::Financial, direction: CfDirection::Expense },
    CfCategory { activity: CfActivity::Tax, direction: CfDirection::Income },
    CfCategory { activity: CfActivity::Tax, direction: CfDirection::Expense },
];

pub fn aggregate_report_data(
    costs: &[CostItem],
    staff: &[StaffType],
    cash_flow: &[MonthlyCashFlow],
    modeling_year: i32,
    portfolio: &DebtPortfolio,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();

    for category in CATEGORY_ORDER {
        let mut lines: Vec<(String, [f64; MONTHS])> = Vec::new();

        if category.activity == CfActivity::Operating {
            if category.direction == CfDirection::Income {
                let mut inflow = [0.0; MONTHS];
                for (month, row) in cash_flow.iter().enumerate().take(MONTHS) {
                    inflow[month] = row.inflow;
                }
                if inflow.iter().any(|amount| *amount != 0.0) {
                    lines.push(("Collections".to_string(), inflow));
                }
            } else {
                lines.extend(payroll_lines(staff));
                let mut caseload_labor = [0.0; MONTHS];
                for (month, row) in cash_flow.iter().enumerate().take(MONTHS) {
                    caseload_labor[month] = row.variable_labor;
                }
                if caseload_labor.iter().any(|amount| *amount != 0.0) {
                    lines.push(("Caseload labor".to_string(), caseload_labor));
                }
            }
        }

        if category.activity == CfActivity::Investment
            && category.direction == CfDirection::Expense
            && portfolio.purchase_price() > 0.0
        {
            let mut purchase = [0.0; MONTHS];
            purchase[0] = portfolio.purchase_price();
            lines.push(("Portfolio purchase".to_string(), purchase));
        }

        if category.activity == CfActivity::Tax && category.direction == CfDirection::Expense {
            let mut tax = [0.0; MONTHS];
            for (month, row) in cash_flow.iter().enumerate().take(MONTHS) {
                tax[month] = row.tax;
            }
            if tax.iter().any(|amount| *amount != 0.0) {
                lines.push(("Corporate tax".to_string(), tax));
            }
        }

        for item in costs.iter().filter(|item| item.cf_category == category) {
            lines.push((item.name.clone(), item_monthly_amounts(item, modeling_year)));
        }

        if lines.is_empty() {
            continue;
        }

        let mut category_monthly = [0.0; MONTHS];
        for (_, monthly) in &lines {
            for (total, amount) in category_monthly.iter_mut().zip(monthly) {
                *total += amount;
            }
        }
        rows.push(row(ReportRowKind::Category, category.label(), category_monthly));
        for (label, monthly) in lines {
            rows.push(row(ReportRowKind::Line, label, monthly));
        }
    }

    rows
}

fn payroll_lines(staff: &[StaffType]) -> Vec<(String, [f64; MONTHS])> {
    let schedule = ContributionSchedule::default();
    staff
        .iter()
        .map(|entry| {
            let monthly_cost =
                monthly_fixed_labor_cost(std::slice::from_ref(entry), &schedule);
            (format!("Payroll: {}", entry.position), [monthly_cost; MONTHS])
        })
        .collect()
}

fn row(kind: ReportRowKind, label: String, monthly: [f64; MONTHS]) -> ReportRow {
    let total = monthly.iter().sum();
    ReportRow {
        kind,
        label,
        monthly: monthly.to_vec(),
        total,
    }
}
