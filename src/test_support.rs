use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::cost::{CfActivity, CfCategory, CfDirection, CostItem, CostTag, Periodicity};
use crate::domain::model::Model;
use crate::domain::params::FinancialParams;
use crate::domain::portfolio::{CaseloadDistribution, DebtPortfolio};
use crate::domain::stage::{DurationDays, Stage, SubStage};
use crate::domain::staff::StaffType;
use crate::services::cash_flow::MonthlyCashFlow;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A stage carrying only `depends_on` edges, for critical-path tests.
pub fn chain_stage(id: &str, max_days: f64, deps: &[&str]) -> Stage {
    Stage {
        id: id.to_string(),
        name: id.to_string(),
        duration_days: DurationDays { min: 0.0, max: max_days },
        sub_stages: Vec::new(),
        depends_on: deps.iter().map(|dep| (*dep).to_string()).collect(),
        next_stage_ids: Vec::new(),
        recovery_probability: 0.0,
        write_off_probability: 0.0,
    }
}

/// A stage carrying only `next_stage_ids` edges, for flow-simulation tests.
pub fn flow_stage(id: &str, max_days: f64, recovery: f64, write_off: f64, next: &[&str]) -> Stage {
    Stage {
        id: id.to_string(),
        name: id.to_string(),
        duration_days: DurationDays { min: 0.0, max: max_days },
        sub_stages: Vec::new(),
        depends_on: Vec::new(),
        next_stage_ids: next.iter().map(|n| (*n).to_string()).collect(),
        recovery_probability: recovery,
        write_off_probability: write_off,
    }
}

pub fn sub_stage(name: &str, minutes: f64, position: &str, repetitions: u32) -> SubStage {
    SubStage {
        id: name.to_string(),
        name: name.to_string(),
        normative_minutes: minutes,
        executor_position: position.to_string(),
        repetitions,
    }
}

pub fn staff_type(
    position: &str,
    count: u32,
    monthly_salary: f64,
    monthly_working_hours: f64,
    efficiency_percent: f64,
) -> StaffType {
    StaffType {
        id: position.to_string(),
        group: String::new(),
        position: position.to_string(),
        count,
        monthly_salary,
        monthly_working_hours,
        efficiency_percent,
        max_caseload: None,
    }
}

pub fn cost_item(
    name: &str,
    amount: f64,
    tag: CostTag,
    periodicity: Periodicity,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> CostItem {
    let activity = match tag {
        CostTag::Capital => CfActivity::Investment,
        _ => CfActivity::Operating,
    };
    CostItem {
        id: name.to_string(),
        name: name.to_string(),
        amount,
        tag,
        cf_category: CfCategory {
            activity,
            direction: CfDirection::Expense,
        },
        periodicity,
        start_date,
        end_date,
    }
}

pub fn caseload(shares: &[(&str, f64)]) -> CaseloadDistribution {
    CaseloadDistribution::new(
        shares
            .iter()
            .map(|(id, share)| ((*id).to_string(), *share))
            .collect::<HashMap<_, _>>(),
    )
}

pub fn financial_params(discount_rate: f64, tax_rate: f64) -> FinancialParams {
    FinancialParams {
        discount_rate,
        tax_rate,
        variable_commission_rate: 0.0,
        project_duration_years: 1,
        pay_taxes_monthly: false,
    }
}

pub fn month_row(
    month: u32,
    inflow: f64,
    fixed_labor: f64,
    variable_labor: f64,
    fixed_other: f64,
    variable_other: f64,
) -> MonthlyCashFlow {
    MonthlyCashFlow {
        month,
        inflow,
        fixed_labor,
        variable_labor,
        fixed_other,
        variable_other,
        capital: 0.0,
        tax: 0.0,
        net: inflow - (fixed_labor + variable_labor + fixed_other + variable_other),
        cumulative: 0.0,
    }
}

/// A two-stage collection process that passes validation without warnings:
/// both edge sets are symmetric, the caseload sums to 100 and every substage
/// executor matches a staff position.
pub fn small_model() -> Model {
    let mut soft = flow_stage("soft", 30.0, 40.0, 10.0, &["legal"]);
    soft.name = "Soft collection".to_string();
    soft.sub_stages = vec![sub_stage("Outbound call", 20.0, "Collector", 2)];

    let mut legal = flow_stage("legal", 60.0, 50.0, 50.0, &[]);
    legal.name = "Legal recovery".to_string();
    legal.depends_on = vec!["soft".to_string()];
    legal.sub_stages = vec![sub_stage("File claim", 90.0, "Lawyer", 1)];

    Model {
        stages: vec![soft, legal],
        staff: vec![
            staff_type("Collector", 4, 90_000.0, 160.0, 100.0),
            staff_type("Lawyer", 2, 120_000.0, 160.0, 100.0),
        ],
        costs: vec![
            cost_item("Office rent", 150_000.0, CostTag::Overhead, Periodicity::Monthly, None, None),
            cost_item("SMS gateway", 20_000.0, CostTag::Variable, Periodicity::Monthly, None, None),
            cost_item("Laptops", 300_000.0, CostTag::Capital, Periodicity::OneTime, None, None),
        ],
        portfolio: DebtPortfolio {
            total_cases: 1_000,
            average_debt_amount: 50_000.0,
            average_debt_sigma: None,
            initial_stage_distribution: None,
            portfolio_purchase_rate: 0.0,
            is_initial_purchase: false,
        },
        params: financial_params(0.2, 0.2),
        caseload: caseload(&[("soft", 70.0), ("legal", 30.0)]),
        modeling_year: 2026,
    }
}
