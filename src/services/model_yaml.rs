use std::collections::HashMap;
use std::io;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::cost::{
    CfActivity, CfCategory, CfDirection, CostItem, CostTag, Periodicity,
};
use crate::domain::model::Model;
use crate::domain::params::{ALLOWED_PROJECT_DURATIONS, FinancialParams, normalize_rate};
use crate::domain::portfolio::{
    CaseloadDistribution, DebtPortfolio, InitialStageDistribution,
};
use crate::domain::stage::{DurationDays, Stage, SubStage};
use crate::domain::staff::StaffType;

#[derive(Error, Debug)]
pub enum ModelYamlError {
    #[error("failed to read model yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse model yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("missing stage id")]
    MissingStageId,
    #[error("invalid date format: {0}")]
    InvalidDate(String),
    #[error("unknown cost tag: {0}")]
    UnknownCostTag(String),
    #[error("unknown cash-flow category: {0}")]
    UnknownCfCategory(String),
    #[error("unknown periodicity: {0}")]
    UnknownPeriodicity(String),
    #[error("project duration must be 1, 2 or 5 years, got {0}")]
    InvalidProjectDuration(u32),
}

#[derive(Serialize, Deserialize)]
struct ModelRecord {
    modeling_year: Option<i32>,
    stages: Vec<StageRecord>,
    staff: Option<Vec<StaffRecord>>,
    costs: Option<Vec<CostRecord>>,
    portfolio: PortfolioRecord,
    params: ParamsRecord,
    caseload: Option<HashMap<String, f64>>,
}

#[derive(Serialize, Deserialize)]
struct StageRecord {
    id: String,
    name: Option<String>,
    duration_days_min: Option<f64>,
    duration_days_max: Option<f64>,
    sub_stages: Option<Vec<SubStageRecord>>,
    depends_on: Option<Vec<String>>,
    next_stage_ids: Option<Vec<String>>,
    recovery_probability: Option<f64>,
    write_off_probability: Option<f64>,
}

#[derive(Serialize, Deserialize)]
struct SubStageRecord {
    id: Option<String>,
    name: String,
    normative_minutes: f64,
    executor_position: String,
    repetitions: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct StaffRecord {
    id: Option<String>,
    group: Option<String>,
    position: String,
    count: u32,
    monthly_salary: f64,
    monthly_working_hours: Option<f64>,
    efficiency_percent: Option<f64>,
    max_caseload: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct CostRecord {
    id: Option<String>,
    name: String,
    amount: f64,
    tag: String,
    cf_category: Option<String>,
    periodicity: String,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct PortfolioRecord {
    total_cases: u64,
    average_debt_amount: f64,
    average_debt_sigma: Option<f64>,
    initial_stage_distribution: Option<InitialStageDistributionRecord>,
    portfolio_purchase_rate: Option<f64>,
    is_initial_purchase: Option<bool>,
}

#[derive(Serialize, Deserialize)]
struct InitialStageDistributionRecord {
    soft_collection: Option<f64>,
    pre_legal: Option<f64>,
    legal: Option<f64>,
    enforcement: Option<f64>,
}

#[derive(Serialize, Deserialize)]
struct ParamsRecord {
    discount_rate: f64,
    tax_rate: f64,
    variable_commission_rate: Option<f64>,
    project_duration_years: Option<u32>,
    pay_taxes_monthly: Option<bool>,
}

pub fn load_model_from_yaml_file(path: &str) -> Result<Model, ModelYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_model_from_yaml_str(&contents)
}

pub fn deserialize_model_from_yaml_str(input: &str) -> Result<Model, ModelYamlError> {
    let record: ModelRecord = serde_yaml::from_str(input)?;

    let mut stages = Vec::with_capacity(record.stages.len());
    for stage_record in record.stages {
        stages.push(stage_from_record(stage_record)?);
    }

    let staff = record
        .staff
        .unwrap_or_default()
        .into_iter()
        .map(staff_from_record)
        .collect();

    let mut costs = Vec::new();
    for cost_record in record.costs.unwrap_or_default() {
        costs.push(cost_from_record(cost_record)?);
    }

    let duration = record.params.project_duration_years.unwrap_or(1);
    if !ALLOWED_PROJECT_DURATIONS.contains(&duration) {
        return Err(ModelYamlError::InvalidProjectDuration(duration));
    }

    let params = FinancialParams {
        discount_rate: normalize_rate("discount_rate", record.params.discount_rate),
        tax_rate: normalize_rate("tax_rate", record.params.tax_rate),
        variable_commission_rate: normalize_rate(
            "variable_commission_rate",
            record.params.variable_commission_rate.unwrap_or(0.0),
        ),
        project_duration_years: duration,
        pay_taxes_monthly: record.params.pay_taxes_monthly.unwrap_or(false),
    };

    let portfolio = DebtPortfolio {
        total_cases: record.portfolio.total_cases,
        average_debt_amount: record.portfolio.average_debt_amount,
        average_debt_sigma: record.portfolio.average_debt_sigma,
        initial_stage_distribution: record.portfolio.initial_stage_distribution.map(|d| {
            InitialStageDistribution {
                soft_collection: d.soft_collection.unwrap_or(0.0),
                pre_legal: d.pre_legal.unwrap_or(0.0),
                legal: d.legal.unwrap_or(0.0),
                enforcement: d.enforcement.unwrap_or(0.0),
            }
        }),
        portfolio_purchase_rate: normalize_rate(
            "portfolio_purchase_rate",
            record.portfolio.portfolio_purchase_rate.unwrap_or(0.0),
        ),
        is_initial_purchase: record.portfolio.is_initial_purchase.unwrap_or(false),
    };

    Ok(Model {
        stages,
        staff,
        costs,
        portfolio,
        params,
        caseload: CaseloadDistribution::new(record.caseload.unwrap_or_default()),
        modeling_year: record
            .modeling_year
            .unwrap_or_else(|| chrono::Local::now().year()),
    })
}

fn stage_from_record(record: StageRecord) -> Result<Stage, ModelYamlError> {
    if record.id.trim().is_empty() {
        return Err(ModelYamlError::MissingStageId);
    }

    let sub_stages = record
        .sub_stages
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, sub)| SubStage {
            id: sub.id.unwrap_or_else(|| format!("{}-{}", record.id, index + 1)),
            name: sub.name,
            normative_minutes: sub.normative_minutes,
            executor_position: sub.executor_position,
            repetitions: sub.repetitions.unwrap_or(1),
        })
        .collect();

    Ok(Stage {
        name: record.name.unwrap_or_else(|| record.id.clone()),
        id: record.id,
        duration_days: DurationDays {
            min: record.duration_days_min.unwrap_or(0.0),
            max: record
                .duration_days_max
                .or(record.duration_days_min)
                .unwrap_or(0.0),
        },
        sub_stages,
        depends_on: record.depends_on.unwrap_or_default(),
        next_stage_ids: record.next_stage_ids.unwrap_or_default(),
        recovery_probability: record.recovery_probability.unwrap_or(0.0),
        write_off_probability: record.write_off_probability.unwrap_or(0.0),
    })
}

fn staff_from_record(record: StaffRecord) -> StaffType {
    StaffType {
        id: record.id.unwrap_or_else(|| record.position.clone()),
        group: record.group.unwrap_or_default(),
        position: record.position,
        count: record.count,
        monthly_salary: record.monthly_salary,
        monthly_working_hours: record.monthly_working_hours.unwrap_or(160.0),
        efficiency_percent: record.efficiency_percent.unwrap_or(100.0),
        max_caseload: record.max_caseload,
    }
}

fn cost_from_record(record: CostRecord) -> Result<CostItem, ModelYamlError> {
    let tag = parse_cost_tag(&record.tag)?;
    let cf_category = match record.cf_category.as_deref() {
        Some(value) => parse_cf_category(value)?,
        None => default_cf_category(tag),
    };

    Ok(CostItem {
        id: record.id.unwrap_or_else(|| record.name.clone()),
        name: record.name,
        amount: record.amount,
        tag,
        cf_category,
        periodicity: parse_periodicity(&record.periodicity)?,
        start_date: parse_date_opt(record.start_date.as_deref())?,
        end_date: parse_date_opt(record.end_date.as_deref())?,
    })
}

fn parse_cost_tag(value: &str) -> Result<CostTag, ModelYamlError> {
    let tag = match value.trim().to_lowercase().as_str() {
        "capital" => CostTag::Capital,
        "operating" => CostTag::Operating,
        "variable" => CostTag::Variable,
        "overhead" => CostTag::Overhead,
        "other" => CostTag::Other,
        _ => return Err(ModelYamlError::UnknownCostTag(value.to_string())),
    };
    Ok(tag)
}

fn default_cf_category(tag: CostTag) -> CfCategory {
    let activity = match tag {
        CostTag::Capital => CfActivity::Investment,
        _ => CfActivity::Operating,
    };
    CfCategory {
        activity,
        direction: CfDirection::Expense,
    }
}

fn parse_cf_category(value: &str) -> Result<CfCategory, ModelYamlError> {
    let (activity, direction) = match value.trim().to_lowercase().as_str() {
        "operating_income" => (CfActivity::Operating, CfDirection::Income),
        "operating_expense" => (CfActivity::Operating, CfDirection::Expense),
        "financial_income" => (CfActivity::Financial, CfDirection::Income),
        "financial_expense" => (CfActivity::Financial, CfDirection::Expense),
        "investment_income" => (CfActivity::Investment, CfDirection::Income),
        "investment_expense" => (CfActivity::Investment, CfDirection::Expense),
        "tax_income" => (CfActivity::Tax, CfDirection::Income),
        "tax_expense" => (CfActivity::Tax, CfDirection::Expense),
        _ => return Err(ModelYamlError::UnknownCfCategory(value.to_string())),
    };
    Ok(CfCategory { activity, direction })
}

// Model files in the wild carry the original Russian periodicity labels
// alongside the snake_case ones; both spellings are accepted.
fn parse_periodicity(value: &str) -> Result<Periodicity, ModelYamlError> {
    let periodicity = match value.trim().to_lowercase().as_str() {
        "one_time" | "разовые" => Periodicity::OneTime,
        "monthly" | "ежемесячно" => Periodicity::Monthly,
        "quarterly" | "ежеквартально" => Periodicity::Quarterly,
        "yearly" | "ежегодно" => Periodicity::Yearly,
        _ => return Err(ModelYamlError::UnknownPeriodicity(value.to_string())),
    };
    Ok(periodicity)
}

fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>, ModelYamlError> {
    let text = match value {
        Some(text) => text,
        None => return Ok(None),
    };
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ModelYamlError::InvalidDate(text.to_string()))?;
    Ok(Some(date))
}
