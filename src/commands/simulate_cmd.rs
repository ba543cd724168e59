use serde::Serialize;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_flow_summary;
use crate::services::flow_simulation::{average_collection_time, simulate_flow};
use crate::services::labor_costs::annual_caseload_labor_cost;
use crate::services::model_yaml::load_model_from_yaml_file;
use crate::services::portfolio_value::estimate_portfolio_value;
use crate::services::stage_graph::max_collection_time;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FlowSummary {
    pub recovery_rate_percent: f64,
    pub average_collection_days: f64,
    pub max_collection_days: f64,
    pub monthly_income: Vec<f64>,
    pub monthly_variable_labor: Vec<f64>,
}

pub fn simulate_command(cmd: Commands) {
    if let Commands::Simulate { input, output } = cmd {
        let model = match load_model_from_yaml_file(&input) {
            Ok(model) => model,
            Err(e) => {
                eprintln!("Failed to load model: {e}");
                return;
            }
        };

        let annual_labor = annual_caseload_labor_cost(
            &model.stages,
            &model.staff,
            &model.caseload,
            model.portfolio.total_cases,
        );
        // Monte-Carlo value when a debt sigma is declared, flat otherwise.
        let portfolio_value = estimate_portfolio_value(&model.portfolio);
        let outcome = match simulate_flow(
            &model.stages,
            &model.caseload,
            portfolio_value,
            annual_labor,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Failed to simulate flow: {e}");
                return;
            }
        };

        let summary = FlowSummary {
            recovery_rate_percent: outcome.recovery_rate_percent,
            average_collection_days: average_collection_time(&model.stages, &model.caseload),
            max_collection_days: max_collection_time(&model.stages),
            monthly_income: outcome.monthly_income.to_vec(),
            monthly_variable_labor: outcome.monthly_variable_labor.to_vec(),
        };

        println!("{}", format_flow_summary(&summary));

        if let Some(output) = output {
            let yaml = match serde_yaml::to_string(&summary) {
                Ok(contents) => contents,
                Err(e) => {
                    eprintln!("Failed to serialize flow summary: {e}");
                    return;
                }
            };
            if let Err(e) = std::fs::write(&output, yaml) {
                eprintln!("Failed to write flow summary: {e}");
            } else {
                println!("Flow summary written to {output}");
            }
        }
    }
}
