use serde::Serialize;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::{format_metrics, format_pnl};
use crate::services::cash_flow::generate_cash_flow;
use crate::services::cost_schedule::monthly_cost_buckets;
use crate::services::flow_simulation::overall_recovery_rate;
use crate::services::metrics::{InvestmentMetrics, investment_metrics};
use crate::services::model_yaml::load_model_from_yaml_file;
use crate::services::pnl::{PnLData, generate_pnl};
use crate::services::report::{ReportRow, aggregate_report_data};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReportOutput {
    pub pnl: PnLData,
    pub metrics: InvestmentMetrics,
    pub statement: Vec<ReportRow>,
}

pub fn report_command(cmd: Commands) {
    if let Commands::Report { input, output } = cmd {
        let model = match load_model_from_yaml_file(&input) {
            Ok(model) => model,
            Err(e) => {
                eprintln!("Failed to load model: {e}");
                return;
            }
        };

        let cash_flow = match generate_cash_flow(&model) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Failed to generate cash flow: {e}");
                return;
            }
        };
        let recovery_rate = match overall_recovery_rate(&model.stages, &model.caseload) {
            Ok(rate) => rate,
            Err(e) => {
                eprintln!("Failed to simulate flow: {e}");
                return;
            }
        };

        let buckets = monthly_cost_buckets(&model.costs, model.modeling_year);
        let pnl = generate_pnl(&cash_flow, &model.params);
        let metrics = investment_metrics(
            &model,
            &cash_flow,
            &pnl,
            buckets.one_time_capital,
            recovery_rate,
        );
        let statement = aggregate_report_data(
            &model.costs,
            &model.staff,
            &cash_flow,
            model.modeling_year,
            &model.portfolio,
        );

        println!("{}", format_pnl(&pnl));
        println!();
        println!("{}", format_metrics(&metrics));

        if let Some(output) = output {
            let report = ReportOutput {
                pnl,
                metrics,
                statement,
            };
            let yaml = match serde_yaml::to_string(&report) {
                Ok(contents) => contents,
                Err(e) => {
                    eprintln!("Failed to serialize report: {e}");
                    return;
                }
            };
            if let Err(e) = std::fs::write(&output, yaml) {
                eprintln!("Failed to write report: {e}");
            } else {
                println!("Report written to {output}");
            }
        }
    }
}
