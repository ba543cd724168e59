use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_cash_flow_table;
use crate::services::cash_flow::generate_cash_flow;
use crate::services::cashflow_chart::write_cash_flow_png;
use crate::services::model_yaml::load_model_from_yaml_file;

pub fn cashflow_command(cmd: Commands) {
    if let Commands::Cashflow { input, output, chart } = cmd {
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

        println!("{}", format_cash_flow_table(&cash_flow));

        if let Some(chart) = chart {
            if let Err(e) = write_cash_flow_png(&chart, &cash_flow) {
                eprintln!("Failed to write cash-flow chart: {e}");
            } else {
                println!("Cash-flow chart written to {chart}");
            }
        }

        if let Some(output) = output {
            let yaml = match serde_yaml::to_string(&cash_flow) {
                Ok(contents) => contents,
                Err(e) => {
                    eprintln!("Failed to serialize cash flow: {e}");
                    return;
                }
            };
            if let Err(e) = std::fs::write(&output, yaml) {
                eprintln!("Failed to write cash flow: {e}");
            } else {
                println!("Cash flow written to {output}");
            }
        }
    }
}
