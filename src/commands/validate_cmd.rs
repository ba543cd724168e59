use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_warnings;
use crate::services::graph_validation::validate_model;
use crate::services::model_yaml::load_model_from_yaml_file;

pub fn validate_command(cmd: Commands) {
    if let Commands::Validate { input } = cmd {
        let model = match load_model_from_yaml_file(&input) {
            Ok(model) => model,
            Err(e) => {
                eprintln!("Failed to load model: {e}");
                return;
            }
        };

        let warnings = validate_model(&model);
        println!("{}", format_warnings(&warnings));
    }
}
