pub mod cash_flow;
pub mod cashflow_chart;
pub mod cost_schedule;
pub mod flow_simulation;
pub mod graph_validation;
pub mod labor_costs;
pub mod metrics;
pub mod model_yaml;
pub mod pnl;
pub mod portfolio_value;
pub mod report;
pub mod rounding;
pub mod stage_graph;
pub mod taxes;
