use plotters::prelude::*;
use thiserror::Error;

use crate::services::cash_flow::MonthlyCashFlow;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("failed to render cash-flow chart: {0}")]
    Render(String),
}

/// Monthly net cash flow as bars with the cumulative balance as a line.
pub fn write_cash_flow_png(
    output_path: &str,
    cash_flow: &[MonthlyCashFlow],
) -> Result<(), ChartError> {
    render_cash_flow_png(output_path, cash_flow)
}

fn render_cash_flow_png(
    output_path: &str,
    cash_flow: &[MonthlyCashFlow],
) -> Result<(), ChartError> {
    if cash_flow.is_empty() {
        return Ok(());
    }

    let min_value = cash_flow
        .iter()
        .flat_map(|row| [row.net, row.cumulative])
        .fold(f64::INFINITY, f64::min)
        .min(0.0);
    let max_value = cash_flow
        .iter()
        .flat_map(|row| [row.net, row.cumulative])
        .fold(f64::NEG_INFINITY, f64::max)
        .max(0.0);
    let padding = ((max_value - min_value) * 0.05).max(1.0);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let last_month = cash_flow.last().map(|row| row.month as i32).unwrap_or(1);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Monthly Cash Flow", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(85)
        .build_cartesian_2d(0..last_month + 1, (min_value - padding)..(max_value + padding))
        .map_err(|e| ChartError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Month")
        .y_desc("Amount")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(cash_flow.iter().map(|row| {
            let month = row.month as i32;
            let (low, high) = if row.net >= 0.0 { (0.0, row.net) } else { (row.net, 0.0) };
            Rectangle::new([(month, low), (month + 1, high)], bar_style)
        }))
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let line_color = RGBColor(204, 84, 30);
    chart
        .draw_series(LineSeries::new(
            cash_flow.iter().map(|row| (row.month as i32, row.cumulative)),
            &line_color,
        ))
        .map_err(|e| ChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(())
}
