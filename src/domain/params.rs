/// Financial parameters of the model.
///
/// All rates are fractions in 0-1. The YAML boundary normalizes
/// percent-looking inputs (see `services::model_yaml`); nothing past that
/// boundary converts units again.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialParams {
    pub discount_rate: f64,
    pub tax_rate: f64,
    pub variable_commission_rate: f64,
    /// Allowed values: 1, 2 or 5.
    pub project_duration_years: u32,
    /// Corporate-tax remittance cadence: monthly when set, quarterly otherwise.
    pub pay_taxes_monthly: bool,
}

pub const ALLOWED_PROJECT_DURATIONS: [u32; 3] = [1, 2, 5];

/// Normalizes a rate to the fraction convention. Values above 1.0 are read
/// as percentages and divided by 100, with a warning naming the field.
pub fn normalize_rate(field: &str, value: f64) -> f64 {
    if value > 1.0 {
        log::warn!("{field} = {value} looks like a percentage, treating as {}", value / 100.0);
        value / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rate_keeps_fractions_untouched() {
        assert_eq!(normalize_rate("discount_rate", 0.2), 0.2);
        assert_eq!(normalize_rate("discount_rate", 1.0), 1.0);
        assert_eq!(normalize_rate("discount_rate", 0.0), 0.0);
    }

    #[test]
    fn normalize_rate_divides_percent_inputs_by_100() {
        assert_eq!(normalize_rate("tax_rate", 20.0), 0.2);
        assert_eq!(normalize_rate("tax_rate", 100.0), 1.0);
    }
}
