//! Tax schedules: the progressive personal-income-tax brackets, the employer
//! contribution schedule, and corporate-tax remittance timing.

/// Progressive PIT brackets: upper bound of annual income and the marginal
/// rate applied to the slice below it.
const PIT_BRACKETS: [(f64, f64); 5] = [
    (2_400_000.0, 0.13),
    (5_000_000.0, 0.15),
    (20_000_000.0, 0.18),
    (50_000_000.0, 0.20),
    (f64::INFINITY, 0.22),
];

/// Personal income tax on an annual income. Each higher rate applies only to
/// the increment above the previous bracket boundary.
pub fn personal_income_tax(annual_income: f64) -> f64 {
    let income = annual_income.max(0.0);
    let mut tax = 0.0;
    let mut lower = 0.0;

    for (upper, rate) in PIT_BRACKETS {
        if income <= lower {
            break;
        }
        let taxable = income.min(upper) - lower;
        tax += taxable * rate;
        lower = upper;
    }

    tax
}

/// Employer contribution rates and caps, per employee per year.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSchedule {
    pub pension_rate: f64,
    /// Rate applied to income above the pension base limit.
    pub pension_rate_above_limit: f64,
    pub pension_income_limit: f64,
    pub social_rate: f64,
    /// No social charge above this limit.
    pub social_income_limit: f64,
    pub medical_rate: f64,
    pub accident_rate: f64,
}

impl Default for ContributionSchedule {
    fn default() -> Self {
        Self {
            pension_rate: 0.22,
            pension_rate_above_limit: 0.10,
            pension_income_limit: 2_225_000.0,
            social_rate: 0.029,
            social_income_limit: 2_225_000.0,
            medical_rate: 0.051,
            accident_rate: 0.002,
        }
    }
}

/// Total employer contributions on one employee's annual income: pension
/// (reduced rate above the base limit), social (capped), medical and
/// accident insurance (both flat and uncapped).
pub fn employer_contributions(annual_income: f64, schedule: &ContributionSchedule) -> f64 {
    let income = annual_income.max(0.0);

    let pension = if income <= schedule.pension_income_limit {
        income * schedule.pension_rate
    } else {
        schedule.pension_income_limit * schedule.pension_rate
            + (income - schedule.pension_income_limit) * schedule.pension_rate_above_limit
    };

    let social = income.min(schedule.social_income_limit) * schedule.social_rate;
    let medical = income * schedule.medical_rate;
    let accident = income * schedule.accident_rate;

    pension + social + medical + accident
}

/// Corporate-tax payments by month over the modeled year.
///
/// Monthly mode: tax on month i's positive profit-before-tax is paid in
/// month i+1; December's liability settles after the modeled year and is
/// not in the array.
///
/// Quarterly mode: profit accumulates across the fiscal year; at each
/// quarter end the non-negative difference between cumulative tax due and
/// tax already paid is remitted in the following month (April, July,
/// October; Q4 settles into March of the next year, outside the array).
pub fn corporate_tax_payments(
    profit_before_tax: &[f64; 12],
    tax_rate: f64,
    pay_monthly: bool,
) -> [f64; 12] {
    let mut payments = [0.0; 12];

    if pay_monthly {
        for month in 0..11 {
            let due = profit_before_tax[month].max(0.0) * tax_rate;
            payments[month + 1] = due;
        }
        return payments;
    }

    let mut cumulative_profit = 0.0;
    let mut paid_this_year = 0.0;
    for quarter in 0..4 {
        cumulative_profit += profit_before_tax[quarter * 3..quarter * 3 + 3]
            .iter()
            .sum::<f64>();
        let due_to_date = cumulative_profit.max(0.0) * tax_rate;
        let payment = (due_to_date - paid_this_year).max(0.0);
        paid_this_year += payment;

        // Q4 settles in March of the following year.
        if quarter < 3 {
            payments[quarter * 3 + 3] = payment;
        }
    }

    payments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pit_applies_base_rate_below_first_boundary() {
        assert!((personal_income_tax(1_000_000.0) - 130_000.0).abs() < 1e-6);
    }

    #[test]
    fn pit_applies_higher_rates_only_to_increments() {
        // 2.4M * 13% + 0.6M * 15% = 312_000 + 90_000.
        assert!((personal_income_tax(3_000_000.0) - 402_000.0).abs() < 1e-6);
    }

    #[test]
    fn pit_walks_every_bracket_for_large_incomes() {
        let expected = 2_400_000.0 * 0.13
            + 2_600_000.0 * 0.15
            + 15_000_000.0 * 0.18
            + 30_000_000.0 * 0.20
            + 10_000_000.0 * 0.22;
        assert!((personal_income_tax(60_000_000.0) - expected).abs() < 1e-3);
    }

    #[test]
    fn pit_is_zero_on_non_positive_income() {
        assert_eq!(personal_income_tax(0.0), 0.0);
        assert_eq!(personal_income_tax(-5.0), 0.0);
    }

    #[test]
    fn contributions_below_the_base_limit_use_full_rates() {
        let schedule = ContributionSchedule::default();
        let income = 1_000_000.0;
        let expected = income * (0.22 + 0.029 + 0.051 + 0.002);
        assert!((employer_contributions(income, &schedule) - expected).abs() < 1e-6);
    }

    #[test]
    fn contributions_above_the_limit_reduce_pension_and_cap_social() {
        let schedule = ContributionSchedule::default();
        let income = 3_000_000.0;
        let expected = 2_225_000.0 * 0.22
            + (income - 2_225_000.0) * 0.10
            + 2_225_000.0 * 0.029
            + income * 0.051
            + income * 0.002;
        assert!((employer_contributions(income, &schedule) - expected).abs() < 1e-6);
    }

    #[test]
    fn monthly_tax_pays_one_month_in_arrears() {
        let mut profit = [0.0; 12];
        profit[0] = 100_000.0;
        profit[1] = -50_000.0;
        profit[2] = 200_000.0;

        let payments = corporate_tax_payments(&profit, 0.2, true);
        assert_eq!(payments[0], 0.0);
        assert!((payments[1] - 20_000.0).abs() < 1e-9);
        assert_eq!(payments[2], 0.0); // losses owe nothing
        assert!((payments[3] - 40_000.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_december_liability_falls_outside_the_year() {
        let mut profit = [0.0; 12];
        profit[11] = 1_000_000.0;
        let payments = corporate_tax_payments(&profit, 0.2, true);
        assert_eq!(payments.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn quarterly_tax_settles_the_cumulative_difference() {
        let mut profit = [0.0; 12];
        // Q1: 300k profit, Q2: 100k loss, Q3: 200k profit.
        profit[0] = 300_000.0;
        profit[3] = -100_000.0;
        profit[6] = 200_000.0;

        let payments = corporate_tax_payments(&profit, 0.2, false);
        // April pays Q1: 60k. July pays nothing (cumulative due 40k < 60k
        // already paid). October tops up to 80k due: pays 20k.
        assert!((payments[3] - 60_000.0).abs() < 1e-9);
        assert_eq!(payments[6], 0.0);
        assert!((payments[9] - 20_000.0).abs() < 1e-9);
        assert_eq!(payments[10], 0.0);
    }

    #[test]
    fn quarterly_q4_settles_after_the_modeled_year() {
        let mut profit = [0.0; 12];
        profit[10] = 500_000.0;
        let payments = corporate_tax_payments(&profit, 0.2, false);
        assert_eq!(payments.iter().sum::<f64>(), 0.0);
    }
}
