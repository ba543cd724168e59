use std::collections::HashMap;

/// Legacy four-bucket percentage split of the initial caseload.
/// Superseded by `CaseloadDistribution`; carried for old model files,
/// read by no calculator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InitialStageDistribution {
    pub soft_collection: f64,
    pub pre_legal: f64,
    pub legal: f64,
    pub enforcement: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtPortfolio {
    pub total_cases: u64,
    pub average_debt_amount: f64,
    /// Enables the normal-distribution Monte-Carlo value estimate.
    pub average_debt_sigma: Option<f64>,
    pub initial_stage_distribution: Option<InitialStageDistribution>,
    /// Fraction (0-1) of face value paid to acquire the portfolio.
    pub portfolio_purchase_rate: f64,
    pub is_initial_purchase: bool,
}

impl DebtPortfolio {
    /// Flat aggregate face value, cases times average debt.
    pub fn face_value(&self) -> f64 {
        self.total_cases as f64 * self.average_debt_amount
    }

    /// Acquisition price, charged once when `is_initial_purchase` is set.
    pub fn purchase_price(&self) -> f64 {
        if self.is_initial_purchase {
            self.face_value() * self.portfolio_purchase_rate
        } else {
            0.0
        }
    }
}

/// Percentage (0-100) of cases entering the process at each stage.
/// Should sum to 100; calculators tolerate violations and treat missing
/// stages as 0%.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseloadDistribution {
    shares: HashMap<String, f64>,
}

impl CaseloadDistribution {
    pub fn new(shares: HashMap<String, f64>) -> Self {
        Self { shares }
    }

    pub fn share(&self, stage_id: &str) -> f64 {
        self.shares.get(stage_id).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.shares.iter().map(|(id, share)| (id.as_str(), *share))
    }
}
