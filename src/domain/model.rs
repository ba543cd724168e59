use crate::domain::cost::CostItem;
use crate::domain::params::FinancialParams;
use crate::domain::portfolio::{CaseloadDistribution, DebtPortfolio};
use crate::domain::stage::Stage;
use crate::domain::staff::StaffType;

/// The full input snapshot every calculator consumes. Calculators never
/// mutate it; each invocation recomputes from the current snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub stages: Vec<Stage>,
    pub staff: Vec<StaffType>,
    pub costs: Vec<CostItem>,
    pub portfolio: DebtPortfolio,
    pub params: FinancialParams,
    pub caseload: CaseloadDistribution,
    /// Calendar year cost date ranges are intersected with.
    pub modeling_year: i32,
}
