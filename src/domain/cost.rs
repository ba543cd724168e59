use chrono::NaiveDate;

/// Classification driving cash-flow bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTag {
    Capital,
    Operating,
    Variable,
    Overhead,
    Other,
}

/// The monthly bucket a cost lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostBucket {
    FixedOther,
    VariableOther,
    Capital,
}

impl CostTag {
    pub fn bucket(self) -> CostBucket {
        match self {
            CostTag::Variable => CostBucket::VariableOther,
            CostTag::Capital => CostBucket::Capital,
            CostTag::Operating | CostTag::Overhead | CostTag::Other => CostBucket::FixedOther,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfActivity {
    Operating,
    Financial,
    Investment,
    Tax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfDirection {
    Income,
    Expense,
}

/// Grouping key for the cash-flow-statement report, independent of `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CfCategory {
    pub activity: CfActivity,
    pub direction: CfDirection,
}

impl CfCategory {
    pub fn label(self) -> String {
        let activity = match self.activity {
            CfActivity::Operating => "Operating",
            CfActivity::Financial => "Financial",
            CfActivity::Investment => "Investment",
            CfActivity::Tax => "Tax",
        };
        let direction = match self.direction {
            CfDirection::Income => "income",
            CfDirection::Expense => "expense",
        };
        format!("{activity} {direction}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periodicity {
    OneTime,
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub tag: CostTag,
    pub cf_category: CfCategory,
    pub periodicity: Periodicity,
    /// Bounds the active months within the modeled year.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
