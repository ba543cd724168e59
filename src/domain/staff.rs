#[derive(Debug, Clone, PartialEq)]
pub struct StaffType {
    pub id: String,
    pub group: String,
    /// Join key for `SubStage::executor_position`; uniqueness is assumed in
    /// the source data, not enforced (duplicates are reported by validation).
    pub position: String,
    pub count: u32,
    pub monthly_salary: f64,
    pub monthly_working_hours: f64,
    /// Throughput multiplier, 1-100.
    pub efficiency_percent: f64,
    /// Declared capacity; no calculator enforces it.
    pub max_caseload: Option<u32>,
}

impl StaffType {
    pub fn annual_salary(&self) -> f64 {
        self.monthly_salary * 12.0
    }
}
