#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationDays {
    pub min: f64,
    /// The pessimistic bound; all scheduling math runs on `max`.
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubStage {
    pub id: String,
    pub name: String,
    /// Minutes to execute this step once.
    pub normative_minutes: f64,
    /// Free-text key matched against `StaffType::position`.
    pub executor_position: String,
    pub repetitions: u32,
}

/// One node of the collection process.
///
/// Two independent edge sets live here: `depends_on` feeds the static
/// critical-path calculation, `next_stage_ids` feeds the dynamic flow
/// simulation. They are not guaranteed consistent and are never reconciled;
/// `graph_validation` reports mismatches as warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub duration_days: DurationDays,
    pub sub_stages: Vec<SubStage>,
    pub depends_on: Vec<String>,
    pub next_stage_ids: Vec<String>,
    /// Percentage (0-100) of entering cases recovered at this stage.
    pub recovery_probability: f64,
    /// Percentage (0-100) of entering cases written off at this stage.
    pub write_off_probability: f64,
}

impl Stage {
    /// Probabilities as actually used by the simulator: each clamped to
    /// 0-100, and when the declared sum exceeds 100 the write-off share is
    /// reduced so recovery takes priority.
    pub fn effective_probabilities(&self) -> (f64, f64) {
        let recovery = self.recovery_probability.clamp(0.0, 100.0);
        let write_off = self
            .write_off_probability
            .clamp(0.0, 100.0)
            .min(100.0 - recovery);
        (recovery, write_off)
    }
}
