//! Model lint. Everything reported here is a warning, never an error: the
//! calculators clamp and degrade on their own, this pass just makes the
//! data-quality issues visible before they do.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::domain::model::Model;
use crate::services::labor_costs::{ExecutorLookup, StaffDirectory};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelWarning {
    ProbabilitySumExceeded { stage: String, sum: f64 },
    CaseloadSumMismatch { sum: f64 },
    DanglingDependency { stage: String, missing: String },
    DanglingSuccessor { stage: String, missing: String },
    /// `from -> to` exists in `next_stage_ids` but `to` does not depend on
    /// `from`; the two edge sets disagree.
    SuccessorWithoutDependency { from: String, to: String },
    /// `to` depends on `from` but `from` does not list `to` as a successor.
    DependencyWithoutSuccessor { from: String, to: String },
    DependencyCycle,
    DuplicatePosition { position: String },
    UnmatchedExecutor { sub_stage: String, position: String },
}

impl fmt::Display for ModelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProbabilitySumExceeded { stage, sum } => write!(
                f,
                "stage '{stage}' declares recovery + write-off = {sum}%, write-off will be clamped"
            ),
            Self::CaseloadSumMismatch { sum } => {
                write!(f, "caseload distribution sums to {sum}%, expected 100%")
            }
            Self::DanglingDependency { stage, missing } => {
                write!(f, "stage '{stage}' depends on unknown stage '{missing}'")
            }
            Self::DanglingSuccessor { stage, missing } => {
                write!(f, "stage '{stage}' lists unknown successor '{missing}'")
            }
            Self::SuccessorWithoutDependency { from, to } => write!(
                f,
                "edge '{from}' -> '{to}' exists in the flow graph but '{to}' does not depend on '{from}'"
            ),
            Self::DependencyWithoutSuccessor { from, to } => write!(
                f,
                "'{to}' depends on '{from}' but '{from}' does not list it as a successor"
            ),
            Self::DependencyCycle => write!(f, "dependency graph contains a cycle"),
            Self::DuplicatePosition { position } => {
                write!(f, "staff position '{position}' is declared more than once")
            }
            Self::UnmatchedExecutor { sub_stage, position } => write!(
                f,
                "substage '{sub_stage}' names executor position '{position}' with no matching staff"
            ),
        }
    }
}

pub fn validate_model(model: &Model) -> Vec<ModelWarning> {
    let mut warnings = Vec::new();
    let known: HashSet<&str> = model.stages.iter().map(|s| s.id.as_str()).collect();

    for stage in &model.stages {
        let sum = stage.recovery_probability + stage.write_off_probability;
        if sum > 100.0 {
            warnings.push(ModelWarning::ProbabilitySumExceeded {
                stage: stage.id.clone(),
                sum,
            });
        }

        for dependency in &stage.depends_on {
            if !known.contains(dependency.as_str()) {
                warnings.push(ModelWarning::DanglingDependency {
                    stage: stage.id.clone(),
                    missing: dependency.clone(),
                });
            }
        }
        for successor in &stage.next_stage_ids {
            if !known.contains(successor.as_str()) {
                warnings.push(ModelWarning::DanglingSuccessor {
                    stage: stage.id.clone(),
                    missing: successor.clone(),
                });
            }
        }
    }

    let caseload_sum = model.caseload.total();
    if (caseload_sum - 100.0).abs() > 1e-6 {
        warnings.push(ModelWarning::CaseloadSumMismatch { sum: caseload_sum });
    }

    warnings.extend(edge_set_warnings(model));

    if dependency_graph_is_cyclic(model) {
        warnings.push(ModelWarning::DependencyCycle);
    }

    warnings.extend(staff_warnings(model));

    for warning in &warnings {
        log::warn!("{warning}");
    }
    warnings
}

/// The two edge sets are maintained independently and the engine never
/// reconciles them; this surfaces every directed edge present in one graph
/// and absent from the other.
fn edge_set_warnings(model: &Model) -> Vec<ModelWarning> {
    let by_id: HashMap<&str, &crate::domain::stage::Stage> =
        model.stages.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut warnings = Vec::new();

    for stage in &model.stages {
        for successor in &stage.next_stage_ids {
            if let Some(target) = by_id.get(successor.as_str())
                && !target.depends_on.contains(&stage.id)
            {
                warnings.push(ModelWarning::SuccessorWithoutDependency {
                    from: stage.id.clone(),
                    to: successor.clone(),
                });
            }
        }
        for dependency in &stage.depends_on {
            if let Some(source) = by_id.get(dependency.as_str())
                && !source.next_stage_ids.contains(&stage.id)
            {
                warnings.push(ModelWarning::DependencyWithoutSuccessor {
                    from: dependency.clone(),
                    to: stage.id.clone(),
                });
            }
        }
    }

    warnings
}

fn dependency_graph_is_cyclic(model: &Model) -> bool {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for stage in &model.stages {
        indices
            .entry(stage.id.as_str())
            .or_insert_with(|| graph.add_node(stage.id.as_str()));
    }
    for stage in &model.stages {
        let stage_idx = indices[stage.id.as_str()];
        for dependency in &stage.depends_on {
            if let Some(dep_idx) = indices.get(dependency.as_str()) {
                graph.add_edge(*dep_idx, stage_idx, ());
            }
        }
    }

    is_cyclic_directed(&graph)
}

fn staff_warnings(model: &Model) -> Vec<ModelWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for staff in &model.staff {
        let key = staff.position.trim().to_lowercase();
        if !seen.insert(key) {
            warnings.push(ModelWarning::DuplicatePosition {
                position: staff.position.clone(),
            });
        }
    }

    let directory = StaffDirectory::new(&model.staff);
    for stage in &model.stages {
        for sub in &stage.sub_stages {
            if matches!(directory.lookup(&sub.executor_position), ExecutorLookup::Unmatched) {
                warnings.push(ModelWarning::UnmatchedExecutor {
                    sub_stage: sub.name.clone(),
                    position: sub.executor_position.clone(),
                });
            }
        }
    }

    warnings
}
