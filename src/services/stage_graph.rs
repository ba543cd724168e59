//! Static structure of the stage graph: successor adjacency for the flow
//! simulator and the critical-path duration over `depends_on` edges.

use std::collections::{HashMap, HashSet};

use crate::domain::stage::Stage;

/// Lookup map from stage id to stage.
pub fn stage_map(stages: &[Stage]) -> HashMap<&str, &Stage> {
    stages.iter().map(|stage| (stage.id.as_str(), stage)).collect()
}

/// Successor adjacency built from the declared `next_stage_ids`. Every stage
/// id appears as a key; references to nonexistent stages are dropped with a
/// warning, never an error.
pub fn successor_map<'a>(stages: &'a [Stage]) -> HashMap<&'a str, Vec<&'a str>> {
    let known: HashSet<&str> = stages.iter().map(|stage| stage.id.as_str()).collect();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::with_capacity(stages.len());

    for stage in stages {
        let entries = successors.entry(stage.id.as_str()).or_default();
        for next_id in &stage.next_stage_ids {
            if known.contains(next_id.as_str()) {
                entries.push(next_id.as_str());
            } else {
                log::warn!(
                    "stage '{}' lists unknown successor '{}', dropping it",
                    stage.id,
                    next_id
                );
            }
        }
    }

    successors
}

/// Memo entry for the longest-path walk. `InProgress` is written before
/// recursing into dependencies; reading it back means the walk re-entered a
/// stage on the current path, i.e. a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathMark {
    InProgress,
    Done(f64),
}

/// Maximum cumulative `duration_days.max` along any predecessor chain ending
/// at `stage_id`, following `depends_on` edges. A stage with no dependencies
/// returns its own max duration. A cycle makes the affected branch
/// `f64::INFINITY` instead of recursing forever.
pub fn longest_path_duration(
    stage_id: &str,
    stages: &HashMap<&str, &Stage>,
    memo: &mut HashMap<String, PathMark>,
) -> f64 {
    if let Some(mark) = memo.get(stage_id) {
        return match mark {
            PathMark::InProgress => f64::INFINITY,
            PathMark::Done(duration) => *duration,
        };
    }

    let Some(stage) = stages.get(stage_id) else {
        log::warn!("dependency on unknown stage '{stage_id}' ignored");
        return 0.0;
    };

    memo.insert(stage_id.to_string(), PathMark::InProgress);

    let mut longest_predecessor = 0.0_f64;
    for dependency in &stage.depends_on {
        longest_predecessor = longest_predecessor.max(longest_path_duration(dependency, stages, memo));
    }

    let total = longest_predecessor + stage.duration_days.max;
    memo.insert(stage_id.to_string(), PathMark::Done(total));
    total
}

/// Maximum collection time in days: the longest critical path ending at a
/// terminal stage (a stage no other stage depends on). A graph with no
/// terminal stages necessarily contains a dependency cycle, so the walk over
/// all stages returns `f64::INFINITY` there. Empty input is 0.
pub fn max_collection_time(stages: &[Stage]) -> f64 {
    if stages.is_empty() {
        return 0.0;
    }

    let map = stage_map(stages);
    let depended_on: HashSet<&str> = stages
        .iter()
        .flat_map(|stage| stage.depends_on.iter().map(String::as_str))
        .collect();

    let terminals: Vec<&str> = stages
        .iter()
        .map(|stage| stage.id.as_str())
        .filter(|id| !depended_on.contains(id))
        .collect();

    let candidates: Vec<&str> = if terminals.is_empty() {
        stages.iter().map(|stage| stage.id.as_str()).collect()
    } else {
        terminals
    };

    let mut memo = HashMap::new();
    candidates
        .into_iter()
        .map(|id| longest_path_duration(id, &map, &mut memo))
        .fold(0.0, f64::max)
}
