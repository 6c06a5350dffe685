//! Mission validation layer
//!
//! A read-only rules layer over the shell. Validators inspect a tree, a working
//! directory and the raw command history; they never change any of them.
//! [`Progress`] decides which validators run after each command and tracks what
//! has been completed.

mod curriculum;

pub use curriculum::curriculum;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fs::Tree;

/// A substep check: `(tree, cwd, history) -> passed`.
pub type Validator = fn(&Tree, &str, &[String]) -> bool;

/// One task inside a level.
#[derive(Debug, Clone, Copy)]
pub struct Substep {
    /// Dotted id, e.g. `"2.4"`.
    pub id: &'static str,
    /// Instruction shown to the learner (inline markdown).
    pub text: &'static str,
    pub hint: &'static str,
    pub validate: Validator,
}

/// One level of the curriculum.
#[derive(Debug, Clone, Copy)]
pub struct Mission {
    /// 1-based level number.
    pub id: u32,
    pub title: &'static str,
    /// Short briefing shown above the substeps.
    pub context: &'static str,
    pub substeps: &'static [Substep],
}

/// What one [`Progress::record`] call completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Substeps that passed for the first time, in curriculum order.
    pub completed_substeps: Vec<&'static str>,
    /// Level whose last substep just completed.
    pub completed_level: Option<u32>,
}

impl ProgressUpdate {
    pub fn is_empty(&self) -> bool {
        self.completed_substeps.is_empty() && self.completed_level.is_none()
    }
}

/// Learner progress through the curriculum.
///
/// Levels are worked strictly in order within each level: only the first
/// incomplete substep of a level is ever checked. Levels up to one past the
/// highest unlocked level are checked, so work done slightly ahead still counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Completion flag per substep id.
    pub substep_status: BTreeMap<String, bool>,
    /// Highest level the learner may work on.
    #[serde(default = "first_level")]
    pub unlocked_level: u32,
    /// Level currently shown.
    #[serde(default = "first_level")]
    pub active_level: u32,
    /// Level completed by the most recent command, if any. Not persisted.
    #[serde(skip)]
    pub just_completed_level: Option<u32>,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Fresh progress: nothing complete, level 1 unlocked.
    pub fn new() -> Self {
        let substep_status = curriculum()
            .iter()
            .flat_map(|m| m.substeps)
            .map(|s| (s.id.to_string(), false))
            .collect();
        Self {
            substep_status,
            unlocked_level: 1,
            active_level: 1,
            just_completed_level: None,
        }
    }

    pub fn is_complete(&self, substep: &str) -> bool {
        self.substep_status.get(substep).copied().unwrap_or(false)
    }

    /// Whether every substep of `level` is complete.
    pub fn level_complete(&self, level: u32) -> bool {
        mission(level).is_some_and(|m| m.substeps.iter().all(|s| self.is_complete(s.id)))
    }

    /// First incomplete substep of `level`.
    pub fn current_substep(&self, level: u32) -> Option<&'static Substep> {
        mission(level)?.substeps.iter().find(|s| !self.is_complete(s.id))
    }

    pub fn completed_count(&self) -> usize {
        self.substep_status.values().filter(|done| **done).count()
    }

    pub fn total(&self) -> usize {
        self.substep_status.len()
    }

    /// Show a different level. Only unlocked levels can be selected.
    pub fn select_level(&mut self, level: u32) -> bool {
        if level == 0 || level > self.unlocked_level {
            return false;
        }
        self.active_level = level;
        true
    }

    /// Check the state after a command.
    pub fn record(&mut self, tree: &Tree, cwd: &str, history: &[String]) -> ProgressUpdate {
        let mut update = ProgressUpdate::default();
        self.just_completed_level = None;

        let limit = self.unlocked_level + 1;
        for mission in curriculum().iter().filter(|m| m.id <= limit) {
            let Some(step) = self.current_substep(mission.id) else {
                continue;
            };
            if (step.validate)(tree, cwd, history) {
                self.substep_status.insert(step.id.to_string(), true);
                update.completed_substeps.push(step.id);

                #[cfg(feature = "logging")]
                tracing::info!(substep = step.id, "substep completed");
            }
        }

        let level = self.unlocked_level;
        let last = curriculum().len() as u32;
        let newly = mission(level).is_some_and(|m| {
            m.substeps
                .iter()
                .any(|s| update.completed_substeps.contains(&s.id))
        });
        if self.level_complete(level) && (level < last || newly) {
            if level < last {
                self.unlocked_level = level + 1;
                self.active_level = level + 1;
            }
            self.just_completed_level = Some(level);
            update.completed_level = Some(level);

            #[cfg(feature = "logging")]
            tracing::info!(level, "level completed");
        }

        update
    }

    /// Add entries for substeps missing from a saved status map and check the
    /// level numbers are in range.
    pub(crate) fn repair(&mut self) -> Result<(), String> {
        for id in curriculum().iter().flat_map(|m| m.substeps).map(|s| s.id) {
            self.substep_status.entry(id.to_string()).or_insert(false);
        }
        let last = curriculum().len() as u32;
        if !(1..=last).contains(&self.unlocked_level) {
            return Err(format!("unlocked level {} out of range", self.unlocked_level));
        }
        if !(1..=self.unlocked_level).contains(&self.active_level) {
            return Err(format!("active level {} is not unlocked", self.active_level));
        }
        Ok(())
    }
}

fn first_level() -> u32 {
    1
}

fn mission(level: u32) -> Option<&'static Mission> {
    curriculum().iter().find(|m| m.id == level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing(_: &Tree, _: &str, _: &[String]) -> bool {
        true
    }

    #[test]
    fn test_new_progress() {
        let progress = Progress::new();
        assert_eq!(progress.total(), 32);
        assert_eq!(progress.completed_count(), 0);
        assert_eq!(progress.unlocked_level, 1);
        assert_eq!(progress.current_substep(1).map(|s| s.id), Some("1.1"));
    }

    #[test]
    fn test_only_first_incomplete_substep_is_checked() {
        // 1.4 ("ls" last) would pass, but 1.1 comes first and fails.
        let mut progress = Progress::new();
        let update = progress.record(&Tree::default(), "/home/user", &["ls".to_string()]);
        assert!(update.is_empty());
        assert!(!progress.is_complete("1.4"));
    }

    #[test]
    fn test_level_unlocks_after_last_substep() {
        let mut progress = Progress::new();
        for id in ["1.1", "1.2", "1.3", "1.4"] {
            progress.substep_status.insert(id.to_string(), true);
        }
        let history = vec!["ls -la".to_string()];
        let update = progress.record(&Tree::default(), "/home/user", &history);
        assert_eq!(update.completed_substeps, vec!["1.5"]);
        assert_eq!(update.completed_level, Some(1));
        assert_eq!(progress.unlocked_level, 2);
        assert_eq!(progress.active_level, 2);
        assert_eq!(progress.just_completed_level, Some(1));

        let again = progress.record(&Tree::default(), "/home/user", &history);
        assert_eq!(again.completed_level, None);
        assert_eq!(progress.just_completed_level, None);
    }

    #[test]
    fn test_final_level_reported_once() {
        let mut progress = Progress::new();
        for id in progress.substep_status.clone().keys() {
            progress.substep_status.insert(id.clone(), true);
        }
        progress.unlocked_level = 6;
        let update = progress.record(&Tree::default(), "/", &[]);
        assert_eq!(update.completed_level, None);
        assert_eq!(progress.unlocked_level, 6);
    }

    #[test]
    fn test_select_level() {
        let mut progress = Progress::new();
        assert!(!progress.select_level(2));
        assert!(progress.select_level(1));
        progress.unlocked_level = 3;
        assert!(progress.select_level(2));
        assert_eq!(progress.active_level, 2);
        assert!(!progress.select_level(0));
    }

    #[test]
    fn test_repair() {
        let mut progress = Progress::new();
        progress.substep_status.remove("6.6");
        assert!(progress.repair().is_ok());
        assert_eq!(progress.total(), 32);

        progress.unlocked_level = 9;
        assert!(progress.repair().is_err());
        progress.unlocked_level = 2;
        progress.active_level = 3;
        assert!(progress.repair().is_err());
    }

    #[test]
    fn test_validator_is_plain_fn() {
        let v: Validator = passing;
        assert!(v(&Tree::default(), "/", &[]));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Progress::new()).unwrap();
        assert_eq!(json["unlockedLevel"], 1);
        assert_eq!(json["activeLevel"], 1);
        assert_eq!(json["substepStatus"]["1.1"], false);
        assert!(json.get("justCompletedLevel").is_none());
    }
}
