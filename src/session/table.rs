//! Study duration lookup.
//!
//! Maps each selectable study duration to its break duration and
//! appreciation interval.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::StudyError;
use crate::session::state::{AppreciationPolicy, Phase};

/// Longest study or break phase accepted, in minutes.
pub const MAX_PHASE_MINUTES: u32 = 24 * 60;

/// Durations in effect for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    /// Study phase length in minutes.
    pub study_minutes: u32,
    /// Break phase length in minutes.
    pub break_minutes: u32,
    /// Sessions between appreciation cards; 0 means never.
    pub appreciation_interval: u32,
}

impl SessionConfig {
    /// Study phase length in seconds.
    #[must_use]
    pub const fn study_seconds(&self) -> u32 {
        self.study_minutes * 60
    }

    /// Break phase length in seconds.
    #[must_use]
    pub const fn break_seconds(&self) -> u32 {
        self.break_minutes * 60
    }

    /// Length of the given phase in seconds.
    #[must_use]
    pub const fn phase_seconds(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Studying => self.study_seconds(),
            Phase::OnBreak => self.break_seconds(),
        }
    }
}

/// Validated duration mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationTable {
    break_minutes: BTreeMap<u32, u32>,
    appreciation_intervals: BTreeMap<u32, u32>,
    policy: AppreciationPolicy,
}

impl DurationTable {
    /// Build a table from the two mappings.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` if the mappings are empty, contain
    /// zero-length or over-long phases, or disagree on which study durations exist.
    pub fn new(
        break_minutes: BTreeMap<u32, u32>,
        appreciation_intervals: BTreeMap<u32, u32>,
        policy: AppreciationPolicy,
    ) -> Result<Self, StudyError> {
        if break_minutes.is_empty() {
            return Err(StudyError::Configuration(
                "break_minutes must list at least one study duration".to_string(),
            ));
        }

        for (&study, &rest) in &break_minutes {
            if study == 0 || rest == 0 {
                return Err(StudyError::Configuration(format!(
                    "durations must be positive (got {study} -> {rest})"
                )));
            }
            if study > MAX_PHASE_MINUTES || rest > MAX_PHASE_MINUTES {
                return Err(StudyError::Configuration(format!(
                    "durations must be at most {MAX_PHASE_MINUTES} minutes (got {study} -> {rest})"
                )));
            }
        }

        if let Some(orphan) = appreciation_intervals
            .keys()
            .find(|k| !break_minutes.contains_key(k))
        {
            return Err(StudyError::Configuration(format!(
                "appreciation interval given for {orphan} minutes, which has no break duration"
            )));
        }

        if policy == AppreciationPolicy::CountBased {
            if let Some(missing) = break_minutes
                .keys()
                .find(|k| !appreciation_intervals.contains_key(k))
            {
                return Err(StudyError::Configuration(format!(
                    "no appreciation interval for {missing} minutes"
                )));
            }
        }

        Ok(Self {
            break_minutes,
            appreciation_intervals,
            policy,
        })
    }

    /// Look up the durations for a study length.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` if `minutes` is not mapped.
    pub fn session_config(&self, minutes: u32) -> Result<SessionConfig, StudyError> {
        let break_minutes = self.break_minutes.get(&minutes).copied().ok_or_else(|| {
            StudyError::Configuration(format!("no break duration mapped for {minutes} minutes"))
        })?;

        Ok(SessionConfig {
            study_minutes: minutes,
            break_minutes,
            appreciation_interval: self
                .appreciation_intervals
                .get(&minutes)
                .copied()
                .unwrap_or(0),
        })
    }

    /// Selectable study durations, ascending.
    #[must_use]
    pub fn study_options(&self) -> Vec<u32> {
        self.break_minutes.keys().copied().collect()
    }

    /// All configured durations, ascending by study length.
    #[must_use]
    pub fn entries(&self) -> Vec<SessionConfig> {
        self.break_minutes
            .keys()
            .filter_map(|&m| self.session_config(m).ok())
            .collect()
    }

    /// Appreciation policy for this deployment.
    #[must_use]
    pub const fn policy(&self) -> AppreciationPolicy {
        self.policy
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            break_minutes: BTreeMap::from([(25, 5), (45, 10), (60, 20)]),
            appreciation_intervals: BTreeMap::from([(25, 3), (45, 2), (60, 1)]),
            policy: AppreciationPolicy::CountBased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(u32, u32)]) -> BTreeMap<u32, u32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_lookup() {
        let table = DurationTable::default();
        let config = table.session_config(45).unwrap();

        assert_eq!(config.break_minutes, 10);
        assert_eq!(config.appreciation_interval, 2);
        assert_eq!(config.study_seconds(), 2700);
        assert_eq!(config.phase_seconds(Phase::OnBreak), 600);
    }

    #[test]
    fn test_unmapped_duration() {
        let err = DurationTable::default().session_config(30).unwrap_err();
        assert!(matches!(err, StudyError::Configuration(_)));
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = DurationTable::new(map(&[]), map(&[]), AppreciationPolicy::Disabled);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = DurationTable::new(map(&[(25, 0)]), map(&[(25, 3)]), AppreciationPolicy::CountBased);
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_duration_rejected() {
        let study = DurationTable::new(
            map(&[(80_000_000, 5)]),
            map(&[(80_000_000, 1)]),
            AppreciationPolicy::CountBased,
        );
        assert!(matches!(study, Err(StudyError::Configuration(_))));

        let rest = DurationTable::new(
            map(&[(25, MAX_PHASE_MINUTES + 1)]),
            map(&[(25, 3)]),
            AppreciationPolicy::CountBased,
        );
        assert!(matches!(rest, Err(StudyError::Configuration(_))));

        let table = DurationTable::new(
            map(&[(MAX_PHASE_MINUTES, MAX_PHASE_MINUTES)]),
            map(&[(MAX_PHASE_MINUTES, 1)]),
            AppreciationPolicy::CountBased,
        )
        .unwrap();
        let config = table.session_config(MAX_PHASE_MINUTES).unwrap();
        assert_eq!(config.study_seconds(), 86_400);
        assert_eq!(config.break_seconds(), 86_400);
    }

    #[test]
    fn test_count_based_requires_both_mappings() {
        let result = DurationTable::new(
            map(&[(25, 5), (45, 10)]),
            map(&[(25, 3)]),
            AppreciationPolicy::CountBased,
        );
        assert!(result.unwrap_err().to_string().contains("45"));
    }

    #[test]
    fn test_disabled_allows_missing_intervals() {
        let table = DurationTable::new(
            map(&[(25, 5), (45, 10)]),
            map(&[]),
            AppreciationPolicy::Disabled,
        )
        .unwrap();

        assert_eq!(table.session_config(45).unwrap().appreciation_interval, 0);
    }

    #[test]
    fn test_orphan_interval_rejected() {
        let result = DurationTable::new(
            map(&[(25, 5)]),
            map(&[(25, 3), (90, 1)]),
            AppreciationPolicy::Disabled,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_entries_sorted() {
        let minutes: Vec<u32> = DurationTable::default()
            .entries()
            .iter()
            .map(|c| c.study_minutes)
            .collect();
        assert_eq!(minutes, vec![25, 45, 60]);
    }
}
