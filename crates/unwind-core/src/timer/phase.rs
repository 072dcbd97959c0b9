use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One named, fixed-duration segment of a guided exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    /// Machine key, e.g. `inhale`. Drives derived display values.
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub instruction: String,
    /// Duration in whole seconds. Must be greater than zero.
    pub duration_secs: u32,
}

impl PhaseSpec {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        instruction: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            instruction: instruction.into(),
            duration_secs,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }
}

/// Position inside a phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLocation {
    pub index: usize,
    /// Time spent inside the phase, always within `[0, phase duration]`.
    pub local_elapsed: Duration,
}

/// Non-empty ordered sequence of phases. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTable {
    phases: Vec<PhaseSpec>,
}

impl PhaseTable {
    /// Build a table, rejecting empty tables and zero-length phases.
    pub fn new(phases: Vec<PhaseSpec>) -> Result<Self, ValidationError> {
        if phases.is_empty() {
            return Err(ValidationError::EmptyCollection("phase table".into()));
        }
        if let Some(bad) = phases.iter().find(|p| p.duration_secs == 0) {
            return Err(ValidationError::InvalidValue {
                field: format!("phases.{}.duration_secs", bad.name),
                message: "duration must be greater than zero".into(),
            });
        }
        Ok(Self { phases })
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhaseSpec> {
        self.phases.get(index)
    }

    /// The phase a location points into. Out-of-range indices clamp to the
    /// last phase.
    pub fn phase_at(&self, loc: PhaseLocation) -> &PhaseSpec {
        &self.phases[loc.index.min(self.phases.len() - 1)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseSpec> {
        self.phases.iter()
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(PhaseSpec::duration).sum()
    }

    /// Duration of all phases before `index`.
    pub fn cumulative(&self, index: usize) -> Duration {
        self.phases.iter().take(index).map(PhaseSpec::duration).sum()
    }

    /// Find the phase whose window contains `elapsed`.
    ///
    /// Anything at or past the end clamps to the last phase with its full
    /// duration as local elapsed.
    pub fn locate(&self, elapsed: Duration) -> PhaseLocation {
        let mut start = Duration::ZERO;
        for (index, phase) in self.phases.iter().enumerate() {
            let end = start + phase.duration();
            if elapsed < end {
                return PhaseLocation {
                    index,
                    local_elapsed: elapsed.saturating_sub(start),
                };
            }
            start = end;
        }
        let last = self.phases.len() - 1;
        PhaseLocation {
            index: last,
            local_elapsed: self.phases[last].duration(),
        }
    }
}

impl<'de> Deserialize<'de> for PhaseTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            phases: Vec<PhaseSpec>,
        }
        let raw = Raw::deserialize(deserializer)?;
        PhaseTable::new(raw.phases).map_err(serde::de::Error::custom)
    }
}
