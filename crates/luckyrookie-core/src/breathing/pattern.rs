use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One step of the breathing cycle. Order is fixed: inhale, hold, exhale, rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::Rest];

    /// The phase that follows in cyclic order, ignoring durations.
    pub fn next(self) -> Phase {
        match self {
            Phase::Inhale => Phase::Hold,
            Phase::Hold => Phase::Exhale,
            Phase::Exhale => Phase::Rest,
            Phase::Rest => Phase::Inhale,
        }
    }

    /// Prompt shown to the user while the phase is active.
    pub fn prompt(self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe In",
            Phase::Hold => "Hold",
            Phase::Exhale => "Breathe Out",
            Phase::Rest => "Rest",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
            Phase::Rest => "rest",
        };
        f.write_str(s)
    }
}

/// Named set of per-phase durations in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPattern {
    pub name: String,
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
    pub rest: u32,
}

/// Keys accepted by [`BreathingPattern::builtin`].
pub const BUILTIN_KEYS: [&str; 3] = ["4-7-8", "box", "simple"];

impl BreathingPattern {
    pub fn new(name: impl Into<String>, inhale: u32, hold: u32, exhale: u32, rest: u32) -> Self {
        Self {
            name: name.into(),
            inhale,
            hold,
            exhale,
            rest,
        }
    }

    pub fn builtin(key: &str) -> Option<Self> {
        match key {
            "4-7-8" => Some(Self::new("4-7-8 Relaxing", 4, 7, 8, 0)),
            "box" => Some(Self::new("Box Breathing", 4, 4, 4, 4)),
            "simple" => Some(Self::new("Simple Breathing", 4, 0, 6, 0)),
            _ => None,
        }
    }

    /// Resolve a built-in key or an `inhale,hold,exhale,rest` list.
    ///
    /// # Errors
    /// Unknown keys, malformed lists, and all-zero lists are rejected.
    pub fn parse(spec: &str) -> Result<Self, ValidationError> {
        let spec = spec.trim();
        if let Some(p) = Self::builtin(spec) {
            return Ok(p);
        }
        if !spec.contains(',') {
            return Err(ValidationError::UnknownPattern(spec.to_string()));
        }

        let parts = spec
            .split(',')
            .map(|s| s.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ValidationError::InvalidValue {
                field: "pattern".into(),
                message: e.to_string(),
            })?;
        let [inhale, hold, exhale, rest] = parts[..] else {
            return Err(ValidationError::InvalidValue {
                field: "pattern".into(),
                message: format!("expected 4 durations, got {}", parts.len()),
            });
        };

        let pattern = Self::new(format!("Custom {spec}"), inhale, hold, exhale, rest);
        pattern.validate()?;
        Ok(pattern)
    }

    pub fn duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Hold => self.hold,
            Phase::Exhale => self.exhale,
            Phase::Rest => self.rest,
        }
    }

    pub fn cycle_secs(&self) -> u32 {
        Phase::ALL.iter().map(|&p| self.duration(p)).sum()
    }

    /// # Errors
    /// Fails when no phase has a non-zero duration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cycle_secs() == 0 {
            return Err(ValidationError::EmptyPattern(self.name.clone()));
        }
        Ok(())
    }

    /// First phase after `from` (cyclic, `from` itself examined last) whose
    /// duration is non-zero. Examines at most four phases; `None` only for
    /// an all-zero pattern.
    pub fn next_active_phase(&self, from: Phase) -> Option<Phase> {
        let mut candidate = from;
        for _ in 0..Phase::ALL.len() {
            candidate = candidate.next();
            if self.duration(candidate) > 0 {
                return Some(candidate);
            }
        }
        None
    }
}
