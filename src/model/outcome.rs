//! Enrollment outcomes and their probabilities

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{ModelError, ModelResult};

/// Predicted enrollment outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Dropout,
    Enrolled,
    Graduate,
}

impl Outcome {
    /// All outcomes in label-index order
    pub const ALL: [Outcome; 3] = [Outcome::Dropout, Outcome::Enrolled, Outcome::Graduate];

    /// Label index the model was trained with
    pub fn index(&self) -> usize {
        match self {
            Outcome::Dropout => 0,
            Outcome::Enrolled => 1,
            Outcome::Graduate => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Dropout => "Dropout",
            Outcome::Enrolled => "Enrolled",
            Outcome::Graduate => "Graduate",
        }
    }

    /// Short banner text for result display
    pub fn headline(&self) -> &'static str {
        match self {
            Outcome::Dropout => "AT RISK OF DROPOUT",
            Outcome::Enrolled => "LIKELY TO STAY ENROLLED",
            Outcome::Graduate => "GRADUATE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| ModelError::ArtifactMismatch(format!("unknown outcome label '{}'", s)))
    }
}

/// Reverse mapping from classifier label index to outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMapping {
    by_index: BTreeMap<usize, Outcome>,
}

impl Default for TargetMapping {
    fn default() -> Self {
        Self {
            by_index: Outcome::ALL.into_iter().map(|o| (o.index(), o)).collect(),
        }
    }
}

impl TargetMapping {
    /// Parses the artifact form: string keys `"0"`, `"1"`, ... to labels
    ///
    /// Keys must be exactly `0..3` and every outcome must appear once.
    pub fn from_labels(labels: &BTreeMap<String, String>) -> ModelResult<Self> {
        let mut by_index = BTreeMap::new();

        for (key, label) in labels {
            let index: usize = key.trim().parse().map_err(|_| {
                ModelError::ArtifactMismatch(format!("label index '{}' is not a number", key))
            })?;
            if index >= Outcome::ALL.len() {
                return Err(ModelError::ArtifactMismatch(format!(
                    "label index {} out of range 0..{}",
                    index,
                    Outcome::ALL.len()
                )));
            }
            by_index.insert(index, label.parse::<Outcome>()?);
        }

        for outcome in Outcome::ALL {
            let count = by_index.values().filter(|o| **o == outcome).count();
            if count != 1 {
                return Err(ModelError::ArtifactMismatch(format!(
                    "outcome {} mapped {} times in target mapping",
                    outcome, count
                )));
            }
        }

        Ok(Self { by_index })
    }

    pub fn outcome(&self, index: usize) -> ModelResult<Outcome> {
        self.by_index
            .get(&index)
            .copied()
            .ok_or(ModelError::UnknownLabel(index))
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

/// How sure the classifier is of its top outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// High above 0.7, Medium above 0.5, Low otherwise
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.7 {
            ConfidenceLevel::High
        } else if confidence > 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Probability of each outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub dropout: f64,
    pub enrolled: f64,
    pub graduate: f64,
}

impl OutcomeProbabilities {
    /// Builds from classifier output indexed by label index
    pub fn from_classes(probabilities: &[f64], targets: &TargetMapping) -> ModelResult<Self> {
        if probabilities.len() != Outcome::ALL.len() {
            return Err(ModelError::InvalidProbabilities(probabilities.len()));
        }

        let mut result = Self {
            dropout: 0.0,
            enrolled: 0.0,
            graduate: 0.0,
        };
        for (index, p) in probabilities.iter().enumerate() {
            match targets.outcome(index)? {
                Outcome::Dropout => result.dropout = *p,
                Outcome::Enrolled => result.enrolled = *p,
                Outcome::Graduate => result.graduate = *p,
            }
        }
        Ok(result)
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Dropout => self.dropout,
            Outcome::Enrolled => self.enrolled,
            Outcome::Graduate => self.graduate,
        }
    }

    /// Highest single probability
    pub fn max(&self) -> f64 {
        self.dropout.max(self.enrolled).max(self.graduate)
    }
}
