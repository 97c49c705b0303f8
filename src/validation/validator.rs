//! Advisory record checks
//!
//! Each check is independent. A check whose fields are missing from the
//! record is skipped rather than reported. Warnings never block a
//! prediction; callers show them and carry on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::fields;
use crate::preprocessing::RawRecord;

/// Thresholds used by the checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Youngest plausible enrollment age
    pub min_age: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_age: fields::bounds::MIN_AGE as f64,
        }
    }
}

/// Semester covered by the curricular-units check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub fn label(&self) -> &'static str {
        match self {
            Semester::First => "1st sem",
            Semester::Second => "2nd sem",
        }
    }

    fn enrolled_field(&self) -> &'static str {
        match self {
            Semester::First => fields::FIRST_SEM_ENROLLED,
            Semester::Second => fields::SECOND_SEM_ENROLLED,
        }
    }

    fn approved_field(&self) -> &'static str {
        match self {
            Semester::First => fields::FIRST_SEM_APPROVED,
            Semester::Second => fields::SECOND_SEM_APPROVED,
        }
    }
}

/// A single advisory finding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationWarning {
    AgeBelowMinimum { age: f64, minimum: f64 },
    ApprovedExceedsEnrolled { semester: Semester, approved: f64, enrolled: f64 },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::AgeBelowMinimum { .. } => {
                write!(f, "Age seems too low for enrollment")
            }
            ValidationWarning::ApprovedExceedsEnrolled { semester, .. } => {
                write!(f, "Approved units exceed enrolled units ({})", semester.label())
            }
        }
    }
}

/// Runs the advisory checks with a fixed rule set
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Returns every finding for the record, in check order
    pub fn check(&self, record: &RawRecord) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if let Some(age) = record.get_f64(fields::AGE_AT_ENROLLMENT) {
            if age < self.rules.min_age {
                warnings.push(ValidationWarning::AgeBelowMinimum {
                    age,
                    minimum: self.rules.min_age,
                });
            }
        }

        for semester in [Semester::First, Semester::Second] {
            let approved = record.get_f64(semester.approved_field());
            let enrolled = record.get_f64(semester.enrolled_field());

            if let (Some(approved), Some(enrolled)) = (approved, enrolled) {
                if approved > enrolled {
                    warnings.push(ValidationWarning::ApprovedExceedsEnrolled {
                        semester,
                        approved,
                        enrolled,
                    });
                }
            }
        }

        warnings
    }

    /// Returns the findings as display strings; empty means no issues
    pub fn validate(&self, record: &RawRecord) -> Vec<String> {
        self.check(record).iter().map(ToString::to_string).collect()
    }
}

/// Validates a record with the default rules
pub fn validate(record: &RawRecord) -> Vec<String> {
    Validator::default().validate(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_record() -> RawRecord {
        RawRecord::new()
            .with(fields::AGE_AT_ENROLLMENT, 20)
            .with(fields::FIRST_SEM_ENROLLED, 6)
            .with(fields::FIRST_SEM_APPROVED, 6)
            .with(fields::SECOND_SEM_ENROLLED, 6)
            .with(fields::SECOND_SEM_APPROVED, 5)
    }

    #[test]
    fn test_clean_record_has_no_warnings() {
        assert!(validate(&clean_record()).is_empty());
    }

    #[test]
    fn test_age_below_minimum() {
        let record = clean_record().with(fields::AGE_AT_ENROLLMENT, 16);
        assert_eq!(validate(&record), vec!["Age seems too low for enrollment"]);
    }

    #[test]
    fn test_age_at_minimum_is_fine() {
        let record = clean_record().with(fields::AGE_AT_ENROLLMENT, 17);
        assert!(validate(&record).is_empty());
    }

    #[test]
    fn test_second_semester_checked_separately() {
        let record = clean_record().with(fields::SECOND_SEM_APPROVED, 7);
        assert_eq!(
            validate(&record),
            vec!["Approved units exceed enrolled units (2nd sem)"]
        );
    }

    #[test]
    fn test_all_checks_reported() {
        let record = clean_record()
            .with(fields::AGE_AT_ENROLLMENT, 15)
            .with(fields::FIRST_SEM_APPROVED, 9)
            .with(fields::SECOND_SEM_APPROVED, 9);
        assert_eq!(validate(&record).len(), 3);
    }

    #[test]
    fn test_missing_fields_skip_checks() {
        assert!(validate(&RawRecord::new()).is_empty());
    }

    #[test]
    fn test_custom_minimum_age() {
        let validator = Validator::new(ValidationRules { min_age: 21.0 });
        let warnings = validator.check(&clean_record());
        assert_eq!(
            warnings,
            vec![ValidationWarning::AgeBelowMinimum {
                age: 20.0,
                minimum: 21.0
            }]
        );
    }
}
