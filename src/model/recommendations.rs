//! Intervention recommendations
//!
//! Simple rules keyed on the predicted outcome and a few raw fields.

use std::fmt;

use serde::Serialize;

use crate::catalog::fields;
use crate::preprocessing::RawRecord;

use super::outcome::Outcome;

/// A suggested follow-up action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub detail: &'static str,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

const ACADEMIC_SUPPORT: Recommendation = Recommendation {
    title: "Academic Support",
    detail: "Provide tutoring for struggling courses",
};
const FINANCIAL_AID: Recommendation = Recommendation {
    title: "Financial Aid",
    detail: "Consider scholarship opportunities",
};
const FLEXIBLE_SCHEDULING: Recommendation = Recommendation {
    title: "Flexible Scheduling",
    detail: "Offer evening or part-time options",
};
const FINANCIAL_COUNSELING: Recommendation = Recommendation {
    title: "Financial Counseling",
    detail: "Address outstanding debts",
};
const SUCCESS_INDICATORS: Recommendation = Recommendation {
    title: "Success Indicators",
    detail: "This student shows strong potential for graduation",
};
const CONTINUE_SUPPORT: Recommendation = Recommendation {
    title: "Continue Support",
    detail: "Maintain current academic support systems",
};
const REGULAR_MONITORING: Recommendation = Recommendation {
    title: "Regular Monitoring",
    detail: "Schedule periodic academic check-ins",
};
const GOAL_SETTING: Recommendation = Recommendation {
    title: "Goal Setting",
    detail: "Help establish clear academic objectives",
};

/// Recommendations for a predicted outcome
///
/// Dropout advice depends on the record; missing fields trigger nothing.
pub fn recommendations(outcome: Outcome, record: &RawRecord) -> Vec<Recommendation> {
    match outcome {
        Outcome::Dropout => {
            let mut out = Vec::new();
            if record.get_f64(fields::FIRST_SEM_APPROVED) == Some(0.0) {
                out.push(ACADEMIC_SUPPORT);
            }
            if record.get_f64(fields::SCHOLARSHIP_HOLDER) == Some(0.0) {
                out.push(FINANCIAL_AID);
            }
            if matches!(record.get_f64(fields::AGE_AT_ENROLLMENT), Some(age) if age > 25.0) {
                out.push(FLEXIBLE_SCHEDULING);
            }
            if record.get_f64(fields::DEBTOR) == Some(1.0) {
                out.push(FINANCIAL_COUNSELING);
            }
            out
        }
        Outcome::Graduate => vec![SUCCESS_INDICATORS, CONTINUE_SUPPORT],
        Outcome::Enrolled => vec![REGULAR_MONITORING, GOAL_SETTING],
    }
}
