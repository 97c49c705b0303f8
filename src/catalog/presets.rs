//! Form presets
//!
//! Named starting points for the data-entry form. Each preset produces a
//! complete raw record that can be submitted as-is or edited first.

use serde::Serialize;

use crate::preprocessing::RawRecord;

use super::fields;

/// Academic performance defaults for one semester
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemesterDefaults {
    pub enrolled: i64,
    pub approved: i64,
    pub grade: i64,
    pub credited: i64,
    pub evaluations: i64,
    pub without_evaluations: i64,
}

impl SemesterDefaults {
    const fn full(grade: i64) -> Self {
        Self {
            enrolled: 6,
            approved: 6,
            grade,
            credited: 0,
            evaluations: 6,
            without_evaluations: 0,
        }
    }

    const fn failing() -> Self {
        Self {
            enrolled: 6,
            approved: 0,
            grade: 0,
            credited: 0,
            evaluations: 0,
            without_evaluations: 0,
        }
    }
}

/// Defaults a preset pre-fills into the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetDefaults {
    pub age: i64,
    pub gender: i64,
    pub marital_status: i64,
    pub application_mode: i64,
    pub course: i64,
    pub previous_qualification_grade: i64,
    pub admission_grade: i64,
    pub international: i64,
    pub first_semester: SemesterDefaults,
    pub second_semester: SemesterDefaults,
}

/// Named form presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    CustomEntry,
    TypicalGraduate,
    AtRisk,
    International,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::CustomEntry,
        Preset::TypicalGraduate,
        Preset::AtRisk,
        Preset::International,
    ];

    /// Display name shown in the preset selector
    pub fn name(&self) -> &'static str {
        match self {
            Preset::CustomEntry => "Custom Entry",
            Preset::TypicalGraduate => "Typical Graduate Student",
            Preset::AtRisk => "At-Risk Student",
            Preset::International => "International Student",
        }
    }

    /// Finds a preset by its display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn defaults(&self) -> PresetDefaults {
        match self {
            Preset::CustomEntry => PresetDefaults {
                age: 20,
                gender: 0,
                marital_status: 1,
                application_mode: 1,
                course: 9254,
                previous_qualification_grade: 120,
                admission_grade: 120,
                international: 0,
                first_semester: SemesterDefaults::full(13),
                second_semester: SemesterDefaults::full(13),
            },
            Preset::TypicalGraduate => PresetDefaults {
                age: 19,
                gender: 1,
                marital_status: 1,
                application_mode: 15,
                course: 9254,
                previous_qualification_grade: 160,
                admission_grade: 142,
                international: 0,
                first_semester: SemesterDefaults::full(14),
                second_semester: SemesterDefaults::full(14),
            },
            Preset::AtRisk => PresetDefaults {
                age: 22,
                gender: 1,
                marital_status: 1,
                application_mode: 17,
                course: 171,
                previous_qualification_grade: 100,
                admission_grade: 110,
                international: 0,
                first_semester: SemesterDefaults::failing(),
                second_semester: SemesterDefaults::failing(),
            },
            Preset::International => PresetDefaults {
                age: 21,
                gender: 0,
                marital_status: 1,
                application_mode: 1,
                course: 9238,
                previous_qualification_grade: 135,
                admission_grade: 130,
                international: 1,
                first_semester: SemesterDefaults::full(13),
                second_semester: SemesterDefaults::full(14),
            },
        }
    }

    /// Builds the complete record the form submits when left untouched
    ///
    /// Fields the preset does not set take the form's first option.
    pub fn record(&self) -> RawRecord {
        let d = self.defaults();
        let mut record = RawRecord::new();

        record.insert(fields::MARITAL_STATUS, d.marital_status);
        record.insert(fields::GENDER, d.gender);
        record.insert(fields::AGE_AT_ENROLLMENT, d.age);
        record.insert(fields::NATIONALITY, 1);

        record.insert(fields::APPLICATION_MODE, d.application_mode);
        record.insert(fields::APPLICATION_ORDER, 1);
        record.insert(fields::COURSE, d.course);
        record.insert(fields::DAYTIME_EVENING_ATTENDANCE, 1);
        record.insert(fields::PREVIOUS_QUALIFICATION, 1);
        record.insert(fields::PREVIOUS_QUALIFICATION_GRADE, d.previous_qualification_grade);
        record.insert(fields::ADMISSION_GRADE, d.admission_grade);

        record.insert(fields::MOTHERS_QUALIFICATION, 1);
        record.insert(fields::FATHERS_QUALIFICATION, 1);
        record.insert(fields::MOTHERS_OCCUPATION, 0);
        record.insert(fields::FATHERS_OCCUPATION, 0);

        record.insert(fields::DISPLACED, 0);
        record.insert(fields::EDUCATIONAL_SPECIAL_NEEDS, 0);
        record.insert(fields::DEBTOR, 0);
        record.insert(fields::TUITION_FEES_UP_TO_DATE, 1);
        record.insert(fields::SCHOLARSHIP_HOLDER, 0);
        record.insert(fields::INTERNATIONAL, d.international);

        let first = d.first_semester;
        record.insert(fields::FIRST_SEM_CREDITED, first.credited);
        record.insert(fields::FIRST_SEM_ENROLLED, first.enrolled);
        record.insert(fields::FIRST_SEM_EVALUATIONS, first.evaluations);
        record.insert(fields::FIRST_SEM_APPROVED, first.approved);
        record.insert(fields::FIRST_SEM_GRADE, first.grade);
        record.insert(fields::FIRST_SEM_WITHOUT_EVALUATIONS, first.without_evaluations);

        let second = d.second_semester;
        record.insert(fields::SECOND_SEM_CREDITED, second.credited);
        record.insert(fields::SECOND_SEM_ENROLLED, second.enrolled);
        record.insert(fields::SECOND_SEM_EVALUATIONS, second.evaluations);
        record.insert(fields::SECOND_SEM_APPROVED, second.approved);
        record.insert(fields::SECOND_SEM_GRADE, second.grade);
        record.insert(fields::SECOND_SEM_WITHOUT_EVALUATIONS, second.without_evaluations);

        record.insert(fields::UNEMPLOYMENT_RATE, 10.8);
        record.insert(fields::INFLATION_RATE, 1.4);
        record.insert(fields::GDP, 1.74);

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("Nope"), None);
    }

    #[test]
    fn test_record_covers_every_column() {
        for preset in Preset::ALL {
            let record = preset.record();
            assert_eq!(record.len(), fields::ORIGINAL_COLUMNS.len());
            for column in fields::ORIGINAL_COLUMNS {
                assert!(record.contains(column), "{} missing {}", preset.name(), column);
            }
        }
    }

    #[test]
    fn test_at_risk_has_no_approved_units() {
        let record = Preset::AtRisk.record();
        assert_eq!(record.get_f64(fields::FIRST_SEM_APPROVED), Some(0.0));
        assert_eq!(record.get_f64(fields::COURSE), Some(171.0));
    }

    #[test]
    fn test_custom_entry_defaults() {
        let record = Preset::CustomEntry.record();
        assert_eq!(record.get_f64(fields::AGE_AT_ENROLLMENT), Some(20.0));
        assert_eq!(record.get_f64(fields::GDP), Some(1.74));
    }
}
