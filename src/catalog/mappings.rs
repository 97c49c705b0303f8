//! Human-readable labels for categorical codes
//!
//! Static lookup tables. Codes absent from a table are still valid input;
//! they simply have no label and fall back to a generic one.

use serde::Serialize;

use super::fields;

pub type LabelTable = &'static [(i64, &'static str)];

pub const MARITAL_STATUS: LabelTable = &[
    (1, "Single"),
    (2, "Married"),
    (3, "Widowed"),
    (4, "Divorced"),
    (5, "Civil Union"),
    (6, "Legally Separated"),
];

pub const APPLICATION_MODE: LabelTable = &[
    (1, "1st Phase - General Contingent"),
    (2, "Ordinance No. 612/93"),
    (5, "1st Phase - Special Contingent (Azores)"),
    (7, "Holders of Other Higher Courses"),
    (10, "Ordinance No. 854-B/99"),
    (15, "International Student (Bachelor)"),
    (16, "1st Phase - Special Contingent (Madeira)"),
    (17, "2nd Phase - General Contingent"),
    (18, "3rd Phase - General Contingent"),
    (26, "Ordinance No. 533-A/99, item b2"),
    (27, "Ordinance No. 533-A/99, item b3"),
    (39, "Over 23 years old"),
    (42, "Transfer"),
    (43, "Change of course"),
    (44, "Technological specialization diploma holders"),
    (51, "Change of institution/course"),
    (53, "Short cycle diploma holders"),
    (57, "Change of institution/course (International)"),
];

pub const COURSE: LabelTable = &[
    (33, "Biofuel Production Technologies"),
    (171, "Animation and Multimedia Design"),
    (8014, "Social Service (evening attendance)"),
    (9003, "Agronomy"),
    (9070, "Communication Design"),
    (9085, "Veterinary Nursing"),
    (9119, "Informatics Engineering"),
    (9130, "Equinculture"),
    (9147, "Management"),
    (9238, "Social Service"),
    (9254, "Tourism"),
    (9500, "Nursing"),
    (9556, "Oral Hygiene"),
    (9670, "Advertising and Marketing Management"),
    (9773, "Journalism and Communication"),
    (9853, "Basic Education"),
    (9991, "Management (evening attendance)"),
];

pub const QUALIFICATION: LabelTable = &[
    (1, "Secondary education"),
    (2, "Higher education - bachelor's degree"),
    (3, "Higher education - degree"),
    (4, "Higher education - master's"),
    (5, "Higher education - doctorate"),
    (6, "Frequency of higher education"),
    (9, "12th year of schooling - not completed"),
    (10, "11th year of schooling - not completed"),
    (12, "Other - 11th year of schooling"),
    (14, "10th year of schooling"),
    (15, "10th year of schooling - not completed"),
    (19, "Basic education 3rd cycle (9th/10th/11th year) or equiv."),
    (38, "Basic education 2nd cycle (6th/7th/8th year) or equiv."),
    (39, "Technological specialization course"),
    (40, "Higher education - degree (1st cycle)"),
    (42, "Professional course"),
    (43, "Higher education - master (2nd cycle)"),
];

pub const OCCUPATION: LabelTable = &[
    (0, "Student"),
    (1, "Representatives of the Legislative Power and Executive Bodies"),
    (2, "Specialists in Intellectual and Scientific Activities"),
    (3, "Intermediate Level Technicians and Professions"),
    (4, "Administrative staff"),
    (5, "Personal Services, Security and Safety Workers"),
    (6, "Farmers and Skilled Workers in Agriculture"),
    (7, "Skilled Workers in Industry, Construction and Craftsmen"),
    (8, "Installation and Machine Operators and Assembly Workers"),
    (9, "Unskilled Workers"),
    (10, "Armed Forces Professions"),
    (90, "Other Situation"),
    (99, "Unspecified"),
    (122, "Health professionals"),
    (123, "Teachers"),
    (125, "Specialists in information and communication technologies"),
    (131, "Intermediate level science and engineering technicians"),
    (132, "Technicians and associate professionals, health"),
    (134, "Intermediate level technicians from legal, social, sports"),
    (141, "Office workers, secretaries in general and data processing"),
    (143, "Data, accounting, statistical, financial services"),
    (144, "Other administrative support staff"),
    (151, "Personal service workers"),
    (152, "Sellers"),
    (153, "Personal care workers and the like"),
    (171, "Skilled construction workers and the like, except electricians"),
    (173, "Skilled workers in printing, precision instrument manufacturing"),
    (175, "Workers in food processing, woodworking, clothing"),
    (191, "Cleaning workers"),
    (192, "Unskilled workers in agriculture, animal production"),
    (193, "Unskilled workers in extractive industry, construction"),
    (194, "Meal preparation assistants"),
];

pub const NATIONALITY: LabelTable = &[
    (1, "Portuguese"),
    (2, "German"),
    (6, "Spanish"),
    (11, "Italian"),
    (13, "Dutch"),
    (14, "English"),
    (17, "Lithuanian"),
    (21, "Angolan"),
    (22, "Cape Verdean"),
    (24, "Guinean"),
    (25, "Mozambican"),
    (26, "Santomean"),
    (32, "Turkish"),
    (41, "Brazilian"),
    (62, "Romanian"),
    (100, "Moldova (Republic of)"),
    (101, "Mexican"),
    (103, "Ukrainian"),
    (105, "Russian"),
    (108, "Cuban"),
    (109, "Colombian"),
];

pub const GENDER: LabelTable = &[(0, "Female"), (1, "Male")];

pub const ATTENDANCE: LabelTable = &[(0, "Evening"), (1, "Daytime")];

pub const YES_NO: LabelTable = &[(0, "No"), (1, "Yes")];

/// Returns the label table used for a categorical field, if any
pub fn table_for(field: &str) -> Option<LabelTable> {
    let table = match field {
        fields::MARITAL_STATUS => MARITAL_STATUS,
        fields::APPLICATION_MODE => APPLICATION_MODE,
        fields::COURSE => COURSE,
        fields::PREVIOUS_QUALIFICATION
        | fields::MOTHERS_QUALIFICATION
        | fields::FATHERS_QUALIFICATION => QUALIFICATION,
        fields::MOTHERS_OCCUPATION | fields::FATHERS_OCCUPATION => OCCUPATION,
        fields::NATIONALITY => NATIONALITY,
        fields::GENDER => GENDER,
        fields::DAYTIME_EVENING_ATTENDANCE => ATTENDANCE,
        fields::DISPLACED
        | fields::EDUCATIONAL_SPECIAL_NEEDS
        | fields::DEBTOR
        | fields::TUITION_FEES_UP_TO_DATE
        | fields::SCHOLARSHIP_HOLDER
        | fields::INTERNATIONAL => YES_NO,
        _ => return None,
    };
    Some(table)
}

/// Looks up the label for a code of a categorical field
pub fn label(field: &str, code: i64) -> Option<&'static str> {
    table_for(field)?
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// One selectable option of a categorical field
#[derive(Debug, Clone, Serialize)]
pub struct CodeLabel {
    pub code: i64,
    pub label: &'static str,
}

/// Label table of one field, serialized for form rendering
#[derive(Debug, Clone, Serialize)]
pub struct FieldOptions {
    pub field: &'static str,
    pub options: Vec<CodeLabel>,
}

/// All categorical fields that have a label table, in catalog order
pub fn all_field_options() -> Vec<FieldOptions> {
    fields::CATEGORICAL_FIELDS
        .iter()
        .filter_map(|&field| {
            table_for(field).map(|table| FieldOptions {
                field,
                options: table
                    .iter()
                    .map(|&(code, label)| CodeLabel { code, label })
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(label(fields::COURSE, 9254), Some("Tourism"));
        assert_eq!(label(fields::MARITAL_STATUS, 1), Some("Single"));
        assert_eq!(label(fields::FATHERS_OCCUPATION, 123), Some("Teachers"));
        assert_eq!(label(fields::DEBTOR, 1), Some("Yes"));
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(label(fields::COURSE, 1), None);
    }

    #[test]
    fn test_numeric_field_has_no_table() {
        assert!(table_for(fields::AGE_AT_ENROLLMENT).is_none());
        assert!(label(fields::GDP, 1).is_none());
    }

    #[test]
    fn test_codes_unique_per_table() {
        for table in [MARITAL_STATUS, APPLICATION_MODE, COURSE, QUALIFICATION, OCCUPATION, NATIONALITY] {
            let mut codes: Vec<_> = table.iter().map(|(c, _)| *c).collect();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), table.len());
        }
    }

    #[test]
    fn test_all_field_options_skips_application_order() {
        let options = all_field_options();
        assert!(options.iter().all(|o| o.field != fields::APPLICATION_ORDER));
        assert!(options.iter().any(|o| o.field == fields::COURSE));
    }
}
