//! Field names of the student record
//!
//! These are the column names of the training dataset after cleanup
//! (apostrophes removed, `Nacionality` spelled `Nationality`). Raw records
//! use them as keys and the feature schema derives its one-hot columns
//! from them.

pub const MARITAL_STATUS: &str = "Marital status";
pub const APPLICATION_MODE: &str = "Application mode";
pub const APPLICATION_ORDER: &str = "Application order";
pub const COURSE: &str = "Course";
pub const DAYTIME_EVENING_ATTENDANCE: &str = "Daytime/evening attendance";
pub const PREVIOUS_QUALIFICATION: &str = "Previous qualification";
pub const PREVIOUS_QUALIFICATION_GRADE: &str = "Previous qualification (grade)";
pub const NATIONALITY: &str = "Nationality";
pub const MOTHERS_QUALIFICATION: &str = "Mothers qualification";
pub const FATHERS_QUALIFICATION: &str = "Fathers qualification";
pub const MOTHERS_OCCUPATION: &str = "Mothers occupation";
pub const FATHERS_OCCUPATION: &str = "Fathers occupation";
pub const ADMISSION_GRADE: &str = "Admission grade";
pub const DISPLACED: &str = "Displaced";
pub const EDUCATIONAL_SPECIAL_NEEDS: &str = "Educational special needs";
pub const DEBTOR: &str = "Debtor";
pub const TUITION_FEES_UP_TO_DATE: &str = "Tuition fees up to date";
pub const GENDER: &str = "Gender";
pub const SCHOLARSHIP_HOLDER: &str = "Scholarship holder";
pub const AGE_AT_ENROLLMENT: &str = "Age at enrollment";
pub const INTERNATIONAL: &str = "International";

pub const FIRST_SEM_CREDITED: &str = "Curricular units 1st sem (credited)";
pub const FIRST_SEM_ENROLLED: &str = "Curricular units 1st sem (enrolled)";
pub const FIRST_SEM_EVALUATIONS: &str = "Curricular units 1st sem (evaluations)";
pub const FIRST_SEM_APPROVED: &str = "Curricular units 1st sem (approved)";
pub const FIRST_SEM_GRADE: &str = "Curricular units 1st sem (grade)";
pub const FIRST_SEM_WITHOUT_EVALUATIONS: &str = "Curricular units 1st sem (without evaluations)";

pub const SECOND_SEM_CREDITED: &str = "Curricular units 2nd sem (credited)";
pub const SECOND_SEM_ENROLLED: &str = "Curricular units 2nd sem (enrolled)";
pub const SECOND_SEM_EVALUATIONS: &str = "Curricular units 2nd sem (evaluations)";
pub const SECOND_SEM_APPROVED: &str = "Curricular units 2nd sem (approved)";
pub const SECOND_SEM_GRADE: &str = "Curricular units 2nd sem (grade)";
pub const SECOND_SEM_WITHOUT_EVALUATIONS: &str = "Curricular units 2nd sem (without evaluations)";

pub const UNEMPLOYMENT_RATE: &str = "Unemployment rate";
pub const INFLATION_RATE: &str = "Inflation rate";
pub const GDP: &str = "GDP";

/// Fields holding nominal codes rather than magnitudes.
///
/// Each of these is expanded into `<field>_<value>` indicator columns
/// before the record reaches the classifier.
pub const CATEGORICAL_FIELDS: [&str; 18] = [
    MARITAL_STATUS,
    APPLICATION_MODE,
    COURSE,
    DAYTIME_EVENING_ATTENDANCE,
    PREVIOUS_QUALIFICATION,
    NATIONALITY,
    MOTHERS_QUALIFICATION,
    FATHERS_QUALIFICATION,
    MOTHERS_OCCUPATION,
    FATHERS_OCCUPATION,
    GENDER,
    DISPLACED,
    EDUCATIONAL_SPECIAL_NEEDS,
    DEBTOR,
    TUITION_FEES_UP_TO_DATE,
    SCHOLARSHIP_HOLDER,
    INTERNATIONAL,
    APPLICATION_ORDER,
];

/// Every column a complete form submission carries, in dataset order.
pub const ORIGINAL_COLUMNS: [&str; 36] = [
    MARITAL_STATUS,
    APPLICATION_MODE,
    APPLICATION_ORDER,
    COURSE,
    DAYTIME_EVENING_ATTENDANCE,
    PREVIOUS_QUALIFICATION,
    PREVIOUS_QUALIFICATION_GRADE,
    NATIONALITY,
    MOTHERS_QUALIFICATION,
    FATHERS_QUALIFICATION,
    MOTHERS_OCCUPATION,
    FATHERS_OCCUPATION,
    ADMISSION_GRADE,
    DISPLACED,
    EDUCATIONAL_SPECIAL_NEEDS,
    DEBTOR,
    TUITION_FEES_UP_TO_DATE,
    GENDER,
    SCHOLARSHIP_HOLDER,
    AGE_AT_ENROLLMENT,
    INTERNATIONAL,
    FIRST_SEM_CREDITED,
    FIRST_SEM_ENROLLED,
    FIRST_SEM_EVALUATIONS,
    FIRST_SEM_APPROVED,
    FIRST_SEM_GRADE,
    FIRST_SEM_WITHOUT_EVALUATIONS,
    SECOND_SEM_CREDITED,
    SECOND_SEM_ENROLLED,
    SECOND_SEM_EVALUATIONS,
    SECOND_SEM_APPROVED,
    SECOND_SEM_GRADE,
    SECOND_SEM_WITHOUT_EVALUATIONS,
    UNEMPLOYMENT_RATE,
    INFLATION_RATE,
    GDP,
];

/// Input bounds enforced by the data-entry form
pub mod bounds {
    pub const MIN_AGE: i64 = 17;
    pub const MAX_AGE: i64 = 70;
    pub const MIN_GRADE: i64 = 0;
    pub const MAX_GRADE: i64 = 20;
    pub const MIN_QUALIFICATION_GRADE: i64 = 95;
    pub const MAX_QUALIFICATION_GRADE: i64 = 190;
}
