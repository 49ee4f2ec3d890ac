//! Domain model for one roster row.
//!
//! - [`StudentRecord`] - one student, 14 opaque text fields in fixed order
//! - [`COLUMNS`] - the fixed header, used for both input position and output

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// Number of columns in every roster row.
pub const COLUMN_COUNT: usize = 14;

/// Fixed header, in field order.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "MATRIC_NUM",
    "JAMB_NUM",
    "SURNAME",
    "FIRST_NAME",
    "MIDDLE_NAME",
    "STATE",
    "LGA",
    "ENTRY_MODE",
    "SEX",
    "DOB",
    "EMAIL",
    "MARITAL_STATUS",
    "NEXT_OF_KIN",
    "NEXT_OF_KIN_ADDRESS",
];

// =============================================================================
// Student Record
// =============================================================================

/// One parsed roster row.
///
/// Values are kept verbatim (after leading-whitespace trimming by the
/// loader); nothing is validated for format or non-emptiness. Fields are
/// read through accessors only, so a record never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StudentRecord {
    matric_num: String,
    jamb_num: String,
    surname: String,
    first_name: String,
    middle_name: String,
    state: String,
    lga: String,
    entry_mode: String,
    sex: String,
    dob: String,
    email: String,
    marital_status: String,
    next_of_kin: String,
    next_of_kin_address: String,
}

impl StudentRecord {
    /// Build a record from exactly [`COLUMN_COUNT`] values in header order.
    ///
    /// `row` is the 1-based row number in the source file, used only for
    /// the error.
    pub fn from_fields(fields: Vec<String>, row: usize) -> LoadResult<Self> {
        let found = fields.len();
        let fields: [String; COLUMN_COUNT] = fields.try_into().map_err(|_| LoadError::RowShape {
            row,
            found,
            expected: COLUMN_COUNT,
        })?;
        let [
            matric_num,
            jamb_num,
            surname,
            first_name,
            middle_name,
            state,
            lga,
            entry_mode,
            sex,
            dob,
            email,
            marital_status,
            next_of_kin,
            next_of_kin_address,
        ] = fields;

        Ok(Self {
            matric_num,
            jamb_num,
            surname,
            first_name,
            middle_name,
            state,
            lga,
            entry_mode,
            sex,
            dob,
            email,
            marital_status,
            next_of_kin,
            next_of_kin_address,
        })
    }

    /// All fields in header order.
    pub fn fields(&self) -> [&str; COLUMN_COUNT] {
        [
            self.matric_num.as_str(),
            self.jamb_num.as_str(),
            self.surname.as_str(),
            self.first_name.as_str(),
            self.middle_name.as_str(),
            self.state.as_str(),
            self.lga.as_str(),
            self.entry_mode.as_str(),
            self.sex.as_str(),
            self.dob.as_str(),
            self.email.as_str(),
            self.marital_status.as_str(),
            self.next_of_kin.as_str(),
            self.next_of_kin_address.as_str(),
        ]
    }

    /// Matriculation number, the sort key within a state.
    pub fn matric_num(&self) -> &str {
        &self.matric_num
    }

    pub fn jamb_num(&self) -> &str {
        &self.jamb_num
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn middle_name(&self) -> &str {
        &self.middle_name
    }

    /// State of origin, the grouping key.
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn lga(&self) -> &str {
        &self.lga
    }

    pub fn entry_mode(&self) -> &str {
        &self.entry_mode
    }

    pub fn sex(&self) -> &str {
        &self.sex
    }

    pub fn dob(&self) -> &str {
        &self.dob
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn marital_status(&self) -> &str {
        &self.marital_status
    }

    pub fn next_of_kin(&self) -> &str {
        &self.next_of_kin
    }

    pub fn next_of_kin_address(&self) -> &str {
        &self.next_of_kin_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fields_keep_header_order() {
        let values = [
            "M1", "J1", "Ade", "Bola", "C", "LAGOS", "Ikeja", "UTME", "F", "2001-01-01",
            "a@b.c", "Single", "Kin", "1 Road",
        ];
        let record = StudentRecord::from_fields(row(&values), 2).unwrap();

        assert_eq!(record.fields(), values);
        assert_eq!(record.matric_num(), "M1");
        assert_eq!(record.state(), "LAGOS");
        assert_eq!(record.next_of_kin_address(), "1 Road");
    }

    #[test]
    fn test_wrong_arity_is_row_shape() {
        let err = StudentRecord::from_fields(row(&["M1", "J1", "Ade"]), 7).unwrap_err();
        match err {
            LoadError::RowShape { row, found, expected } => {
                assert_eq!(row, 7);
                assert_eq!(found, 3);
                assert_eq!(expected, COLUMN_COUNT);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let too_many = vec![String::new(); COLUMN_COUNT + 1];
        assert!(StudentRecord::from_fields(too_many, 3).is_err());
    }

    #[test]
    fn test_serializes_with_column_names() {
        let record = StudentRecord::from_fields(vec!["x".to_string(); COLUMN_COUNT], 2).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), COLUMN_COUNT);
        for column in COLUMNS {
            assert!(obj.contains_key(column), "missing {}", column);
        }
    }
}
