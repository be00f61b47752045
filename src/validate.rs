//! Field validation for records coming from the outside (CLI, imports).
//!
//! The slot store itself only checks identity range and occupancy; callers run
//! these checks before `create`/`update`.

use thiserror::Error;

use crate::consts::{NAME_WIDTH, PPS_WIDTH};
use crate::record::Employee;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identity {0:?} is not a number in 1..={1}")]
    Identity(String, u32),
    #[error("personal number {0:?} must be exactly 7 alphanumeric characters")]
    PersonalNumber(String),
    #[error("{0} must not be empty")]
    EmptyName(&'static str),
    #[error("{0} longer than {1} characters")]
    TooLong(&'static str, usize),
    #[error("salary {0:?} is not a non-negative integer")]
    Salary(String),
}

pub fn is_valid_id(s: &str, max: u32) -> bool {
    match s.trim().parse::<u32>() {
        Ok(id) => id >= 1 && id <= max,
        Err(_) => false,
    }
}

pub fn is_valid_pps(pps: &str) -> bool {
    let t = pps.trim();
    t.chars().count() == PPS_WIDTH && t.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn parse_salary(s: &str) -> Result<u64, ValidationError> {
    s.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::Salary(s.to_string()))
}

/// Ширина текстовых полей в слоте считается в UTF-16 code units.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Check every field of `e` against the record constraints.
pub fn validate_employee(e: &Employee, capacity: u32) -> Result<(), ValidationError> {
    if e.identity == 0 || e.identity > capacity {
        return Err(ValidationError::Identity(e.identity.to_string(), capacity));
    }
    if !is_valid_pps(&e.personal_number) {
        return Err(ValidationError::PersonalNumber(e.personal_number.clone()));
    }
    for (field, v) in [("first name", &e.first_name), ("surname", &e.surname)] {
        if !is_valid_name(v) {
            return Err(ValidationError::EmptyName(field));
        }
        if utf16_len(v) > NAME_WIDTH {
            return Err(ValidationError::TooLong(field, NAME_WIDTH));
        }
    }
    if utf16_len(&e.department) > NAME_WIDTH {
        return Err(ValidationError::TooLong("department", NAME_WIDTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;

    fn good() -> Employee {
        Employee {
            identity: 1,
            personal_number: "1234567".into(),
            first_name: "John".into(),
            surname: "Doe".into(),
            gender: Gender::Male,
            department: "Sales".into(),
            salary: 50_000,
            full_time: true,
        }
    }

    #[test]
    fn id_checks() {
        assert!(is_valid_id(" 1 ", 100));
        assert!(is_valid_id("100", 100));
        assert!(!is_valid_id("0", 100));
        assert!(!is_valid_id("101", 100));
        assert!(!is_valid_id("x", 100));
    }

    #[test]
    fn pps_checks() {
        assert!(is_valid_pps("1234567"));
        assert!(is_valid_pps("12345AB"));
        assert!(!is_valid_pps("123456"));
        assert!(!is_valid_pps("1234-67"));
    }

    #[test]
    fn salary_checks() {
        assert_eq!(parse_salary(" 42 ").unwrap(), 42);
        assert!(parse_salary("-1").is_err());
        assert!(parse_salary("").is_err());
    }

    #[test]
    fn employee_checks() {
        assert!(validate_employee(&good(), 100).is_ok());

        let mut e = good();
        e.identity = 101;
        assert!(matches!(
            validate_employee(&e, 100),
            Err(ValidationError::Identity(..))
        ));

        let mut e = good();
        e.surname = "  ".into();
        assert_eq!(
            validate_employee(&e, 100),
            Err(ValidationError::EmptyName("surname"))
        );

        let mut e = good();
        e.department = "x".repeat(16);
        assert_eq!(
            validate_employee(&e, 100),
            Err(ValidationError::TooLong("department", NAME_WIDTH))
        );
    }

    #[test]
    fn name_width_counts_utf16_units() {
        // 15 символов, но 🎻 занимает два code unit: всего 16 > 15
        let mut e = good();
        e.first_name = format!("{}🎻", "a".repeat(14));
        assert_eq!(e.first_name.chars().count(), NAME_WIDTH);
        assert_eq!(
            validate_employee(&e, 100),
            Err(ValidationError::TooLong("first name", NAME_WIDTH))
        );

        e.first_name = format!("{}🎻", "a".repeat(13));
        assert!(validate_employee(&e, 100).is_ok());
    }
}
