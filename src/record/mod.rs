//! record — модель записи сотрудника и codec фиксированного слота.
//!
//! - mod.rs   — Employee, Gender, Slot
//! - codec.rs — encode/decode слота (byteorder, LittleEndian)

pub mod codec;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use codec::{decode, encode, encode_employee, encode_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Однобайтовый флаг на диске: 1 = Male, 0 = Female.
    #[inline]
    pub fn as_flag(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }

    #[inline]
    pub fn from_flag(b: u8) -> Self {
        if b != 0 {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// One employee record. `identity` is 1-based and doubles as the slot address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub identity: u32,
    pub personal_number: String,
    pub first_name: String,
    pub surname: String,
    pub gender: Gender,
    #[serde(default)]
    pub department: String,
    pub salary: u64,
    pub full_time: bool,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} [{}] {} dept={:?} salary={} {}",
            self.identity,
            self.first_name,
            self.surname,
            self.personal_number,
            self.gender,
            self.department,
            self.salary,
            if self.full_time { "full-time" } else { "part-time" },
        )
    }
}

/// Decoded content of one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Occupied(Employee),
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn into_option(self) -> Option<Employee> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(e) => Some(e),
        }
    }
}
