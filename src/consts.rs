//! Общие константы формата файла записей (slot layout).
//!
//! Layout одного слота (little-endian):
//! [id u32][pps 7×u16][first_name 15×u16][surname 15×u16][gender u8]
//! [department 15×u16][salary u64][full_time u8][reserved .. record_size]

// -------- Capacity --------
pub const MAX_CAPACITY: u32 = 100;
pub const DEFAULT_CAPACITY: u32 = 100;

// -------- Text fields (в UTF-16 code units) --------
pub const PPS_WIDTH: usize = 7;
pub const NAME_WIDTH: usize = 15;
pub const DEPARTMENT_WIDTH: usize = 15;

/// Pad code unit для текстовых полей фиксированной ширины.
pub const PAD_UNIT: u16 = 0x0000;

// -------- Offsets внутри слота --------
pub const OFF_ID: usize = 0;
pub const OFF_PPS: usize = OFF_ID + 4;
pub const OFF_FIRST_NAME: usize = OFF_PPS + PPS_WIDTH * 2;
pub const OFF_SURNAME: usize = OFF_FIRST_NAME + NAME_WIDTH * 2;
pub const OFF_GENDER: usize = OFF_SURNAME + NAME_WIDTH * 2;
pub const OFF_DEPARTMENT: usize = OFF_GENDER + 1;
pub const OFF_SALARY: usize = OFF_DEPARTMENT + DEPARTMENT_WIDTH * 2;
pub const OFF_FULL_TIME: usize = OFF_SALARY + 8;

/// Размер полезной нагрузки записи (без reserved-хвоста).
pub const PAYLOAD_SIZE: usize = OFF_FULL_TIME + 1;

/// Размер слота по умолчанию; хвост после PAYLOAD_SIZE всегда нули.
pub const DEFAULT_RECORD_SIZE: usize = 128;

/// Identity пустого слота.
pub const EMPTY_ID: u32 = 0;

pub const DEFAULT_DATA_FILE: &str = "employees.dat";
