//! record/codec — кодирование одной записи в слот фиксированного размера.
//!
//! Формат (LE): см. crate::consts. Текстовые поля — UTF-16 code units,
//! дополненные PAD_UNIT до объявленной ширины; длиннее — обрезаются по границе символа.
//! id == 0 декодируется как Slot::Empty независимо от остальных байт.

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{
    DEPARTMENT_WIDTH, EMPTY_ID, NAME_WIDTH, OFF_DEPARTMENT, OFF_FIRST_NAME, OFF_FULL_TIME,
    OFF_GENDER, OFF_ID, OFF_PPS, OFF_SALARY, OFF_SURNAME, PAD_UNIT, PAYLOAD_SIZE, PPS_WIDTH,
};
use crate::error::{Result, StoreError};

use super::{Employee, Gender, Slot};

/// Byte offset of the slot for `identity` (1-based).
#[inline]
pub fn offset_of(identity: u32, record_size: usize) -> u64 {
    debug_assert!(identity != EMPTY_ID);
    (identity as u64 - 1) * record_size as u64
}

/// Encode `slot` into `out`. The whole block is rewritten: reserved tail is zeroed.
pub fn encode(slot: &Slot, out: &mut [u8]) -> Result<()> {
    check_block(out.len())?;
    out.fill(0);
    if let Slot::Occupied(e) = slot {
        write_employee(e, out);
    }
    Ok(())
}

pub fn encode_employee(e: &Employee, record_size: usize) -> Result<Vec<u8>> {
    check_block(record_size)?;
    let mut buf = vec![0u8; record_size];
    write_employee(e, &mut buf);
    Ok(buf)
}

#[inline]
fn check_block(len: usize) -> Result<()> {
    if len < PAYLOAD_SIZE {
        return Err(StoreError::ShortBlock {
            len,
            need: PAYLOAD_SIZE,
        });
    }
    Ok(())
}

fn write_employee(e: &Employee, out: &mut [u8]) {
    LittleEndian::write_u32(&mut out[OFF_ID..OFF_ID + 4], e.identity);
    write_text(&mut out[OFF_PPS..], PPS_WIDTH, &e.personal_number);
    write_text(&mut out[OFF_FIRST_NAME..], NAME_WIDTH, &e.first_name);
    write_text(&mut out[OFF_SURNAME..], NAME_WIDTH, &e.surname);
    out[OFF_GENDER] = e.gender.as_flag();
    write_text(&mut out[OFF_DEPARTMENT..], DEPARTMENT_WIDTH, &e.department);
    LittleEndian::write_u64(&mut out[OFF_SALARY..OFF_SALARY + 8], e.salary);
    out[OFF_FULL_TIME] = e.full_time as u8;
}

/// Canonical empty slot: all zero bytes.
pub fn encode_empty(record_size: usize) -> Vec<u8> {
    vec![0u8; record_size]
}

pub fn decode(block: &[u8]) -> Result<Slot> {
    check_block(block.len())?;
    let identity = LittleEndian::read_u32(&block[OFF_ID..OFF_ID + 4]);
    if identity == EMPTY_ID {
        return Ok(Slot::Empty);
    }
    Ok(Slot::Occupied(Employee {
        identity,
        personal_number: read_text(&block[OFF_PPS..], PPS_WIDTH),
        first_name: read_text(&block[OFF_FIRST_NAME..], NAME_WIDTH),
        surname: read_text(&block[OFF_SURNAME..], NAME_WIDTH),
        gender: Gender::from_flag(block[OFF_GENDER]),
        department: read_text(&block[OFF_DEPARTMENT..], DEPARTMENT_WIDTH),
        salary: LittleEndian::read_u64(&block[OFF_SALARY..OFF_SALARY + 8]),
        full_time: block[OFF_FULL_TIME] != 0,
    }))
}

/// Записать строку в `width` code units; остаток — PAD_UNIT.
/// Суррогатная пара, не влезающая целиком, отбрасывается.
fn write_text(out: &mut [u8], width: usize, s: &str) {
    let mut units = 0usize;
    let mut pair = [0u16; 2];
    for ch in s.chars() {
        let enc = ch.encode_utf16(&mut pair);
        if units + enc.len() > width {
            break;
        }
        for u in enc.iter() {
            LittleEndian::write_u16(&mut out[units * 2..units * 2 + 2], *u);
            units += 1;
        }
    }
    for i in units..width {
        LittleEndian::write_u16(&mut out[i * 2..i * 2 + 2], PAD_UNIT);
    }
}

fn read_text(block: &[u8], width: usize) -> String {
    let mut units: Vec<u16> = (0..width)
        .map(|i| LittleEndian::read_u16(&block[i * 2..i * 2 + 2]))
        .collect();
    while units.last() == Some(&PAD_UNIT) {
        units.pop();
    }
    String::from_utf16_lossy(&units)
}
