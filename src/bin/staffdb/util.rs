use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::io::Read;
use std::path::PathBuf;

use StaffDB::search::parse_identity;
use StaffDB::validate::is_valid_id;
use StaffDB::{Employee, SlotStore, StoreConfig};

use super::cli::StoreArgs;

/// Конфиг из env, поверх — флаги командной строки.
pub fn store_config(args: &StoreArgs) -> StoreConfig {
    let mut cfg = StoreConfig::from_env();
    if let Some(c) = args.capacity {
        cfg = cfg.with_capacity(c);
    }
    if let Some(rs) = args.record_size {
        cfg = cfg.with_record_size(rs);
    }
    cfg
}

pub fn open_store(args: &StoreArgs) -> Result<SlotStore> {
    let cfg = store_config(args);
    SlotStore::open_with_config(&args.path, cfg)
        .with_context(|| format!("open store {}", args.path.display()))
}

pub fn parse_id(s: &str, capacity: u32) -> Result<u32> {
    let id = parse_identity(s)?;
    if !is_valid_id(s, capacity) {
        return Err(anyhow!("id {} out of range 1..={}", id, capacity));
    }
    Ok(id)
}

/// Текстовые поля из JSON приводим к тому же виду, что и ввод `add`/`edit`.
pub fn trim_fields(e: &mut Employee) {
    for s in [
        &mut e.personal_number,
        &mut e.first_name,
        &mut e.surname,
        &mut e.department,
    ] {
        let t = s.trim();
        if t.len() != s.len() {
            *s = t.to_string();
        }
    }
}

pub fn print_employee(e: &Employee, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(e)?);
    } else {
        println!("Employee ID: {}", e.identity);
        println!("PPS Number:  {}", e.personal_number);
        println!("First Name:  {}", e.first_name);
        println!("Surname:     {}", e.surname);
        println!("Gender:      {}", e.gender);
        println!("Department:  {}", e.department);
        println!("Salary:      {}", e.salary);
        println!("Full Time:   {}", if e.full_time { "Yes" } else { "No" });
    }
    Ok(())
}

pub fn print_not_found(what: &str, json: bool) {
    if json {
        println!("null");
    } else {
        println!("NOT FOUND {}", what);
    }
}

pub fn read_all(p: &PathBuf) -> Result<Vec<u8>> {
    let mut f = OpenOptions::new()
        .read(true)
        .open(p)
        .with_context(|| format!("open {}", p.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(buf)
}
