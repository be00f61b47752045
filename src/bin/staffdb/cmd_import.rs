use anyhow::{Context, Result};
use log::warn;
use std::path::PathBuf;

use StaffDB::validate::validate_employee;
use StaffDB::Employee;

use super::cli::StoreArgs;
use super::util::{open_store, read_all, trim_fields};

pub fn exec(args: StoreArgs, file: PathBuf) -> Result<()> {
    let raw = read_all(&file)?;
    let items: Vec<Employee> = serde_json::from_slice(&raw)
        .with_context(|| format!("parse JSON array from {}", file.display()))?;

    let mut store = open_store(&args)?;
    let mut added = 0usize;
    let mut skipped = 0usize;
    for mut emp in items {
        trim_fields(&mut emp);
        let id = emp.identity;
        if let Err(e) = validate_employee(&emp, store.capacity()) {
            warn!("import: skip #{}: {}", id, e);
            skipped += 1;
            continue;
        }
        if let Some(other) = store.find_by_pps(&emp.personal_number) {
            warn!(
                "import: skip #{}: PPS {} already used by #{}",
                id, emp.personal_number, other.identity
            );
            skipped += 1;
            continue;
        }
        match store.create(emp) {
            Ok(_) => added += 1,
            Err(e) => {
                warn!("import: skip #{}: {}", id, e);
                skipped += 1;
            }
        }
    }
    println!("IMPORTED {} record(s), skipped {}", added, skipped);
    store.close()?;
    Ok(())
}
