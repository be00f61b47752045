use anyhow::{anyhow, Result};

use StaffDB::validate::{parse_salary, validate_employee};
use StaffDB::Employee;

use super::cli::{GenderArg, StoreArgs};
use super::util::{open_store, parse_id};

pub struct AddArgs {
    pub id: String,
    pub pps: String,
    pub first_name: String,
    pub surname: String,
    pub gender: GenderArg,
    pub department: String,
    pub salary: String,
    pub full_time: bool,
}

pub fn exec(args: StoreArgs, a: AddArgs) -> Result<()> {
    let mut store = open_store(&args)?;
    let emp = Employee {
        identity: parse_id(&a.id, store.capacity())?,
        personal_number: a.pps.trim().to_string(),
        first_name: a.first_name.trim().to_string(),
        surname: a.surname.trim().to_string(),
        gender: a.gender.into(),
        department: a.department.trim().to_string(),
        salary: parse_salary(&a.salary)?,
        full_time: a.full_time,
    };
    validate_employee(&emp, store.capacity())?;
    if let Some(other) = store.find_by_pps(&emp.personal_number) {
        return Err(anyhow!(
            "PPS number {} already used by employee #{}",
            emp.personal_number,
            other.identity
        ));
    }

    let handle = store.create(emp)?;
    println!("ADDED #{} (offset {})", handle.identity, handle.offset);
    store.close()?;
    Ok(())
}
