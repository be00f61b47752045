use anyhow::{anyhow, Result};

use StaffDB::validate::{parse_salary, validate_employee};

use super::cli::{GenderArg, StoreArgs};
use super::util::{open_store, parse_id};

pub struct EditArgs {
    pub id: String,
    pub pps: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub gender: Option<GenderArg>,
    pub department: Option<String>,
    pub salary: Option<String>,
    pub full_time: Option<bool>,
}

pub fn exec(args: StoreArgs, a: EditArgs) -> Result<()> {
    let mut store = open_store(&args)?;
    let id = parse_id(&a.id, store.capacity())?;
    let mut emp = store
        .read(id)
        .cloned()
        .ok_or_else(|| anyhow!("employee #{} does not exist", id))?;

    if let Some(v) = a.pps {
        emp.personal_number = v.trim().to_string();
    }
    if let Some(v) = a.first_name {
        emp.first_name = v.trim().to_string();
    }
    if let Some(v) = a.surname {
        emp.surname = v.trim().to_string();
    }
    if let Some(v) = a.gender {
        emp.gender = v.into();
    }
    if let Some(v) = a.department {
        emp.department = v.trim().to_string();
    }
    if let Some(v) = a.salary {
        emp.salary = parse_salary(&v)?;
    }
    if let Some(v) = a.full_time {
        emp.full_time = v;
    }

    validate_employee(&emp, store.capacity())?;
    if let Some(other) = store.find_by_pps(&emp.personal_number) {
        if other.identity != id {
            return Err(anyhow!(
                "PPS number {} already used by employee #{}",
                emp.personal_number,
                other.identity
            ));
        }
    }

    store.update(emp)?;
    println!("UPDATED #{}", id);
    store.close()?;
    Ok(())
}
