use anyhow::Result;

use StaffDB::Employee;

use super::cli::StoreArgs;
use super::util::open_store;

pub fn exec(args: StoreArgs, json: bool) -> Result<()> {
    let store = open_store(&args)?;
    if json {
        let all: Vec<&Employee> = store.occupied().collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else {
        println!(
            "{:>3}  {:<7}  {:<15}  {:<15}  {:<6}  {:<15}  {:>10}  {}",
            "ID", "PPS", "Surname", "First Name", "Gender", "Department", "Salary", "Full Time"
        );
        for e in store.occupied() {
            println!(
                "{:>3}  {:<7}  {:<15}  {:<15}  {:<6}  {:<15}  {:>10}  {}",
                e.identity,
                e.personal_number,
                e.surname,
                e.first_name,
                e.gender,
                e.department,
                e.salary,
                if e.full_time { "Yes" } else { "No" }
            );
        }
        println!("{} of {} slots occupied", store.len(), store.capacity());
    }
    store.close()?;
    Ok(())
}
