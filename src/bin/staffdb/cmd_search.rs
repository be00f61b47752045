use anyhow::{anyhow, Result};

use StaffDB::SearchStrategy;

use super::cli::StoreArgs;
use super::util::{open_store, print_employee, print_not_found};

pub fn exec(args: StoreArgs, id: Option<String>, surname: Option<String>, json: bool) -> Result<()> {
    let (strategy, query) = match (id, surname) {
        (Some(q), None) => (SearchStrategy::ById, q),
        (None, Some(q)) => (SearchStrategy::BySurname, q),
        _ => return Err(anyhow!("exactly one of --id / --surname is required")),
    };

    let store = open_store(&args)?;
    match store.search(strategy, &query) {
        Some(e) => print_employee(e, json)?,
        None => print_not_found(&format!("{} {:?}", strategy, query), json),
    }
    store.close()?;
    Ok(())
}
