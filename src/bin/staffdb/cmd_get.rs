use anyhow::Result;

use super::cli::StoreArgs;
use super::util::{open_store, parse_id, print_employee, print_not_found};

pub fn exec(args: StoreArgs, id: String, json: bool) -> Result<()> {
    let store = open_store(&args)?;
    let id = parse_id(&id, store.capacity())?;
    match store.read(id) {
        Some(e) => print_employee(e, json)?,
        None => print_not_found(&format!("#{}", id), json),
    }
    store.close()?;
    Ok(())
}
