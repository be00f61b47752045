use anyhow::Result;

use super::cli::{NavDir, StoreArgs};
use super::util::{open_store, print_employee, print_not_found};

pub fn exec(args: StoreArgs, dir: NavDir, from: u32, json: bool) -> Result<()> {
    let store = open_store(&args)?;
    let found = match dir {
        NavDir::First => store.first_occupied(),
        NavDir::Last => store.last_occupied(),
        NavDir::Next => store.next_occupied(from),
        NavDir::Prev => store.previous_occupied(from),
    };
    match found {
        Some(e) => print_employee(e, json)?,
        None => print_not_found(&format!("{:?} from {}", dir, from), json),
    }
    store.close()?;
    Ok(())
}
