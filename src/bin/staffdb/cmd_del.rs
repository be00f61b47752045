use anyhow::Result;

use super::cli::StoreArgs;
use super::util::{open_store, parse_id};

pub fn exec(args: StoreArgs, id: String) -> Result<()> {
    let mut store = open_store(&args)?;
    let id = parse_id(&id, store.capacity())?;
    store.delete(id)?;
    println!("DELETED #{}", id);
    store.close()?;
    Ok(())
}
