use anyhow::Result;

use super::cli::StoreArgs;
use super::util::open_store;

pub fn exec(args: StoreArgs) -> Result<()> {
    let store = open_store(&args)?;
    println!(
        "Initialized {}: {} slots x {} B ({} occupied)",
        store.path().display(),
        store.capacity(),
        store.record_size(),
        store.len()
    );
    store.close()?;
    Ok(())
}
