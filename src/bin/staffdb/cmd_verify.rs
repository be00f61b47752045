use anyhow::{anyhow, Result};

use super::cli::StoreArgs;
use super::util::open_store;

pub fn exec(args: StoreArgs, json: bool) -> Result<()> {
    let store = open_store(&args)?;
    let report = store.verify()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "verify: {} slots, {} occupied, file {} / {} B, {} mismatch(es)",
            report.slots,
            report.occupied,
            report.file_len,
            report.expected_len,
            report.mismatches.len()
        );
        for id in &report.mismatches {
            println!("  mismatch at #{}", id);
        }
    }
    store.close()?;
    if !report.is_clean() {
        return Err(anyhow!("verify found inconsistencies"));
    }
    Ok(())
}
