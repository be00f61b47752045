use anyhow::Result;
use serde_json::json;

use StaffDB::metrics;

use super::cli::StoreArgs;
use super::util::open_store;

pub fn exec(args: StoreArgs, json: bool) -> Result<()> {
    let store = open_store(&args)?;
    let cfg = store.config().clone();
    let first = store.first_occupied().map(|e| e.identity);
    let last = store.last_occupied().map(|e| e.identity);
    let m = metrics::snapshot();

    if json {
        let v = json!({
            "path": store.path().display().to_string(),
            "capacity": cfg.capacity,
            "record_size": cfg.record_size,
            "file_len": cfg.file_len(),
            "occupied": store.len(),
            "first_id": first,
            "last_id": last,
            "data_fsync": cfg.data_fsync,
            "exclusive_lock": cfg.exclusive_lock,
            "search_hit_ratio": m.search_hit_ratio(),
            "metrics": m,
        });
        println!("{}", serde_json::to_string_pretty(&v)?);
    } else {
        println!("StaffDB status:");
        println!("  path:        {}", store.path().display());
        println!("  config:      {}", cfg);
        println!("  file_len:    {} B", cfg.file_len());
        println!("  occupied:    {} / {}", store.len(), cfg.capacity);
        println!(
            "  first/last:  {} / {}",
            first.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
            last.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
        );
        println!("  mirror_reads={} slot_writes={}", m.mirror_reads, m.slot_writes);
        println!(
            "  searches:    {} hit / {} miss ({:.1}%)",
            m.search_hits,
            m.search_misses,
            m.search_hit_ratio() * 100.0
        );
    }
    store.close()?;
    Ok(())
}
