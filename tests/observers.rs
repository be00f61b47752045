use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use StaffDB::consts::DEFAULT_RECORD_SIZE;
use StaffDB::record::codec::decode;
use StaffDB::{Employee, Gender, SlotStore, StoreConfig, StoreError};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("sdbtest-subs-{prefix}-{pid}-{t}-{id}"))
}

fn emp(id: u32) -> Employee {
    Employee {
        identity: id,
        personal_number: format!("{:07}", id),
        first_name: "Mary".into(),
        surname: "Brennan".into(),
        gender: Gender::Female,
        department: String::new(),
        salary: 42_000,
        full_time: false,
    }
}

#[test]
fn every_observer_is_notified_once_per_mutation() -> Result<()> {
    let root = unique_root("fanout");
    let mut store = SlotStore::open(&root.join("employees.dat"), 100, DEFAULT_RECORD_SIZE)?;

    let hits = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..5)
        .map(|_| {
            let hits = hits.clone();
            store.subscribe(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    store.create(emp(1))?;
    assert_eq!(hits.load(Ordering::SeqCst), 5);
    store.update(emp(1))?;
    assert_eq!(hits.load(Ordering::SeqCst), 10);
    store.delete(1)?;
    assert_eq!(hits.load(Ordering::SeqCst), 15);

    drop(handles);
    store.create(emp(2))?;
    assert_eq!(hits.load(Ordering::SeqCst), 15, "dropped handles unsubscribe");
    Ok(())
}

#[test]
fn failed_mutations_do_not_notify() -> Result<()> {
    let root = unique_root("failed");
    let mut store = SlotStore::open(&root.join("employees.dat"), 10, DEFAULT_RECORD_SIZE)?;
    let hits = Arc::new(AtomicUsize::new(0));
    let _h = {
        let hits = hits.clone();
        store.subscribe(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };

    store.create(emp(3))?;
    assert!(matches!(store.create(emp(3)), Err(StoreError::SlotOccupied(3))));
    assert!(matches!(store.update(emp(4)), Err(StoreError::SlotEmpty(4))));
    assert!(matches!(store.delete(11), Err(StoreError::OutOfRange { .. })));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn observers_see_file_already_written() -> Result<()> {
    let root = unique_root("consistent");
    let path = root.join("employees.dat");
    // Наблюдатель открывает тот же файл, поэтому без эксклюзивного lock
    let cfg = StoreConfig::default().with_exclusive_lock(false);
    let mut store = SlotStore::open_with_config(&path, cfg)?;

    // Наблюдатель сам читает файл с диска: слот #6 к моменту вызова уже записан
    let seen: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));
    let _h = {
        let seen = seen.clone();
        let path = path.clone();
        store.subscribe(move || {
            let raw = std::fs::read(&path).unwrap();
            let off = 5 * DEFAULT_RECORD_SIZE;
            let slot = decode(&raw[off..off + DEFAULT_RECORD_SIZE]).unwrap();
            seen.lock().unwrap().push(!slot.is_empty());
        })
    };

    store.create(emp(6))?;
    store.delete(6)?;
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    Ok(())
}

#[test]
fn observers_fire_in_registration_order() -> Result<()> {
    let root = unique_root("order");
    let mut store = SlotStore::open(&root.join("employees.dat"), 100, DEFAULT_RECORD_SIZE)?;
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let reg = store.observers();
    for name in ["table", "details", "status"] {
        let order = order.clone();
        reg.subscribe(Arc::new(move || order.lock().unwrap().push(name)))
            .detach();
    }
    assert_eq!(reg.len(), 3);

    store.create(emp(8))?;
    assert_eq!(*order.lock().unwrap(), vec!["table", "details", "status"]);
    Ok(())
}
