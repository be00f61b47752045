use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use oorandom::Rand32;

use StaffDB::consts::DEFAULT_RECORD_SIZE;
use StaffDB::{Employee, Gender, SlotStore, StoreError};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("sdbtest-model-{prefix}-{pid}-{t}-{id}"))
}

const SURNAMES: [&str; 6] = ["Doe", "Murphy", "Kelly", "O'Brien", "Walsh", "Byrne"];

fn random_employee(rng: &mut Rand32, id: u32) -> Employee {
    Employee {
        identity: id,
        personal_number: format!("{:07}", rng.rand_range(0..9_999_999)),
        first_name: format!("N{}", rng.rand_u32() % 1000),
        surname: SURNAMES[rng.rand_range(0..SURNAMES.len() as u32) as usize].to_string(),
        gender: if rng.rand_u32() % 2 == 0 { Gender::Male } else { Gender::Female },
        department: if rng.rand_u32() % 3 == 0 { String::new() } else { "Ops".into() },
        salary: rng.rand_u32() as u64,
        full_time: rng.rand_u32() % 2 == 1,
    }
}

/// Случайные create/update/delete против простой модели Vec<Option<Employee>>.
#[test]
fn random_ops_agree_with_model_and_survive_reopen() -> Result<()> {
    const CAP: u32 = 20;
    let root = unique_root("ops");
    let path = root.join("employees.dat");
    let mut rng = Rand32::new(0x5DB_2026);
    let mut model: Vec<Option<Employee>> = vec![None; CAP as usize];

    {
        let mut store = SlotStore::open(&path, CAP, DEFAULT_RECORD_SIZE)?;
        for _ in 0..600 {
            // 0 и CAP+1 — за пределами диапазона
            let id = rng.rand_range(0..CAP + 2);
            let in_range = id >= 1 && id <= CAP;
            let occupied = in_range && model[id as usize - 1].is_some();

            match rng.rand_range(0..3) {
                0 => {
                    let e = random_employee(&mut rng, id);
                    let res = store.create(e.clone());
                    match (in_range, occupied) {
                        (false, _) => assert!(matches!(res, Err(StoreError::OutOfRange { .. }))),
                        (true, true) => assert!(matches!(res, Err(StoreError::SlotOccupied(_)))),
                        (true, false) => {
                            assert!(res.is_ok());
                            model[id as usize - 1] = Some(e);
                        }
                    }
                }
                1 => {
                    let e = random_employee(&mut rng, id);
                    let res = store.update(e.clone());
                    match (in_range, occupied) {
                        (false, _) => assert!(matches!(res, Err(StoreError::OutOfRange { .. }))),
                        (true, false) => assert!(matches!(res, Err(StoreError::SlotEmpty(_)))),
                        (true, true) => {
                            assert!(res.is_ok());
                            model[id as usize - 1] = Some(e);
                        }
                    }
                }
                _ => {
                    let res = store.delete(id);
                    match (in_range, occupied) {
                        (false, _) => assert!(matches!(res, Err(StoreError::OutOfRange { .. }))),
                        (true, false) => assert!(matches!(res, Err(StoreError::SlotEmpty(_)))),
                        (true, true) => {
                            assert!(res.is_ok());
                            model[id as usize - 1] = None;
                        }
                    }
                }
            }

            for i in 1..=CAP {
                assert_eq!(store.read(i), model[i as usize - 1].as_ref());
            }
        }
        assert!(store.verify()?.is_clean());
        store.close()?;
    }

    let store = SlotStore::open(&path, CAP, DEFAULT_RECORD_SIZE)?;
    for i in 1..=CAP {
        assert_eq!(store.read(i), model[i as usize - 1].as_ref(), "slot {i} after reopen");
    }

    // first/last совпадают с линейным обходом модели
    let first = model.iter().flatten().next();
    let last = model.iter().rev().flatten().next();
    assert_eq!(store.first_occupied(), first);
    assert_eq!(store.last_occupied(), last);
    Ok(())
}
