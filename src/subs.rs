//! In-process change notification for the slot store.
//!
//! Scope:
//! - Observers are plain callbacks with no payload: "data changed". Observers pull
//!   specifics from the store themselves.
//! - The store notifies after a successful create/update/delete, once the file write
//!   and the mirror update have both completed.
//! - Drop of ObserverHandle unsubscribes; `detach()` keeps the observer for the
//!   registry lifetime.
//!
//! Notes:
//! - Callbacks are executed synchronously on the mutating caller's thread, in
//!   registration order. Keep them fast; spawn a thread if you need slow work.
//! - A callback gets no store reference, and the store is borrowed mutably while it
//!   notifies, so an observer cannot re-enter a mutating call.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use log::debug;

use crate::metrics::record_notification;

pub type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

#[derive(Default)]
struct ObsInner {
    next_id: u64,
    // ids растут монотонно => порядок BTreeMap совпадает с порядком регистрации
    observers: BTreeMap<u64, Callback>,
}

/// Observer registry (held inside the store, shareable via Arc).
pub struct ObserverRegistry {
    inner: Mutex<ObsInner>,
}

impl ObserverRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(ObsInner::default()),
        })
    }

    /// Register an observer. Returns a handle; dropping it unsubscribes.
    pub fn subscribe(self: &Arc<Self>, cb: Callback) -> ObserverHandle {
        let mut g = self.lock();
        let id = g.next_id;
        g.next_id = g.next_id.wrapping_add(1);
        g.observers.insert(id, cb);
        drop(g);
        debug!("subs: observer {} registered", id);
        ObserverHandle {
            id,
            reg: Arc::downgrade(self),
        }
    }

    /// Invoke every registered observer once, in registration order.
    pub fn notify(&self) {
        let callbacks: Vec<Callback> = self.lock().observers.values().cloned().collect();
        // Execute outside the lock
        for cb in callbacks {
            cb();
            record_notification();
        }
    }

    pub fn len(&self) -> usize {
        self.lock().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn unsubscribe(&self, id: u64) {
        if self.lock().observers.remove(&id).is_some() {
            debug!("subs: observer {} removed", id);
        }
    }

    // Poisoning only happens if a callback panicked mid-registration; the map is still valid.
    fn lock(&self) -> std::sync::MutexGuard<'_, ObsInner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// RAII handle: unsubscribes on drop.
pub struct ObserverHandle {
    id: u64,
    reg: Weak<ObserverRegistry>,
}

impl ObserverHandle {
    /// Explicit deregistration (same as dropping the handle).
    pub fn unsubscribe(self) {
        drop(self)
    }

    /// Keep the observer registered for as long as the registry lives.
    pub fn detach(mut self) {
        self.reg = Weak::new();
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        if let Some(reg) = self.reg.upgrade() {
            reg.unsubscribe(self.id);
        }
    }
}

/// Public helper for building callbacks.
pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn notify_runs_in_registration_order() {
        let reg = ObserverRegistry::new();
        let log: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let mut handles = Vec::new();
        for i in 0..3u32 {
            let l = log.clone();
            handles.push(reg.subscribe(callback(move || l.lock().unwrap().push(i))));
        }
        reg.notify();
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn drop_and_unsubscribe_remove_observer() {
        let reg = ObserverRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h1 = {
            let hits = hits.clone();
            reg.subscribe(callback(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }))
        };
        let h2 = {
            let hits = hits.clone();
            reg.subscribe(callback(move || {
                hits.fetch_add(10, Ordering::SeqCst);
            }))
        };
        assert_eq!(reg.len(), 2);
        h1.unsubscribe();
        drop(h2);
        assert!(reg.is_empty());
        reg.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn detached_observer_stays_registered() {
        let reg = ObserverRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = {
            let hits = hits.clone();
            reg.subscribe(callback(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }))
        };
        h.detach();
        reg.notify();
        reg.notify();
        assert_eq!(reg.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
