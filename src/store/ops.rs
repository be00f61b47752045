//! store/ops — одиночные операции над слотами: create/update/delete/read,
//! плюс fast-path по явному SlotHandle.

use log::debug;

use crate::error::{Result, StoreError};
use crate::metrics::{record_create, record_delete, record_mirror_read, record_update};
use crate::record::codec::{decode, encode_employee, encode_empty};
use crate::record::{Employee, Slot};
use crate::search::SearchStrategy;

use super::core::{SlotHandle, SlotStore};

// ----------------- публичные методы -----------------

impl SlotStore {
    /// Store a record in its (empty) slot. Returns the slot handle.
    pub fn create(&mut self, employee: Employee) -> Result<SlotHandle> {
        let identity = employee.identity;
        self.check_range(identity)?;
        if self.mirror.is_occupied(identity) {
            return Err(StoreError::SlotOccupied(identity));
        }
        let handle = self.handle(identity)?;
        self.put_slot(handle, employee)?;
        record_create();
        debug!("store: created #{} at off={}", identity, handle.offset);
        self.subs.notify();
        Ok(handle)
    }

    /// Replace the fields of an existing record in place.
    pub fn update(&mut self, employee: Employee) -> Result<()> {
        let handle = self.handle(employee.identity)?;
        self.update_at(handle, employee)
    }

    /// Overwrite the slot with the empty pattern.
    pub fn delete(&mut self, identity: u32) -> Result<()> {
        let handle = self.handle(identity)?;
        self.delete_at(handle)
    }

    /// Cached record for `identity`, or None for empty/out-of-range slots.
    /// Served from the mirror only.
    pub fn read(&self, identity: u32) -> Option<&Employee> {
        record_mirror_read();
        self.mirror.get(identity)
    }

    /// Handle for `identity` computed by direct addressing.
    pub fn handle(&self, identity: u32) -> Result<SlotHandle> {
        self.check_range(identity)?;
        Ok(SlotHandle {
            identity,
            offset: self.offset_of(identity),
        })
    }

    /// Update through a handle previously returned by `create`/`handle`.
    pub fn update_at(&mut self, handle: SlotHandle, employee: Employee) -> Result<()> {
        self.check_handle(handle)?;
        if employee.identity != handle.identity {
            return Err(StoreError::StaleHandle {
                identity: employee.identity,
                offset: handle.offset,
            });
        }
        if !self.mirror.is_occupied(handle.identity) {
            return Err(StoreError::SlotEmpty(handle.identity));
        }
        self.put_slot(handle, employee)?;
        record_update();
        debug!("store: updated #{} at off={}", handle.identity, handle.offset);
        self.subs.notify();
        Ok(())
    }

    /// Delete through a handle previously returned by `create`/`handle`.
    pub fn delete_at(&mut self, handle: SlotHandle) -> Result<()> {
        self.check_handle(handle)?;
        if !self.mirror.is_occupied(handle.identity) {
            return Err(StoreError::SlotEmpty(handle.identity));
        }
        let buf = encode_empty(self.cfg.record_size);
        self.write_at(handle.offset, &buf)?;
        self.mirror.clear(handle.identity);
        record_delete();
        debug!("store: deleted #{} at off={}", handle.identity, handle.offset);
        self.subs.notify();
        Ok(())
    }

    /// Run a search strategy against the mirror.
    pub fn search(&self, strategy: SearchStrategy, query: &str) -> Option<&Employee> {
        strategy.search(query, &self.mirror)
    }

    pub fn search_by_id(&self, query: &str) -> Option<&Employee> {
        self.search(SearchStrategy::ById, query)
    }

    pub fn search_by_surname(&self, query: &str) -> Option<&Employee> {
        self.search(SearchStrategy::BySurname, query)
    }

    /// Whether some occupied slot already carries this personal number.
    pub fn pps_exists(&self, pps: &str) -> bool {
        self.mirror.find_by_pps(pps).is_some()
    }

    pub fn find_by_pps(&self, pps: &str) -> Option<&Employee> {
        self.mirror.find_by_pps(pps)
    }

    // -------- navigation (mirror only) --------

    pub fn next_occupied(&self, from: u32) -> Option<&Employee> {
        self.mirror.next_occupied(from)
    }

    pub fn previous_occupied(&self, from: u32) -> Option<&Employee> {
        self.mirror.previous_occupied(from)
    }

    pub fn first_occupied(&self) -> Option<&Employee> {
        self.mirror.first_occupied()
    }

    pub fn last_occupied(&self) -> Option<&Employee> {
        self.mirror.last_occupied()
    }

    /// Occupied records in ascending identity order.
    pub fn occupied(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.mirror.occupied()
    }
}

// ----------------- внутренние хелперы -----------------

impl SlotStore {
    /// Handle должен совпадать с арифметикой смещения для своей identity.
    fn check_handle(&self, handle: SlotHandle) -> Result<()> {
        self.check_range(handle.identity)?;
        if handle.offset != self.offset_of(handle.identity) {
            return Err(StoreError::StaleHandle {
                identity: handle.identity,
                offset: handle.offset,
            });
        }
        Ok(())
    }

    /// Файл, затем зеркало. Ошибка записи оставляет зеркало нетронутым.
    /// В зеркало кладём декодированный слот, а не вход: обрезанные строки
    /// должны выглядеть так же, как после перезагрузки из файла.
    fn put_slot(&mut self, handle: SlotHandle, employee: Employee) -> Result<()> {
        let buf = encode_employee(&employee, self.cfg.record_size)?;
        let stored = match decode(&buf)? {
            Slot::Occupied(e) => e,
            Slot::Empty => return Err(StoreError::SlotEmpty(handle.identity)),
        };
        self.write_at(handle.offset, &buf)?;
        self.mirror.set(stored);
        Ok(())
    }
}
