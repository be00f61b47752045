//! mirror — in-memory упорядоченное зеркало слотов файла + навигация.
//!
//! Индекс i соответствует identity i+1. Писать в зеркало может только SlotStore
//! (мутаторы pub(crate)); поиск и навигация получают &Mirror.
//! Навигация — линейный обход, O(n) в худшем случае; capacity мала (<= 100).

use crate::record::Employee;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mirror {
    slots: Vec<Option<Employee>>,
}

impl Mirror {
    pub fn new(capacity: u32) -> Self {
        Self {
            slots: vec![None; capacity as usize],
        }
    }

    pub(crate) fn from_slots(slots: Vec<Option<Employee>>) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    #[inline]
    fn index(&self, identity: u32) -> Option<usize> {
        if identity == 0 || identity > self.capacity() {
            None
        } else {
            Some(identity as usize - 1)
        }
    }

    /// Direct O(1) access; out-of-range identities read as None.
    #[inline]
    pub fn get(&self, identity: u32) -> Option<&Employee> {
        self.index(identity).and_then(|i| self.slots[i].as_ref())
    }

    #[inline]
    pub fn is_occupied(&self, identity: u32) -> bool {
        self.get(identity).is_some()
    }

    pub(crate) fn set(&mut self, employee: Employee) {
        if let Some(i) = self.index(employee.identity) {
            self.slots[i] = Some(employee);
        }
    }

    pub(crate) fn clear(&mut self, identity: u32) {
        if let Some(i) = self.index(identity) {
            self.slots[i] = None;
        }
    }

    /// Occupied records in ascending identity order.
    pub fn occupied(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied().next().is_none()
    }

    // -------- navigation --------

    /// First occupied record with identity strictly greater than `from`.
    pub fn next_occupied(&self, from: u32) -> Option<&Employee> {
        let start = (from as usize).min(self.slots.len());
        self.slots[start..].iter().flatten().next()
    }

    /// First occupied record with identity strictly less than `from`, scanning downwards.
    pub fn previous_occupied(&self, from: u32) -> Option<&Employee> {
        let end = (from.saturating_sub(1) as usize).min(self.slots.len());
        self.slots[..end].iter().rev().flatten().next()
    }

    pub fn first_occupied(&self) -> Option<&Employee> {
        self.slots.iter().flatten().next()
    }

    pub fn last_occupied(&self) -> Option<&Employee> {
        self.slots.iter().rev().flatten().next()
    }

    // -------- attribute lookups --------

    /// Case-insensitive personal number lookup (trimmed), lowest identity wins.
    pub fn find_by_pps(&self, pps: &str) -> Option<&Employee> {
        let want = pps.trim();
        if want.is_empty() {
            return None;
        }
        self.occupied()
            .find(|e| e.personal_number.trim().eq_ignore_ascii_case(want))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;

    fn emp(id: u32, surname: &str) -> Employee {
        Employee {
            identity: id,
            personal_number: format!("PPS{:04}", id),
            first_name: "First".into(),
            surname: surname.into(),
            gender: Gender::Male,
            department: String::new(),
            salary: 1000 * id as u64,
            full_time: id % 2 == 0,
        }
    }

    fn mirror_with(ids: &[u32]) -> Mirror {
        let mut m = Mirror::new(10);
        for id in ids {
            m.set(emp(*id, "X"));
        }
        m
    }

    #[test]
    fn get_is_direct_and_range_checked() {
        let m = mirror_with(&[1, 10]);
        assert_eq!(m.get(1).map(|e| e.identity), Some(1));
        assert_eq!(m.get(10).map(|e| e.identity), Some(10));
        assert!(m.get(0).is_none());
        assert!(m.get(11).is_none());
        assert!(m.get(5).is_none());
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn next_and_previous_skip_empty_and_exclude_from() {
        let m = mirror_with(&[2, 5, 9]);
        assert_eq!(m.next_occupied(0).map(|e| e.identity), Some(2));
        assert_eq!(m.next_occupied(2).map(|e| e.identity), Some(5));
        assert_eq!(m.next_occupied(5).map(|e| e.identity), Some(9));
        assert!(m.next_occupied(9).is_none());
        assert!(m.next_occupied(50).is_none());

        assert_eq!(m.previous_occupied(9).map(|e| e.identity), Some(5));
        assert_eq!(m.previous_occupied(5).map(|e| e.identity), Some(2));
        assert!(m.previous_occupied(2).is_none());
        assert!(m.previous_occupied(0).is_none());
        assert_eq!(m.previous_occupied(50).map(|e| e.identity), Some(9));
    }

    #[test]
    fn first_and_last_agree_with_linear_scan() {
        let m = mirror_with(&[3, 4, 7]);
        let ids: Vec<u32> = m.occupied().map(|e| e.identity).collect();
        assert_eq!(m.first_occupied().map(|e| e.identity), ids.first().copied());
        assert_eq!(m.last_occupied().map(|e| e.identity), ids.last().copied());

        let empty = Mirror::new(10);
        assert!(empty.first_occupied().is_none());
        assert!(empty.last_occupied().is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn clear_empties_slot() {
        let mut m = mirror_with(&[4]);
        m.clear(4);
        assert!(!m.is_occupied(4));
        assert_eq!(m.capacity(), 10);
        assert!(m.is_empty());
    }

    #[test]
    fn pps_lookup_is_case_insensitive() {
        let m = mirror_with(&[6]);
        assert_eq!(m.find_by_pps(" pps0006 ").map(|e| e.identity), Some(6));
        assert!(m.find_by_pps("").is_none());
        assert!(m.find_by_pps("PPS0007").is_none());
    }
}
