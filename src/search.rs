//! Search strategies over the cache mirror.
//!
//! Both strategies are total: "not found" is None, never an error. They read only
//! the mirror and never touch the file.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};
use crate::metrics::record_search;
use crate::mirror::Mirror;
use crate::record::Employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Parse the query as an identity and index the mirror directly. O(1).
    ById,
    /// Case-insensitive surname equality, ascending identity, first match. O(n).
    BySurname,
}

impl SearchStrategy {
    pub fn search<'m>(&self, query: &str, mirror: &'m Mirror) -> Option<&'m Employee> {
        let found = match self {
            SearchStrategy::ById => match parse_identity(query) {
                Ok(id) => mirror.get(id),
                Err(_) => None,
            },
            SearchStrategy::BySurname => by_surname(query, mirror),
        };
        record_search(found.is_some());
        found
    }
}

fn by_surname<'m>(query: &str, mirror: &'m Mirror) -> Option<&'m Employee> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }
    let want = q.to_lowercase();
    mirror
        .occupied()
        .find(|e| e.surname.trim().to_lowercase() == want)
}

/// Parse a user-supplied identity. Range is not checked here (the mirror does it).
pub fn parse_identity(query: &str) -> Result<u32> {
    let q = query.trim();
    q.parse::<u32>()
        .map_err(|_| StoreError::MalformedQuery(q.to_string()))
}

impl FromStr for SearchStrategy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SearchStrategy::ById),
            "surname" => Ok(SearchStrategy::BySurname),
            other => Err(StoreError::MalformedQuery(other.to_string())),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::ById => write!(f, "id"),
            SearchStrategy::BySurname => write!(f, "surname"),
        }
    }
}
