//! Per-timetable mutation serialization.
//!
//! A mutation is applied as load, pure transform, whole-document persist.
//! Two concurrent mutations against the same timetable could interleave
//! those steps and the later write would silently drop the earlier one, so
//! every mutating handler holds the timetable's lock across the full
//! sequence. Reads take no lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MutationLocks {
    locks: StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl MutationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding mutations of one timetable. Entries are created on
    /// first use and kept for the process lifetime.
    pub fn for_timetable(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("mutation lock map poisoned");
        locks.entry(id).or_default().clone()
    }
}
