//! Reference records owned by other modules of the school system.
//!
//! The timetable subsystem resolves these by id to label grid cells and to
//! check that an assignment points at something real. It never mutates them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}
