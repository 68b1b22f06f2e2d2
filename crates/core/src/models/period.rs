use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serde adapter for the `HH:MM` clock times used on the wire.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Tea,
    Lunch,
}

/// One cell of the weekly grid.
///
/// A period has no identity of its own: its position in the day's sequence
/// is the time-slot key shared by all six days, so `start_time`/`end_time`
/// at a given position must agree across the week. A break cell carries a
/// `break_type` and no lesson content; a lesson cell is the other way
/// around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_break: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub break_type: Option<BreakKind>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub teacher: Option<Uuid>,
    #[serde(default)]
    pub room: String,
}

impl Period {
    /// An empty lesson slot, ready for assignment.
    pub fn lesson(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Period {
            start_time,
            end_time,
            is_break: false,
            break_type: None,
            subject: None,
            teacher: None,
            room: String::new(),
        }
    }

    pub fn break_slot(start_time: NaiveTime, end_time: NaiveTime, kind: BreakKind) -> Self {
        Period {
            start_time,
            end_time,
            is_break: true,
            break_type: Some(kind),
            subject: None,
            teacher: None,
            room: String::new(),
        }
    }

    /// Break cells carry a break type and nothing else; lesson cells never
    /// carry one.
    pub(crate) fn content_is_consistent(&self) -> bool {
        if self.is_break {
            self.break_type.is_some()
                && self.subject.is_none()
                && self.teacher.is_none()
                && self.room.is_empty()
        } else {
            self.break_type.is_none()
        }
    }
}

/// Editable content of a lesson cell, as loaded into and saved from the
/// period editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub subject: Option<Uuid>,
    pub teacher: Option<Uuid>,
    #[serde(default)]
    pub room: String,
}
