pub mod refs;
pub mod timetable;
