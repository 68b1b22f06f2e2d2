pub mod period;
pub mod refs;
pub mod timetable;
pub mod weekday;
