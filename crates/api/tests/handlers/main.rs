mod middleware_test;
mod timetable_test;

#[path = "../test_utils.rs"]
mod test_utils;
