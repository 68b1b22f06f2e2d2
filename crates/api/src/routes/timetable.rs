use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/timetables",
            post(handlers::timetable::create_timetable),
        )
        .route("/api/timetables/:id", get(handlers::timetable::get_timetable))
        .route(
            "/api/timetables/:id",
            delete(handlers::timetable::delete_timetable),
        )
        .route("/api/timetables/:id/grid", get(handlers::timetable::get_grid))
        .route(
            "/api/timetables/class/:class_id",
            get(handlers::timetable::get_timetable_by_class),
        )
        .route(
            "/api/timetables/:id/periods/:day/:index",
            put(handlers::timetable::update_period),
        )
        .route(
            "/api/timetables/:id/periods/:day/:index",
            delete(handlers::timetable::clear_period),
        )
        .route(
            "/api/timetables/:id/relocate-break",
            post(handlers::timetable::relocate_break),
        )
}
