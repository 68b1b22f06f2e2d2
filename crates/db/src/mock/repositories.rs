use mockall::mock;
use uuid::Uuid;

use crate::models::{DbClass, DbSection, DbSubject, DbTeacher, DbTimetable, NewTimetable};

// Mock repositories for testing
mock! {
    pub TimetableRepo {
        pub async fn create_timetable(
            &self,
            new: NewTimetable,
        ) -> eyre::Result<DbTimetable>;

        pub async fn get_timetable_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn get_timetable_by_class(
            &self,
            class_id: Uuid,
            section_id: Option<Uuid>,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn replace_schedule(
            &self,
            id: Uuid,
            schedule: serde_json::Value,
        ) -> eyre::Result<DbTimetable>;

        pub async fn delete_timetable(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub RefsRepo {
        pub async fn get_subject(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSubject>>;

        pub async fn get_subjects_by_ids(
            &self,
            ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<DbSubject>>;

        pub async fn get_teacher(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTeacher>>;

        pub async fn get_teachers_by_ids(
            &self,
            ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<DbTeacher>>;

        pub async fn get_class(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbClass>>;

        pub async fn get_section(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSection>>;
    }
}
