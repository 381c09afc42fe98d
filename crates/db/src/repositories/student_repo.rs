//! Repository for the `students` table.

use placement_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::student::{CreateStudent, Student};
use crate::repositories::reference::{self, ReferenceTable};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_number, name, created_at, updated_at";

/// Provides lookup and creation for students.
pub struct StudentRepo;

impl ReferenceTable for StudentRepo {
    type Row = Student;
    const ENTITY: &'static str = "Student";
    const TABLE: &'static str = "students";
    const COLUMNS: &'static str = COLUMNS;

    fn row_id(row: &Student) -> DbId {
        row.id
    }
}

impl StudentRepo {
    /// Insert a new student, returning the created row.
    ///
    /// Fails with a unique violation (`uq_students_student_number`) if the
    /// student number is already taken.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateStudent,
    ) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_number, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.student_number)
            .bind(&input.name)
            .fetch_one(executor)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        reference::find_by_id::<Self, _>(executor, id).await
    }

    /// Find a student by the externally issued student number.
    pub async fn find_by_number<'e, E: PgExecutor<'e>>(
        executor: E,
        student_number: i64,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_number = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(student_number)
            .fetch_optional(executor)
            .await
    }

    /// List all students ordered by ID.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Student>, sqlx::Error> {
        reference::list_all::<Self, _>(executor).await
    }
}
