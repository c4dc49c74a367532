//! Student row operations.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::core::{Access, SqlStore};
use crate::error::StoreError;
use crate::student::{Grade, NewStudent, Status, StudentId, StudentRecord};

impl SqlStore {
    /// Fetch every row ordered by id, which is insertion order.
    pub(crate) async fn select_students(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let rows = sqlx::query("SELECT id, name, section, grade, status FROM students ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::map_error("SELECT students", Access::Read, &e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    /// Insert a row and return its new id.
    pub(crate) async fn insert_student(&self, student: &NewStudent) -> Result<i64, StoreError> {
        let result =
            sqlx::query("INSERT INTO students (name, section, grade, status) VALUES (?, ?, ?, ?)")
                .bind(&student.name)
                .bind(&student.section)
                .bind(student.grade)
                .bind(student.status.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| Self::map_error("INSERT students", Access::Write, &e))?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite the four mutable columns of row `id`.
    pub(crate) async fn update_student(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE students SET name = ?, section = ?, grade = ?, status = ? WHERE id = ?",
        )
        .bind(&student.name)
        .bind(&student.section)
        .bind(student.grade)
        .bind(student.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_error("UPDATE students", Access::Write, &e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        Ok(())
    }

    /// Delete row `id`.
    pub(crate) async fn delete_student(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_error("DELETE students", Access::Write, &e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        Ok(())
    }

    fn row_to_record(row: &SqliteRow) -> Result<StudentRecord, StoreError> {
        let decode = |e: sqlx::Error| Self::map_error("decode students", Access::Read, &e);

        let id: i64 = row.try_get("id").map_err(decode)?;
        let name: String = row.try_get("name").map_err(decode)?;
        let section: String = row.try_get("section").map_err(decode)?;
        // REAL affinity keeps non-numeric text as TEXT.
        let grade = match row.try_get::<f64, _>("grade") {
            Ok(value) => Grade::Numeric(value),
            Err(_) => {
                let text: Option<String> = row.try_get("grade").map_err(decode)?;
                tracing::debug!(id, grade = ?text, "Non-numeric grade in students row");
                Grade::Text(text.unwrap_or_default())
            }
        };
        let status: String = row.try_get("status").map_err(decode)?;

        Ok(StudentRecord {
            id: StudentId::Number(id),
            name,
            section,
            grade,
            status: Status::from(status),
        })
    }
}
