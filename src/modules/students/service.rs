use anyhow::{Context, anyhow};
use tracing::instrument;
use uuid::Uuid;

use studentfeed_core::AppError;
use studentfeed_db::{StoreError, StudentRepository};
use studentfeed_models::{CreateStudentDto, Student, StudentChanges, UpdateStudentDto};

/// Maps a store failure on a write that carries `email`: unique violations
/// become 409, anything else is a 500 reported as `context`.
pub(crate) fn map_email_write_error(err: StoreError, email: &str, context: &'static str) -> AppError {
    if err.is_unique_violation() {
        return AppError::conflict(anyhow!("Student with email {} already exists", email));
    }
    AppError::database(anyhow::Error::from(err).context(context))
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(repo, dto))]
    pub async fn create_student(
        repo: &dyn StudentRepository,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let email = dto.email.clone();

        let student = repo
            .create(dto.into())
            .await
            .map_err(|e| map_email_write_error(e, &email, "Failed to create student"))?;

        tracing::info!(student_id = %student.id, "Student created");
        Ok(student)
    }

    #[instrument(skip(repo))]
    pub async fn get_students(repo: &dyn StudentRepository) -> Result<Vec<Student>, AppError> {
        let students = repo
            .find()
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(repo))]
    pub async fn get_student_by_id(
        repo: &dyn StudentRepository,
        id: Uuid,
    ) -> Result<Student, AppError> {
        repo.find_by_id(id)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(repo, dto))]
    pub async fn update_student(
        repo: &dyn StudentRepository,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let email = dto.email.clone().unwrap_or_default();
        let changes = StudentChanges::from(dto);

        repo.update_by_id(id, changes)
            .await
            .map_err(|e| map_email_write_error(e, &email, "Failed to update student"))?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(repo))]
    pub async fn delete_student(repo: &dyn StudentRepository, id: Uuid) -> Result<(), AppError> {
        let deleted = repo
            .delete_by_id(id)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if !deleted {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        tracing::info!(student_id = %id, "Student deleted");
        Ok(())
    }
}
