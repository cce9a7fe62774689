use anyhow::{Context, anyhow};
use tracing::instrument;
use uuid::Uuid;

use studentfeed_core::AppError;
use studentfeed_db::Store;
use studentfeed_models::{
    CreateStudentPostDto, NewStudentPost, StudentPost, StudentPostChanges, UpdateStudentPostDto,
};

fn student_post_not_found() -> AppError {
    AppError::not_found(anyhow!("Student post not found"))
}

pub struct StudentPostService;

impl StudentPostService {
    /// Creates a post authored by `student_id`, which must name an existing student.
    #[instrument(skip(store, dto))]
    pub async fn create_post(
        store: &Store,
        student_id: Uuid,
        dto: CreateStudentPostDto,
    ) -> Result<StudentPost, AppError> {
        let author = store
            .students
            .find_by_id(student_id)
            .await
            .context("Failed to create student post")
            .map_err(AppError::database)?;

        if author.is_none() {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        let post = store
            .posts
            .create(NewStudentPost {
                student_id,
                title: dto.title,
                content: dto.content,
            })
            .await
            .map_err(|e| {
                // The author was deleted between the check and the insert.
                if e.is_foreign_key_violation() {
                    return AppError::not_found(anyhow!("Student not found"));
                }
                AppError::database(anyhow::Error::from(e).context("Failed to create student post"))
            })?;

        tracing::info!(post_id = %post.id, "Student post created");
        Ok(post)
    }

    #[instrument(skip(store))]
    pub async fn get_posts(store: &Store) -> Result<Vec<StudentPost>, AppError> {
        let posts = store
            .posts
            .find()
            .await
            .context("Failed to fetch student posts")
            .map_err(AppError::database)?;

        Ok(posts)
    }

    #[instrument(skip(store))]
    pub async fn get_post_by_id(store: &Store, id: Uuid) -> Result<StudentPost, AppError> {
        store
            .posts
            .find_by_id(id)
            .await
            .context("Failed to fetch student post")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Post not found")))
    }

    #[instrument(skip(store, dto))]
    pub async fn update_post(
        store: &Store,
        id: Uuid,
        dto: UpdateStudentPostDto,
    ) -> Result<StudentPost, AppError> {
        store
            .posts
            .update_by_id(id, StudentPostChanges::from(dto))
            .await
            .context("Failed to update student post")
            .map_err(AppError::database)?
            .ok_or_else(student_post_not_found)
    }

    #[instrument(skip(store))]
    pub async fn delete_post(store: &Store, id: Uuid) -> Result<(), AppError> {
        let deleted = store
            .posts
            .delete_by_id(id)
            .await
            .context("Failed to delete student post")
            .map_err(AppError::database)?;

        if !deleted {
            return Err(student_post_not_found());
        }

        tracing::info!(post_id = %id, "Student post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use studentfeed_models::NewStudent;

    fn create_dto() -> CreateStudentPostDto {
        CreateStudentPostDto {
            title: "Hello".to_string(),
            content: "World".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_post_for_unknown_student() {
        let store = Store::in_memory();
        let err = StudentPostService::create_post(&store, Uuid::new_v4(), create_dto())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Student not found");
    }

    #[tokio::test]
    async fn test_create_post_expands_author() {
        let store = Store::in_memory();
        let student = store
            .students
            .create(NewStudent {
                name: "Ada".to_string(),
                email: "ada@x.com".to_string(),
                age: None,
            })
            .await
            .unwrap();

        let post = StudentPostService::create_post(&store, student.id, create_dto())
            .await
            .unwrap();
        assert_eq!(post.student.id, student.id);
        assert_eq!(post.student.name, "Ada");
        assert!(post.comments.is_empty());
    }

    #[tokio::test]
    async fn test_missing_post_messages() {
        let store = Store::in_memory();
        let id = Uuid::new_v4();

        let err = StudentPostService::get_post_by_id(&store, id)
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Post not found");

        let err = StudentPostService::delete_post(&store, id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Student post not found");
    }
}
