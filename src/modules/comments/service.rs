use anyhow::{Context, anyhow};
use tracing::instrument;
use uuid::Uuid;

use studentfeed_core::{AppError, parse_id};
use studentfeed_db::Store;
use studentfeed_models::{Comment, CreateCommentDto, NewComment};

const CREATE_FAILED: &str = "Error creating comment";

fn post_not_found() -> AppError {
    AppError::not_found(anyhow!("Post not found"))
}

pub struct CommentService;

impl CommentService {
    #[instrument(skip(store))]
    pub async fn get_comments_for_post(
        store: &Store,
        post_id: &str,
    ) -> Result<Vec<Comment>, AppError> {
        let post_id = parse_id(post_id, "postId")?;

        let comments = store
            .comments
            .find_by_post(post_id)
            .await
            .context("Error retrieving comments")
            .map_err(AppError::database)?;

        Ok(comments)
    }

    /// Creates a comment on an existing post. The store records its id on the
    /// post in the same write.
    ///
    /// Checks run in order: required fields, `postId` format, post existence.
    #[instrument(skip(store, dto))]
    pub async fn create_comment(
        store: &Store,
        post_id: &str,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        let (author, content) = dto
            .required_fields()
            .ok_or_else(|| AppError::bad_request(anyhow!("Author and content are required")))?;

        let post_id = parse_id(post_id, "postId")?;

        let exists = store
            .posts
            .exists(post_id)
            .await
            .context(CREATE_FAILED)
            .map_err(AppError::database)?;
        if !exists {
            return Err(post_not_found());
        }

        let comment = store
            .comments
            .create(NewComment {
                post_id,
                author,
                content,
            })
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    return post_not_found();
                }
                AppError::database(anyhow::Error::from(e).context(CREATE_FAILED))
            })?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(comment)
    }

    /// Deletes a comment, then removes it from its post's `comments`.
    /// The cleanup is best effort: failures are logged, not returned.
    #[instrument(skip(store))]
    pub async fn delete_comment(store: &Store, id: Uuid) -> Result<(), AppError> {
        let comment = store
            .comments
            .delete_by_id(id)
            .await
            .context("Error deleting comment")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Comment not found")))?;

        match store.posts.pull_comment(comment.post_id, comment.id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(comment_id = %id, post_id = %comment.post_id, "Parent post of deleted comment not found");
            }
            Err(e) => {
                tracing::warn!(comment_id = %id, post_id = %comment.post_id, error = %e, "Failed to remove comment from post");
            }
        }

        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use axum::http::StatusCode;
    use studentfeed_models::{NewStudent, NewStudentPost};

    async fn seed_post(store: &Store) -> Uuid {
        let student = store
            .students
            .create(NewStudent {
                name: "Ada".to_string(),
                email: "ada@x.com".to_string(),
                age: None,
            })
            .await
            .unwrap();
        store
            .posts
            .create(NewStudentPost {
                student_id: student.id,
                title: "Hello".to_string(),
                content: "World".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn dto(author: &str, content: &str) -> CreateCommentDto {
        CreateCommentDto {
            author: Some(author.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_required_fields_checked_before_post_id() {
        let store = Store::in_memory();
        let err = CommentService::create_comment(&store, "not-an-id", dto("bob", ""))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Author and content are required");
    }

    #[tokio::test]
    async fn test_malformed_post_id() {
        let store = Store::in_memory();
        let err = CommentService::create_comment(&store, "not-an-id", dto("bob", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid postId format");
    }

    #[tokio::test]
    async fn test_missing_post() {
        let store = Store::in_memory();
        let err =
            CommentService::create_comment(&store, &Uuid::new_v4().to_string(), dto("bob", "hi"))
                .await
                .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Post not found");
    }

    #[tokio::test]
    async fn test_create_and_delete_maintain_back_reference() {
        let store = Store::in_memory();
        let post_id = seed_post(&store).await;

        let comment = CommentService::create_comment(&store, &post_id.to_string(), dto("bob", "hi"))
            .await
            .unwrap();
        let post = store.posts.find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.comments, vec![comment.id]);

        CommentService::delete_comment(&store, comment.id)
            .await
            .unwrap();
        let post = store.posts.find_by_id(post_id).await.unwrap().unwrap();
        assert!(post.comments.is_empty());

        let err = CommentService::delete_comment(&store, comment.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Comment not found");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_every_id() {
        const WRITERS: usize = 32;

        let store = Store::in_memory();
        let post_id = seed_post(&store).await;

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    CommentService::create_comment(
                        &store,
                        &post_id.to_string(),
                        dto(&format!("writer-{i}"), "hi"),
                    )
                    .await
                    .unwrap()
                    .id
                })
            })
            .collect();

        let mut created = HashSet::new();
        for handle in handles {
            created.insert(handle.await.unwrap());
        }
        assert_eq!(created.len(), WRITERS);

        let post = store.posts.find_by_id(post_id).await.unwrap().unwrap();
        let recorded: HashSet<Uuid> = post.comments.iter().copied().collect();
        assert_eq!(post.comments.len(), WRITERS);
        assert_eq!(recorded, created);

        let stored: HashSet<Uuid> =
            CommentService::get_comments_for_post(&store, &post_id.to_string())
                .await
                .unwrap()
                .into_iter()
                .map(|c| c.id)
                .collect();
        assert_eq!(stored, created);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_remove_every_id() {
        let store = Store::in_memory();
        let post_id = seed_post(&store).await;

        let mut ids = Vec::new();
        for i in 0..16 {
            let comment = CommentService::create_comment(
                &store,
                &post_id.to_string(),
                dto(&format!("writer-{i}"), "hi"),
            )
            .await
            .unwrap();
            ids.push(comment.id);
        }
        let (kept, removed) = ids.split_at(8);

        let handles: Vec<_> = removed
            .iter()
            .copied()
            .map(|id| {
                let store = store.clone();
                tokio::spawn(async move {
                    CommentService::delete_comment(&store, id).await.unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let post = store.posts.find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.comments, kept.to_vec());
    }
}
