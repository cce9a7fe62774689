//! Student post models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// The author of a post as it appears in responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PostAuthor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A post with its author expanded.
///
/// `comments` lists the ids of the comments attached to the post, oldest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct StudentPost {
    pub id: Uuid,
    pub student: PostAuthor,
    pub title: String,
    pub content: String,
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateStudentPostDto {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Full replacement of a post's mutable fields.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct UpdateStudentPostDto {
    #[validate(length(min = 1, max = 200, message = "title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewStudentPost {
    pub student_id: Uuid,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct StudentPostChanges {
    pub title: String,
    pub content: String,
}

impl From<UpdateStudentPostDto> for StudentPostChanges {
    fn from(dto: UpdateStudentPostDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_dto_validation() {
        let dto = CreateStudentPostDto {
            title: "Exam tips".to_string(),
            content: "Sleep first.".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_post_dto_requires_title_and_content() {
        let dto = CreateStudentPostDto {
            title: "".to_string(),
            content: "body".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = CreateStudentPostDto {
            title: "title".to_string(),
            content: "".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_post_dto_long_title() {
        let dto = UpdateStudentPostDto {
            title: "t".repeat(201),
            content: "body".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_post_serializes_expanded_author() {
        let now = Utc::now();
        let author_id = Uuid::new_v4();
        let post = StudentPost {
            id: Uuid::new_v4(),
            student: PostAuthor {
                id: author_id,
                name: "Ada".to_string(),
                email: "a@x.com".to_string(),
            },
            title: "t".to_string(),
            content: "c".to_string(),
            comments: vec![],
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["student"]["name"], "Ada");
        assert_eq!(json["student"]["id"], author_id.to_string());
        assert!(json["comments"].as_array().unwrap().is_empty());
    }
}
