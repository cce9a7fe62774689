//! Student domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A student in the system.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new student.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
}

/// DTO for updating an existing student.
///
/// All fields are optional; every provided field is applied.
#[derive(Deserialize, Serialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
}

/// Fields of a student about to be inserted.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

impl From<CreateStudentDto> for NewStudent {
    fn from(dto: CreateStudentDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            age: dto.age,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl StudentChanges {
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(email) = &self.email {
            student.email = email.clone();
        }
        if let Some(age) = self.age {
            student.age = Some(age);
        }
    }
}

impl From<UpdateStudentDto> for StudentChanges {
    fn from(dto: UpdateStudentDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            age: dto.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateStudentDto {
        CreateStudentDto {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            age: None,
        }
    }

    #[test]
    fn test_create_student_dto_validation() {
        assert!(valid_create().validate().is_ok());
        assert!(
            CreateStudentDto {
                age: Some(20),
                ..valid_create()
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_create_student_dto_invalid_email() {
        let dto = CreateStudentDto {
            email: "invalid-email".to_string(),
            ..valid_create()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_empty_name() {
        let dto = CreateStudentDto {
            name: "".to_string(),
            ..valid_create()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_long_name() {
        let dto = CreateStudentDto {
            name: "x".repeat(101),
            ..valid_create()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_student_dto_negative_age() {
        let dto = CreateStudentDto {
            age: Some(-1),
            ..valid_create()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_student_dto_empty_is_valid() {
        assert!(UpdateStudentDto::default().validate().is_ok());
    }

    #[test]
    fn test_update_student_dto_invalid_email() {
        let dto = UpdateStudentDto {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_changes_apply_every_field() {
        let now = Utc::now();
        let mut student = Student {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            age: None,
            created_at: now,
            updated_at: now,
        };

        StudentChanges {
            name: Some("Grace".to_string()),
            email: Some("g@x.com".to_string()),
            age: Some(31),
        }
        .apply_to(&mut student);

        assert_eq!(student.name, "Grace");
        assert_eq!(student.email, "g@x.com");
        assert_eq!(student.age, Some(31));

        StudentChanges::default().apply_to(&mut student);
        assert_eq!(student.name, "Grace");
        assert_eq!(student.age, Some(31));
    }
}
