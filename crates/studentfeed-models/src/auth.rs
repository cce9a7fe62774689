//! Registration and login models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::students::{NewStudent, Student};

#[derive(Debug, Deserialize, Serialize, Clone, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

impl RegisterRequest {
    pub fn into_parts(self) -> (NewStudent, String) {
        (
            NewStudent {
                name: self.name,
                email: self.email,
                age: self.age,
            },
            self.password,
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub student: Student,
}

/// A student together with the stored password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct StudentCredentials {
    pub student: Student,
    pub password_hash: String,
}
