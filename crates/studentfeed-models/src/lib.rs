//! # Studentfeed Models
//!
//! Domain models and DTOs for the Studentfeed API.
//!
//! - [`students`]: Student entity and its create/update DTOs
//! - [`student_posts`]: Posts with their expanded author
//! - [`comments`]: Comments attached to posts
//! - [`auth`]: Registration and login payloads
//!
//! Each module also defines the plain input types (`NewStudent`,
//! `StudentChanges`, ...) that the repositories in `studentfeed-db` accept,
//! keeping request DTOs out of the storage layer.

pub mod auth;
pub mod comments;
pub mod student_posts;
pub mod students;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, StudentCredentials};
pub use comments::{Comment, CreateCommentDto, NewComment};
pub use student_posts::{
    CreateStudentPostDto, NewStudentPost, PostAuthor, StudentPost, StudentPostChanges,
    UpdateStudentPostDto,
};
pub use students::{CreateStudentDto, NewStudent, Student, StudentChanges, UpdateStudentDto};
