//! Feature modules. Each one has a `controller` (HTTP handlers with OpenAPI
//! annotations), a `service` (business rules over the repositories) and a
//! `router`.

pub mod auth;
pub mod comments;
pub mod student_posts;
pub mod students;
