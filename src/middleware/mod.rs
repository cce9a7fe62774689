//! Middleware and extractors for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with `Authorization: Bearer <token>`
//! 2. [`auth::require_auth`] (router-wide) or the [`auth::AuthUser`] extractor
//!    (per handler) verifies the token
//! 3. The handler runs with the caller's claims, or the request is rejected
//!    with 401 before the body is read
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn create_post(auth_user: AuthUser, ValidatedJson(dto): ValidatedJson<CreateStudentPostDto>) {
//!     let student_id = auth_user.student_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
