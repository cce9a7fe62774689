use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use studentfeed_core::{ErrorResponse, MessageResponse, ResponseStatus};
use studentfeed_models::{
    Comment, CreateCommentDto, CreateStudentDto, CreateStudentPostDto, LoginRequest,
    LoginResponse, PostAuthor, RegisterRequest, Student, StudentPost, UpdateStudentDto,
    UpdateStudentPostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::student_posts::controller::create_student_post,
        crate::modules::student_posts::controller::get_student_posts,
        crate::modules::student_posts::controller::get_student_post,
        crate::modules::student_posts::controller::update_student_post,
        crate::modules::student_posts::controller::delete_student_post,
        crate::modules::comments::controller::get_comments,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::delete_comment,
    ),
    components(
        schemas(
            ResponseStatus,
            MessageResponse,
            ErrorResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PostAuthor,
            StudentPost,
            CreateStudentPostDto,
            UpdateStudentPostDto,
            Comment,
            CreateCommentDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Student registration and login"),
        (name = "Students", description = "Student records (authentication required)"),
        (name = "Student Posts", description = "Posts written by students"),
        (name = "Comments", description = "Comments on student posts"),
    ),
    info(
        title = "Studentfeed API",
        version = "0.1.0",
        description = "REST API for student posts and comments, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
