//! Post and comment seeding.

use std::time::Instant;

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::FirstName;
use studentfeed_db::Store;
use studentfeed_models::{NewComment, NewStudentPost, Student, StudentPost};

/// Generates `per_student` posts for each student.
pub fn generate_posts(students: &[Student], per_student: usize) -> Vec<NewStudentPost> {
    students
        .iter()
        .flat_map(|student| {
            (0..per_student).map(move |_| NewStudentPost {
                student_id: student.id,
                title: Sentence(3..8).fake(),
                content: Paragraph(1..4).fake(),
            })
        })
        .collect()
}

pub fn generate_comments(posts: &[StudentPost], per_post: usize) -> Vec<NewComment> {
    posts
        .iter()
        .flat_map(|post| {
            (0..per_post).map(move |_| NewComment {
                post_id: post.id,
                author: FirstName().fake(),
                content: Sentence(4..12).fake(),
            })
        })
        .collect()
}

pub async fn seed_posts(
    store: &Store,
    students: &[Student],
    per_student: usize,
) -> Result<Vec<StudentPost>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📝 Seeding {} posts ({} per student)...",
        students.len() * per_student,
        per_student
    );

    let mut posts = Vec::with_capacity(students.len() * per_student);
    for new_post in generate_posts(students, per_student) {
        posts.push(store.posts.create(new_post).await?);
    }

    println!(
        "   ✓ Inserted {} posts in {:?}",
        posts.len(),
        start_time.elapsed()
    );

    Ok(posts)
}

/// Inserts comments on the given posts. Returns the count.
pub async fn seed_comments(
    store: &Store,
    posts: &[StudentPost],
    per_post: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "💬 Seeding {} comments ({} per post)...",
        posts.len() * per_post,
        per_post
    );

    let mut inserted = 0;
    for new_comment in generate_comments(posts, per_post) {
        store.comments.create(new_comment).await?;
        inserted += 1;
    }

    println!(
        "   ✓ Inserted {} comments in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}
