//! Student seeding.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use studentfeed_core::hash_password;
use studentfeed_db::Store;
use studentfeed_models::{NewStudent, Student};
use uuid::Uuid;

use super::SEED_PASSWORD;

/// Generates students with distinct emails.
pub fn generate_students(count: usize) -> Vec<NewStudent> {
    // Tag emails per run so repeated seeding does not collide.
    let run = Uuid::new_v4().simple().to_string();
    let run = &run[..8];

    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            NewStudent {
                email: format!(
                    "{}.{}+{}{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    run,
                    idx
                ),
                name: format!("{first_name} {last_name}"),
                age: Some((17..30).fake()),
            }
        })
        .collect()
}

/// Registers `count` students, each with a login account.
pub async fn seed_students(
    store: &Store,
    count: usize,
) -> Result<Vec<Student>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut students = Vec::with_capacity(count);
    for new_student in generate_students(count) {
        let student = store
            .accounts
            .register(new_student, password_hash.clone())
            .await?;
        students.push(student);
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        students.len(),
        start_time.elapsed()
    );

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_emails_are_unique() {
        let students = generate_students(50);
        let emails: HashSet<_> = students.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails.len(), 50);
        assert!(students.iter().all(|s| s.email.ends_with("@example.com")));
    }
}
