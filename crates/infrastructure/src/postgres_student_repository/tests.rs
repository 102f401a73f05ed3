use collegia_application::{StudentQuery, StudentRepository, StudentRow};
use collegia_core::AppError;
use collegia_domain::{Course, DeptId, EmailAddress, RollNumber, Semester};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresStudentRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for student repository tests: {error}");
    }

    Some(pool)
}

async fn ensure_department(pool: &PgPool, hod_id: &str, dept_id: &str) {
    let insert = sqlx::query(
        r#"
        INSERT INTO department_hod (hod_id, hod_name, password_hash, dept_id, dept_name)
        VALUES ($1, $2, 'x', $3, $4)
        ON CONFLICT (hod_id) DO NOTHING
        "#,
    )
    .bind(hod_id)
    .bind(format!("Head {hod_id}"))
    .bind(dept_id)
    .bind(format!("Department {dept_id}"))
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

async fn clear_student(pool: &PgPool, roll_number: &str) {
    let delete = sqlx::query("DELETE FROM students WHERE roll_number = $1")
        .bind(roll_number)
        .execute(pool)
        .await;

    assert!(delete.is_ok());
}

async fn stored_password_hash(pool: &PgPool, roll_number: &str) -> Option<String> {
    sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM students WHERE roll_number = $1",
    )
    .bind(roll_number)
    .fetch_optional(pool)
    .await
    .unwrap_or_else(|error| panic!("failed to read stored password hash: {error}"))
}

fn row(roll_number: &str, dept_id: &str, full_name: &str) -> StudentRow {
    StudentRow {
        roll_number: RollNumber::new(roll_number).unwrap_or_else(|_| unreachable!()),
        full_name: full_name.to_owned(),
        email: EmailAddress::new(format!("{}@example.edu", roll_number.to_lowercase()))
            .unwrap_or_else(|_| unreachable!()),
        dept_id: DeptId::new(dept_id).unwrap_or_else(|_| unreachable!()),
        semester: Semester::new(3).unwrap_or_else(|_| unreachable!()),
        course: Course::new("B.Tech").unwrap_or_else(|_| unreachable!()),
    }
}

#[tokio::test]
async fn duplicate_roll_number_is_a_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresStudentRepository::new(pool.clone());
    ensure_department(&pool, "STUD-H1", "STUD-D1").await;
    clear_student(&pool, "STUD-21CS001").await;

    let first = repository
        .insert_student(&row("STUD-21CS001", "STUD-D1", "Jane Roe"), "hash-a")
        .await;
    assert!(first.is_ok());

    let second = repository
        .insert_student(&row("STUD-21CS001", "STUD-D1", "Impostor"), "hash-b")
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn update_without_password_keeps_the_stored_hash() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresStudentRepository::new(pool.clone());
    ensure_department(&pool, "STUP-H1", "STUP-D1").await;
    clear_student(&pool, "STUP-21CS002").await;

    let inserted = repository
        .insert_student(&row("STUP-21CS002", "STUP-D1", "Jane Roe"), "initial-hash")
        .await;
    assert!(inserted.is_ok());

    let updated = repository
        .update_student(&row("STUP-21CS002", "STUP-D1", "Jane R. Roe"), None)
        .await;
    assert!(updated.is_ok());
    assert_eq!(updated.unwrap_or_default(), 1);

    assert_eq!(
        stored_password_hash(&pool, "STUP-21CS002").await.as_deref(),
        Some("initial-hash")
    );

    let rehashed = repository
        .update_student(
            &row("STUP-21CS002", "STUP-D1", "Jane R. Roe"),
            Some("rotated-hash"),
        )
        .await;
    assert!(rehashed.is_ok());
    assert_eq!(
        stored_password_hash(&pool, "STUP-21CS002").await.as_deref(),
        Some("rotated-hash")
    );
}

#[tokio::test]
async fn scoped_delete_ignores_students_of_other_departments() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresStudentRepository::new(pool.clone());
    ensure_department(&pool, "STUX-H1", "STUX-D1").await;
    ensure_department(&pool, "STUX-H2", "STUX-D2").await;
    clear_student(&pool, "STUX-21CS003").await;

    let inserted = repository
        .insert_student(&row("STUX-21CS003", "STUX-D1", "Jane Roe"), "hash")
        .await;
    assert!(inserted.is_ok());

    let roll = RollNumber::new("STUX-21CS003").unwrap_or_else(|_| unreachable!());

    let foreign = repository.delete_student_scoped(&roll, "STUX-H2").await;
    assert!(foreign.is_ok());
    assert_eq!(foreign.unwrap_or_default(), 0);

    let owner = repository.delete_student_scoped(&roll, "STUX-H1").await;
    assert!(owner.is_ok());
    assert_eq!(owner.unwrap_or_default(), 1);
}

#[tokio::test]
async fn scoped_listing_filters_by_semester() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresStudentRepository::new(pool.clone());
    ensure_department(&pool, "STUL-H1", "STUL-D1").await;
    clear_student(&pool, "STUL-21CS004").await;

    let inserted = repository
        .insert_student(&row("STUL-21CS004", "STUL-D1", "Jane Roe"), "hash")
        .await;
    assert!(inserted.is_ok());

    let matching = repository
        .list_students_scoped(
            "STUL-H1",
            &StudentQuery {
                dept_id: None,
                semester: Some(Semester::new(3).unwrap_or_else(|_| unreachable!())),
                course: Course::new("B.Tech").unwrap_or_else(|_| unreachable!()),
            },
        )
        .await;
    assert!(matching.is_ok());
    assert!(
        matching
            .unwrap_or_default()
            .iter()
            .any(|student| student.roll_number == "STUL-21CS004")
    );

    let other_semester = repository
        .list_students_scoped(
            "STUL-H1",
            &StudentQuery {
                dept_id: None,
                semester: Some(Semester::new(5).unwrap_or_else(|_| unreachable!())),
                course: Course::new("B.Tech").unwrap_or_else(|_| unreachable!()),
            },
        )
        .await;
    assert!(other_semester.is_ok());
    assert!(
        !other_semester
            .unwrap_or_default()
            .iter()
            .any(|student| student.roll_number == "STUL-21CS004")
    );
}

#[tokio::test]
async fn marks_summary_pivots_assessment_slots() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresStudentRepository::new(pool.clone());
    ensure_department(&pool, "STUM-H1", "STUM-D1").await;
    clear_student(&pool, "STUM-21CS005").await;

    let inserted = repository
        .insert_student(&row("STUM-21CS005", "STUM-D1", "Jane Roe"), "hash")
        .await;
    assert!(inserted.is_ok());

    let subject = sqlx::query(
        r#"
        INSERT INTO subjects (subject_id, subject_name, dept_id, semester, course)
        VALUES ('STUM-CS301', 'Algorithms', 'STUM-D1', 3, 'B.Tech')
        ON CONFLICT (subject_id) DO NOTHING
        "#,
    )
    .execute(&pool)
    .await;
    assert!(subject.is_ok());

    for (assessment_type, mark) in [("Assessment 1", 41), ("Assignment", 9)] {
        let seeded = sqlx::query(
            r#"
            INSERT INTO marks (roll_number, subject_id, assessment_type, mark)
            VALUES ('STUM-21CS005', 'STUM-CS301', $1, $2)
            ON CONFLICT (roll_number, subject_id, assessment_type)
            DO UPDATE SET mark = EXCLUDED.mark
            "#,
        )
        .bind(assessment_type)
        .bind(mark)
        .execute(&pool)
        .await;
        assert!(seeded.is_ok());
    }

    let roll = RollNumber::new("STUM-21CS005").unwrap_or_else(|_| unreachable!());
    let summary = repository.marks_summary_for_student(&roll).await;
    assert!(summary.is_ok());
    let summary = summary.unwrap_or_default();

    let pivot = summary
        .iter()
        .find(|entry| entry.subject_id == "STUM-CS301");
    assert!(pivot.is_some());
    let pivot = pivot.unwrap_or_else(|| unreachable!());
    assert_eq!(pivot.assessment1, Some(41));
    assert_eq!(pivot.assessment2, None);
    assert_eq!(pivot.assignment, Some(9));
}
