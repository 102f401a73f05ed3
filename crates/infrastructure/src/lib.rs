//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_credential_repository;
mod postgres_department_directory;
mod postgres_student_repository;
mod postgres_subject_repository;
mod query_scope;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_credential_repository::PostgresCredentialRepository;
pub use postgres_department_directory::PostgresDepartmentDirectory;
pub use postgres_student_repository::PostgresStudentRepository;
pub use postgres_subject_repository::PostgresSubjectRepository;
