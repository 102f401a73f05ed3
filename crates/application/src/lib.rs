//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_service;
mod ports;
mod student_service;
mod subject_service;

pub use auth_service::{AdminRegistration, AuthService, PASSWORD_MIN_LENGTH};
pub use ports::{
    AssignmentQuery, CredentialRepository, DepartmentDirectory, MarksQuery, PasswordHasher,
    StoredCredential, StudentQuery, StudentRepository, StudentRow, SubjectQuery,
    SubjectRepository,
};
pub use student_service::{StudentParams, StudentService};
pub use subject_service::{SubjectParams, SubjectService};
