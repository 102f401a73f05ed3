//! Ports implemented by infrastructure adapters.

mod credentials;
mod directory;
mod students;
mod subjects;

pub use credentials::{CredentialRepository, PasswordHasher, StoredCredential};
pub use directory::DepartmentDirectory;
pub use students::{MarksQuery, StudentQuery, StudentRepository, StudentRow};
pub use subjects::{AssignmentQuery, SubjectQuery, SubjectRepository};
