use collegia_application::{AuthService, StudentService, SubjectService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub subject_service: SubjectService,
    pub student_service: StudentService,
    pub frontend_url: String,
}
