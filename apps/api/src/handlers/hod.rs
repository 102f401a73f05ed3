//! Head-of-department handlers: profile, subjects, students, reports.

mod reports;
mod students;
mod subjects;

pub use reports::{hod_profile_handler, marks_report_handler};
pub use students::{
    add_student_handler, delete_student_handler, list_students_handler, update_student_handler,
};
pub use subjects::{
    add_subject_handler, delete_subject_handler, list_faculty_assignments_handler,
    list_faculty_handler, list_subjects_handler, update_subject_handler,
};
