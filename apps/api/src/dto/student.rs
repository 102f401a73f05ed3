use serde::Deserialize;

/// Query string for the student marks read; the roll number must match
/// the session subject.
#[derive(Debug, Deserialize)]
pub struct StudentMarksQuery {
    pub roll_number: String,
}
