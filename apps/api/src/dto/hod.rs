use collegia_application::{StudentParams, SubjectParams};
use collegia_core::{AppResult, NonEmptyString};
use collegia_domain::{
    Course, DeptId, EmailAddress, FacultyId, RollNumber, Semester, SubjectId,
};
use serde::Deserialize;

use super::{non_blank, require_fields};

/// Incoming payload for subject creation and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPayload {
    pub subject_id: Option<String>,
    pub subject_name: Option<String>,
    pub dept_id: Option<String>,
    pub semester: Option<i16>,
    pub course: Option<String>,
    pub faculty_id: Option<String>,
}

impl SubjectPayload {
    /// Validates the payload into subject mutation parameters. A blank
    /// faculty id means "no assignment", matching the dashboard form's
    /// empty select option.
    pub fn into_params(self) -> AppResult<SubjectParams> {
        require_fields(&[
            ("subjectId", non_blank(self.subject_id.clone()).is_some()),
            ("subjectName", non_blank(self.subject_name.clone()).is_some()),
            ("deptId", non_blank(self.dept_id.clone()).is_some()),
            ("semester", self.semester.is_some()),
        ])?;

        Ok(SubjectParams {
            subject_id: SubjectId::new(self.subject_id.unwrap_or_default())?,
            subject_name: NonEmptyString::new(
                self.subject_name.unwrap_or_default().trim(),
            )?,
            dept_id: DeptId::new(self.dept_id.unwrap_or_default())?,
            semester: Semester::new(self.semester.unwrap_or_default())?,
            course: non_blank(self.course).map(Course::new).transpose()?,
            faculty_id: non_blank(self.faculty_id).map(FacultyId::new).transpose()?,
        })
    }
}

/// Incoming payload for student enrollment and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub roll_number: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub dept_id: Option<String>,
    pub semester: Option<i16>,
    pub course: Option<String>,
}

impl StudentPayload {
    /// Validates the payload into student mutation parameters. The
    /// password is part of the required set only on enrollment; update
    /// keeps the stored one when it is absent.
    pub fn into_params(self, password_required: bool) -> AppResult<StudentParams> {
        let password = self
            .password
            .clone()
            .filter(|value| !value.is_empty());

        require_fields(&[
            ("rollNumber", non_blank(self.roll_number.clone()).is_some()),
            ("fullName", non_blank(self.full_name.clone()).is_some()),
            ("email", non_blank(self.email.clone()).is_some()),
            ("password", !password_required || password.is_some()),
            ("deptId", non_blank(self.dept_id.clone()).is_some()),
            ("semester", self.semester.is_some()),
        ])?;

        Ok(StudentParams {
            roll_number: RollNumber::new(self.roll_number.unwrap_or_default())?,
            full_name: NonEmptyString::new(self.full_name.unwrap_or_default().trim())?,
            email: EmailAddress::new(self.email.unwrap_or_default())?,
            password,
            dept_id: DeptId::new(self.dept_id.unwrap_or_default())?,
            semester: Semester::new(self.semester.unwrap_or_default())?,
            course: non_blank(self.course).map(Course::new).transpose()?,
        })
    }
}

/// Optional filters shared by the scoped subject and student listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedListQuery {
    pub dept_id: Option<String>,
    pub semester: Option<i16>,
    pub course: Option<String>,
}

impl ScopedListQuery {
    /// Parses the query string into typed filters.
    pub fn into_filters(
        self,
    ) -> AppResult<(Option<DeptId>, Option<Semester>, Option<Course>)> {
        Ok((
            non_blank(self.dept_id).map(DeptId::new).transpose()?,
            self.semester.map(Semester::new).transpose()?,
            non_blank(self.course).map(Course::new).transpose()?,
        ))
    }
}

/// Optional filters for the faculty and assignment listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListQuery {
    pub dept_id: Option<String>,
}

impl AssignmentListQuery {
    /// Parses the query string into a typed department filter.
    pub fn into_filter(self) -> AppResult<Option<DeptId>> {
        non_blank(self.dept_id).map(DeptId::new).transpose()
    }
}

/// Optional filters for the marks report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksReportQuery {
    pub dept_id: Option<String>,
    pub semester: Option<i16>,
    pub course: Option<String>,
    pub subject_id: Option<String>,
}

impl MarksReportQuery {
    /// Parses the query string into typed filters.
    #[allow(clippy::type_complexity)]
    pub fn into_filters(
        self,
    ) -> AppResult<(
        Option<DeptId>,
        Option<Semester>,
        Option<Course>,
        Option<SubjectId>,
    )> {
        Ok((
            non_blank(self.dept_id).map(DeptId::new).transpose()?,
            self.semester.map(Semester::new).transpose()?,
            non_blank(self.course).map(Course::new).transpose()?,
            non_blank(self.subject_id).map(SubjectId::new).transpose()?,
        ))
    }
}

/// Query string for subject deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteSubjectQuery {
    pub subject_id: String,
}

/// Query string for student deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteStudentQuery {
    pub roll_number: String,
}
