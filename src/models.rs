// Serde data model for the Canvas entities the audit reads. Every value is
// an immutable snapshot fetched once per analysis pass and never written
// back; fields Canvas may omit or null out are `Option`.
use serde::Deserialize;

/// Submission channels Canvas can configure on an assignment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    DiscussionTopic,
    OnlineUpload,
    OnlineQuiz,
    OnlineTextEntry,
    OnlineUrl,
    MediaRecording,
    OnPaper,
    None,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingType {
    Points,
    Percent,
    LetterGrade,
    GpaScale,
    PassFail,
    NotGraded,
    #[serde(other)]
    Other,
}

/// Rubric information embedded in an assignment payload. Only presence,
/// title and point total are audited.
#[derive(Debug, Clone, Deserialize)]
pub struct RubricSettings {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub points_possible: Option<f64>,
}

/// The discussion topic attached to a forum assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionTopic {
    pub id: Option<u64>,
    pub discussion_type: Option<String>,
}

/// A Canvas assignment as returned by `/courses/{id}/assignments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub submission_types: Vec<SubmissionType>,
    /// -1 means unlimited attempts.
    pub allowed_attempts: Option<i64>,
    pub points_possible: Option<f64>,
    pub grading_type: Option<GradingType>,
    pub assignment_group_id: Option<u64>,
    pub group_category_id: Option<u64>,
    pub use_rubric_for_grading: Option<bool>,
    pub rubric_settings: Option<RubricSettings>,
    pub discussion_topic: Option<DiscussionTopic>,
    pub quiz_id: Option<u64>,
}

/// Assignment group ("módulo"), the grouping construct that carries a weight
/// percentage toward the course grade.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentGroup {
    pub id: u64,
    pub name: Option<String>,
    pub group_weight: Option<f64>,
}

/// Named partition of course groups, e.g. the official "Equipo de trabajo"
/// teams versus ad-hoc "Project Groups".
#[derive(Debug, Clone, Deserialize)]
pub struct GroupCategory {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
}

/// Links a group to a user id.
#[derive(Debug, Clone, Deserialize)]
pub struct Membership {
    pub user_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Enrollment {
    #[serde(rename = "type")]
    pub kind: String,
}

/// A course user as returned by `/courses/{id}/users` with enrollments
/// included. Teachers and assistants appear here too; `is_student`
/// distinguishes them.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseUser {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

impl CourseUser {
    /// A user counts as a student when the *first* enrollment record is a
    /// student enrollment. A user enrolled as student in one section and as
    /// TA in another is classified by the first record alone; institutional
    /// policy has not clarified the intended behavior, so the historical
    /// classification is kept.
    pub fn is_student(&self) -> bool {
        self.enrollments
            .first()
            .map(|e| e.kind.to_lowercase().contains("student"))
            .unwrap_or(false)
    }
}

/// Student identity kept for roster reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
}

impl From<&CourseUser> for Student {
    fn from(user: &CourseUser) -> Self {
        Student {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Quiz detail behind a `quiz_final` assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct Quiz {
    pub allowed_attempts: Option<i64>,
    /// Minutes, absent when the quiz is untimed.
    pub time_limit: Option<f64>,
    pub shuffle_answers: Option<bool>,
    pub hide_results: Option<String>,
    pub show_correct_answers: Option<bool>,
    pub question_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub course_code: Option<String>,
    pub account_id: Option<u64>,
}

/// Subaccount owning a course; its name flags massive programs.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_tolerates_missing_optional_fields() {
        let assignment: Assignment = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Trabajo Final",
            "submission_types": ["online_upload"],
        }))
        .unwrap();
        assert_eq!(assignment.submission_types, vec![SubmissionType::OnlineUpload]);
        assert!(assignment.rubric_settings.is_none());
        assert!(assignment.quiz_id.is_none());
    }

    #[test]
    fn unknown_submission_type_falls_back_to_other() {
        let parsed: Vec<SubmissionType> =
            serde_json::from_value(serde_json::json!(["external_tool"])).unwrap();
        assert_eq!(parsed, vec![SubmissionType::Other]);
    }

    #[test]
    fn course_user_is_student_by_first_enrollment() {
        let student: CourseUser = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Ana",
            "enrollments": [{"type": "StudentEnrollment"}],
        }))
        .unwrap();
        let teacher: CourseUser = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Luis",
            "enrollments": [{"type": "TeacherEnrollment"}],
        }))
        .unwrap();
        assert!(student.is_student());
        assert!(!teacher.is_student());
    }
}
