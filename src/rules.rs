// Policy rules: the expected configuration for each audited assignment
// category. Policy changes should only touch the tables in this module.
use crate::models::SubmissionType;

/// The assignment categories institutional policy says something about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentCategory {
    Forum,
    FinalWork,
    QuizFinal,
    TeamWork,
}

impl AssignmentCategory {
    /// Resolves the category a course actually gets audited under.
    ///
    /// In a massive program the final work is delivered as a quiz, so
    /// `FinalWork` remaps to `QuizFinal`. This is applied exactly once,
    /// before any rule lookup or branching.
    pub fn effective(self, is_massive: bool) -> Self {
        match (self, is_massive) {
            (AssignmentCategory::FinalWork, true) => AssignmentCategory::QuizFinal,
            (category, _) => category,
        }
    }
}

/// Expected values for one category. `allowed_attempts` of `None` means the
/// attempts row is reported but not checked; `rubric_points` of `None` means
/// the category carries no rubric rows at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub submission_types: &'static [SubmissionType],
    pub allowed_attempts: Option<i64>,
    pub points_possible: f64,
    pub module_weight: f64,
    pub rubric_points: Option<f64>,
}

/// Expected discussion configuration for forum assignments.
pub const EXPECTED_DISCUSSION_TYPE: &str = "threaded";

/// Expected quiz configuration for the massive-program final quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRule {
    /// Minutes.
    pub time_limit: f64,
    pub question_count: i64,
    pub shuffle_answers: bool,
    /// Results must not be hidden with this setting.
    pub forbidden_hide_results: &'static str,
}

pub const QUIZ_RULE: QuizRule = QuizRule {
    time_limit: 90.0,
    question_count: 30,
    shuffle_answers: true,
    forbidden_hide_results: "always",
};

/// Looks up the rule set for a category.
///
/// Call with the *effective* category: the massive remap must already have
/// happened. `is_massive` only modulates the team-project module weight.
pub fn rule_for(category: AssignmentCategory, is_massive: bool) -> Rule {
    match category {
        AssignmentCategory::Forum => Rule {
            submission_types: &[SubmissionType::DiscussionTopic],
            allowed_attempts: None,
            points_possible: 100.0,
            module_weight: 20.0,
            rubric_points: Some(100.0),
        },
        AssignmentCategory::FinalWork => Rule {
            submission_types: &[SubmissionType::OnlineUpload],
            allowed_attempts: Some(2),
            points_possible: 100.0,
            module_weight: 50.0,
            rubric_points: Some(100.0),
        },
        AssignmentCategory::QuizFinal => Rule {
            submission_types: &[SubmissionType::OnlineQuiz],
            allowed_attempts: Some(1),
            points_possible: 30.0,
            module_weight: 30.0,
            rubric_points: None,
        },
        AssignmentCategory::TeamWork => Rule {
            submission_types: &[SubmissionType::OnlineUpload],
            allowed_attempts: Some(2),
            points_possible: 100.0,
            module_weight: if is_massive { 50.0 } else { 30.0 },
            rubric_points: Some(100.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalwork_remaps_to_quiz_final_only_when_massive() {
        assert_eq!(
            AssignmentCategory::FinalWork.effective(true),
            AssignmentCategory::QuizFinal
        );
        assert_eq!(
            AssignmentCategory::FinalWork.effective(false),
            AssignmentCategory::FinalWork
        );
    }

    #[test]
    fn other_categories_are_unaffected_by_the_remap() {
        for category in [
            AssignmentCategory::Forum,
            AssignmentCategory::QuizFinal,
            AssignmentCategory::TeamWork,
        ] {
            assert_eq!(category.effective(true), category);
            assert_eq!(category.effective(false), category);
        }
    }

    #[test]
    fn remapped_category_uses_quiz_rules() {
        let rule = rule_for(AssignmentCategory::FinalWork.effective(true), true);
        assert_eq!(rule, rule_for(AssignmentCategory::QuizFinal, true));
        assert_eq!(rule.points_possible, 30.0);
        assert_eq!(rule.submission_types, &[SubmissionType::OnlineQuiz]);
    }

    #[test]
    fn teamwork_weight_depends_on_program_size() {
        assert_eq!(rule_for(AssignmentCategory::TeamWork, true).module_weight, 50.0);
        assert_eq!(rule_for(AssignmentCategory::TeamWork, false).module_weight, 30.0);
    }
}
