// Per-assignment audit: compares the fetched Canvas state against the Rule
// Catalog and produces the ordered checklist the report renders. Row order
// and the Spanish labels are the display contract.
use crate::canvas;
use crate::checklist::Checklist;
use crate::client::CanvasApi;
use crate::models::{Assignment, GradingType, Quiz, Student};
use crate::roster;
use crate::rules::{self, AssignmentCategory, Rule, EXPECTED_DISCUSSION_TYPE, QUIZ_RULE};
use crate::text::normalized_eq;

fn yes_no(condition: bool) -> &'static str {
    if condition {
        "Si"
    } else {
        "No"
    }
}

/// Audits one assignment under the given category.
///
/// The massive-program remap (`FinalWork` → `QuizFinal`) is applied exactly
/// once, before the rule lookup and before any rubric or module resolution.
/// Network failures along the way degrade to failing or skipped rows; they
/// never abort the analysis of the assignment.
pub fn analyze(
    api: &impl CanvasApi,
    course_id: &str,
    assignment: &Assignment,
    category: AssignmentCategory,
    is_massive: bool,
) -> Checklist {
    let category = category.effective(is_massive);
    let rule = rules::rule_for(category, is_massive);

    let mut checklist = Checklist::new();

    if let Some(expected_points) = rule.rubric_points {
        push_rubric_rows(&mut checklist, assignment, expected_points);
    }

    // For the final quiz the attempts expectation lives on the quiz detail,
    // so it is fetched before the common rows.
    let quiz = if category == AssignmentCategory::QuizFinal {
        assignment
            .quiz_id
            .and_then(|quiz_id| canvas::fetch_quiz(api, course_id, quiz_id))
    } else {
        None
    };

    let delivery_ok = assignment.submission_types.as_slice() == rule.submission_types;
    checklist.push(
        "Tipo de entrega",
        if delivery_ok { "En línea" } else { "Otro" },
        delivery_ok,
    );

    push_attempts_row(&mut checklist, assignment, &rule, quiz.as_ref());

    let grading_ok = assignment.grading_type == Some(GradingType::Points);
    checklist.push(
        "Tipo de calificación",
        if grading_ok { "Puntos" } else { "Otro" },
        grading_ok,
    );

    match assignment.points_possible {
        Some(points) => checklist.push(
            "Puntos posibles",
            format!("{}", points as i64),
            points == rule.points_possible,
        ),
        None => checklist.push("Puntos posibles", "N/A", false),
    }

    push_module_rows(&mut checklist, api, course_id, assignment, &rule);

    match category {
        AssignmentCategory::Forum => {
            let discussion_type = assignment
                .discussion_topic
                .as_ref()
                .and_then(|topic| topic.discussion_type.as_deref());
            let threaded = discussion_type == Some(EXPECTED_DISCUSSION_TYPE);
            checklist.push("Desactivar respuestas hilvanadas", yes_no(threaded), threaded);
        }
        AssignmentCategory::TeamWork => {
            push_teamwork_rows(&mut checklist, api, course_id, assignment);
        }
        AssignmentCategory::QuizFinal => {
            // No quiz detail, no quiz rows: the category rows are skipped
            // rather than rendered as spurious failures.
            if let Some(quiz) = &quiz {
                push_quiz_rows(&mut checklist, quiz);
            }
        }
        AssignmentCategory::FinalWork => {}
    }

    checklist
}

fn push_rubric_rows(checklist: &mut Checklist, assignment: &Assignment, expected_points: f64) {
    match &assignment.rubric_settings {
        Some(settings) => {
            checklist.push(
                "Tiene rubrica",
                settings.title.clone().unwrap_or_else(|| "Sin título".to_string()),
                true,
            );
            match settings.points_possible {
                Some(points) => checklist.push(
                    "Puntos rubrica",
                    format!("{}", points as i64),
                    points == expected_points,
                ),
                None => checklist.push("Puntos rubrica", "N/A", false),
            }
            let used = assignment.use_rubric_for_grading.unwrap_or(false);
            checklist.push("Usa rubrica para calificar", yes_no(used), used);
        }
        None => {
            checklist.push("Tiene rubrica", "No", false);
            checklist.push("Puntos rubrica", "N/A", false);
            checklist.push("Usa rubrica para calificar", "No", false);
        }
    }
}

fn push_attempts_row(
    checklist: &mut Checklist,
    assignment: &Assignment,
    rule: &Rule,
    quiz: Option<&Quiz>,
) {
    // Quiz detail wins for the final quiz; the assignment field otherwise.
    let attempts = quiz
        .and_then(|quiz| quiz.allowed_attempts)
        .or(assignment.allowed_attempts);
    let actual = match attempts {
        Some(-1) => "Ilimitado".to_string(),
        Some(n) => n.to_string(),
        None => "N/A".to_string(),
    };
    let passed = match rule.allowed_attempts {
        // Reported but not checked for this category.
        None => true,
        Some(expected) => attempts == Some(expected),
    };
    checklist.push("Intentos permitidos", actual, passed);
}

fn push_module_rows(
    checklist: &mut Checklist,
    api: &impl CanvasApi,
    course_id: &str,
    assignment: &Assignment,
    rule: &Rule,
) {
    let module = assignment
        .assignment_group_id
        .and_then(|group_id| canvas::fetch_assignment_group(api, course_id, group_id));

    match module {
        Some(module) => {
            match module.group_weight {
                Some(weight) => checklist.push(
                    "Ponderación",
                    format!("{}%", weight as i64),
                    weight == rule.module_weight,
                ),
                None => checklist.push("Ponderación", "N/A", false),
            }
            match module.name {
                Some(name) => {
                    let matches = normalized_eq(&name, &assignment.name);
                    checklist.push("Módulo", name, matches);
                }
                None => checklist.push("Módulo", "N/A", false),
            }
        }
        None => {
            checklist.push("Ponderación", "N/A", false);
            checklist.push("Módulo", "N/A", false);
        }
    }
}

fn format_unassigned(unassigned: &[Student]) -> String {
    let listed: Vec<String> = unassigned
        .iter()
        .map(|student| match &student.email {
            Some(email) => format!("{} <{}>", student.name, email),
            None => student.name.clone(),
        })
        .collect();
    format!("{} sin asignar ({})", unassigned.len(), listed.join(", "))
}

fn push_teamwork_rows(
    checklist: &mut Checklist,
    api: &impl CanvasApi,
    course_id: &str,
    assignment: &Assignment,
) {
    let is_group_work = assignment.group_category_id.is_some();
    checklist.push("Es trabajo en grupo", yes_no(is_group_work), is_group_work);

    let categories = roster::check_group_categories(api, course_id);
    let team_exists = categories
        .as_ref()
        .map(|check| check.team_category_id.is_some())
        .unwrap_or(false);
    checklist.push("Existe Equipo de trabajo", yes_no(team_exists), team_exists);

    // Passes when the ad-hoc category is absent.
    let project_groups_absent = categories
        .as_ref()
        .map(|check| !check.project_groups_exists)
        .unwrap_or(false);
    checklist.push(
        "Existe Project Groups",
        yes_no(project_groups_absent),
        project_groups_absent,
    );

    let team_roster = roster::resolve_teams(api, course_id);
    let teams_created = team_roster
        .as_ref()
        .map(|roster| roster.teams_created)
        .unwrap_or(false);
    checklist.push("Equipos creados", yes_no(teams_created), teams_created);

    match &team_roster {
        Some(roster) if roster.all_assigned && roster.teams_created => {
            checklist.push("Alumnos Asignados", "Si", true);
        }
        Some(roster) if roster.teams_created => {
            checklist.push("Alumnos Asignados", format_unassigned(&roster.unassigned), false);
        }
        _ => checklist.push("Alumnos Asignados", "No", false),
    }
}

fn push_quiz_rows(checklist: &mut Checklist, quiz: &Quiz) {
    match quiz.time_limit {
        Some(minutes) => checklist.push(
            "Límite de tiempo",
            format!("{} min", minutes as i64),
            minutes == QUIZ_RULE.time_limit,
        ),
        None => checklist.push("Límite de tiempo", "Sin límite", false),
    }
    match quiz.question_count {
        Some(count) => checklist.push(
            "Cantidad de preguntas",
            count.to_string(),
            count == QUIZ_RULE.question_count,
        ),
        None => checklist.push("Cantidad de preguntas", "N/A", false),
    }
    let shuffles = quiz.shuffle_answers.unwrap_or(false);
    checklist.push(
        "Preguntas aleatorias",
        yes_no(shuffles),
        shuffles == QUIZ_RULE.shuffle_answers,
    );
    let results_visible = quiz.hide_results.as_deref() != Some(QUIZ_RULE.forbidden_hide_results);
    checklist.push("Mostrar resultados", yes_no(results_visible), results_visible);
    let shows_answers = quiz.show_correct_answers.unwrap_or(false);
    checklist.push(
        "Mostrar respuestas correctas",
        yes_no(shows_answers),
        shows_answers,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::CheckRow;
    use crate::testutil::StubApi;
    use serde_json::json;

    fn assignment(value: serde_json::Value) -> Assignment {
        serde_json::from_value(value).unwrap()
    }

    fn row<'a>(checklist: &'a Checklist, label: &str) -> &'a CheckRow {
        checklist
            .rows()
            .iter()
            .find(|row| row.label == label)
            .unwrap_or_else(|| panic!("row {:?} missing", label))
    }

    fn forum_assignment() -> Assignment {
        assignment(json!({
            "id": 100,
            "name": "Foro Académico",
            "submission_types": ["discussion_topic"],
            "allowed_attempts": -1,
            "points_possible": 100.0,
            "grading_type": "points",
            "assignment_group_id": 4,
            "use_rubric_for_grading": true,
            "rubric_settings": {"id": 9, "title": "Rúbrica foro", "points_possible": 100.0},
            "discussion_topic": {"id": 55, "discussion_type": "threaded"},
        }))
    }

    fn forum_api() -> StubApi {
        StubApi::new().with(
            "/courses/1/assignment_groups/4",
            json!({"id": 4, "name": "Foro Academico", "group_weight": 20.0}),
        )
    }

    #[test]
    fn compliant_forum_is_all_pass_in_contract_order() {
        let checklist = analyze(
            &forum_api(),
            "1",
            &forum_assignment(),
            AssignmentCategory::Forum,
            false,
        );
        assert!(checklist.all_passed(), "failing rows: {:?}", checklist);
        let labels: Vec<_> = checklist.rows().iter().map(|row| row.label).collect();
        assert_eq!(
            labels,
            vec![
                "Tiene rubrica",
                "Puntos rubrica",
                "Usa rubrica para calificar",
                "Tipo de entrega",
                "Intentos permitidos",
                "Tipo de calificación",
                "Puntos posibles",
                "Ponderación",
                "Módulo",
                "Desactivar respuestas hilvanadas",
            ]
        );
        assert_eq!(row(&checklist, "Intentos permitidos").actual, "Ilimitado");
    }

    #[test]
    fn analysis_is_idempotent_over_identical_data() {
        let api = forum_api();
        let forum = forum_assignment();
        let first = analyze(&api, "1", &forum, AssignmentCategory::Forum, false);
        let second = analyze(&api, "1", &forum, AssignmentCategory::Forum, false);
        assert_eq!(first, second);
    }

    #[test]
    fn missing_rubric_fails_all_rubric_rows() {
        let upload = assignment(json!({
            "id": 5,
            "name": "Trabajo Final",
            "submission_types": ["online_upload"],
            "allowed_attempts": 2,
            "points_possible": 100.0,
            "grading_type": "points",
        }));
        let checklist = analyze(
            &StubApi::new(),
            "1",
            &upload,
            AssignmentCategory::FinalWork,
            false,
        );
        assert!(!row(&checklist, "Tiene rubrica").passed);
        assert!(!row(&checklist, "Puntos rubrica").passed);
        assert!(!row(&checklist, "Usa rubrica para calificar").passed);
        // Module lookup failed too: definite-fail rows, no crash.
        assert_eq!(row(&checklist, "Ponderación").actual, "N/A");
        assert!(!row(&checklist, "Módulo").passed);
    }

    #[test]
    fn massive_finalwork_is_audited_under_quiz_rules() {
        let quiz_assignment = assignment(json!({
            "id": 6,
            "name": "Cuestionario Final",
            "submission_types": ["online_quiz"],
            "points_possible": 30.0,
            "grading_type": "points",
            "quiz_id": 88,
        }));
        let api = StubApi::new().with(
            "/courses/1/quizzes/88",
            json!({
                "allowed_attempts": 1,
                "time_limit": 90.0,
                "shuffle_answers": true,
                "hide_results": null,
                "show_correct_answers": true,
                "question_count": 30,
            }),
        );
        let checklist = analyze(
            &api,
            "1",
            &quiz_assignment,
            AssignmentCategory::FinalWork,
            true,
        );
        // Quiz rules applied: no rubric rows, delivery expects online_quiz,
        // points expect 30 and attempts come from the quiz detail.
        assert_eq!(checklist.rows()[0].label, "Tipo de entrega");
        assert!(row(&checklist, "Tipo de entrega").passed);
        assert!(row(&checklist, "Puntos posibles").passed);
        assert!(row(&checklist, "Intentos permitidos").passed);
        assert!(row(&checklist, "Cantidad de preguntas").passed);
    }

    #[test]
    fn quiz_question_count_mismatch_fails_only_that_row() {
        let quiz_assignment = assignment(json!({
            "id": 6,
            "name": "Cuestionario Final",
            "submission_types": ["online_quiz"],
            "allowed_attempts": 1,
            "points_possible": 30.0,
            "grading_type": "points",
            "quiz_id": 88,
        }));
        let api = StubApi::new().with(
            "/courses/1/quizzes/88",
            json!({
                "allowed_attempts": 1,
                "time_limit": 90.0,
                "shuffle_answers": true,
                "hide_results": "until_after_last_attempt",
                "show_correct_answers": true,
                "question_count": 25,
            }),
        );
        let checklist = analyze(
            &api,
            "1",
            &quiz_assignment,
            AssignmentCategory::QuizFinal,
            true,
        );
        assert!(!row(&checklist, "Cantidad de preguntas").passed);
        assert_eq!(row(&checklist, "Cantidad de preguntas").actual, "25");
        for label in [
            "Límite de tiempo",
            "Preguntas aleatorias",
            "Mostrar resultados",
            "Mostrar respuestas correctas",
            "Intentos permitidos",
        ] {
            assert!(row(&checklist, label).passed, "row {:?} should pass", label);
        }
    }

    #[test]
    fn unfetchable_quiz_detail_skips_quiz_rows() {
        let quiz_assignment = assignment(json!({
            "id": 6,
            "name": "Cuestionario Final",
            "submission_types": ["online_quiz"],
            "allowed_attempts": 1,
            "points_possible": 30.0,
            "grading_type": "points",
            "quiz_id": 88,
        }));
        let checklist = analyze(
            &StubApi::new(),
            "1",
            &quiz_assignment,
            AssignmentCategory::QuizFinal,
            true,
        );
        let labels: Vec<_> = checklist.rows().iter().map(|row| row.label).collect();
        assert_eq!(labels.last(), Some(&"Módulo"));
        assert!(!labels.contains(&"Cantidad de preguntas"));
        // Attempts fall back to the assignment field.
        assert!(row(&checklist, "Intentos permitidos").passed);
    }

    #[test]
    fn teamwork_without_team_category_fails_category_rows() {
        let team_assignment = assignment(json!({
            "id": 8,
            "name": "Trabajo en Equipo",
            "submission_types": ["online_upload"],
            "allowed_attempts": 2,
            "points_possible": 100.0,
            "grading_type": "points",
            "group_category_id": 12,
        }));
        let api = StubApi::new().with_list(
            "/courses/1/group_categories",
            json!([{"id": 3, "name": "Project Groups"}]),
        );
        let checklist = analyze(
            &api,
            "1",
            &team_assignment,
            AssignmentCategory::TeamWork,
            false,
        );
        assert!(row(&checklist, "Es trabajo en grupo").passed);
        assert!(!row(&checklist, "Existe Equipo de trabajo").passed);
        assert!(!row(&checklist, "Existe Project Groups").passed);
        assert!(!row(&checklist, "Equipos creados").passed);
        assert!(!row(&checklist, "Alumnos Asignados").passed);
    }

    #[test]
    fn unassigned_students_are_named_in_the_row() {
        let team_assignment = assignment(json!({
            "id": 8,
            "name": "Trabajo en Equipo",
            "submission_types": ["online_upload"],
            "allowed_attempts": 2,
            "points_possible": 100.0,
            "grading_type": "points",
            "group_category_id": 12,
        }));
        let api = StubApi::new()
            .with_list(
                "/courses/1/group_categories",
                json!([{"id": 77, "name": "Equipo de trabajo"}]),
            )
            .with_list(
                "/group_categories/77/groups",
                json!([{"id": 5, "name": "Equipo 1"}]),
            )
            .with_list(
                "/courses/1/users?include[]=enrollments&include[]=email",
                json!([
                    {"id": 10, "name": "Ana", "email": "ana@uni.cl",
                     "enrollments": [{"type": "StudentEnrollment"}]},
                ]),
            )
            .with_list("/groups/5/memberships", json!([]));
        let checklist = analyze(
            &api,
            "1",
            &team_assignment,
            AssignmentCategory::TeamWork,
            false,
        );
        let assigned = row(&checklist, "Alumnos Asignados");
        assert!(!assigned.passed);
        assert_eq!(assigned.actual, "1 sin asignar (Ana <ana@uni.cl>)");
    }
}
