// Interactive review loop: take course ids, pick an action and audit each
// course best-effort. A failed course or assignment is reported and skipped,
// never aborting the rest of the run.
use canvas_task_auditor::client::{CanvasApi, CanvasClient};
use canvas_task_auditor::credentials::Credentials;
use canvas_task_auditor::models::Assignment;
use canvas_task_auditor::rules::AssignmentCategory;
use canvas_task_auditor::text::{normalized_contains, parse_course_ids};
use canvas_task_auditor::{analyzer, canvas, report};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::info;
use std::process::exit;

// Subaccount name marker for massive programs; compared normalized.
const MASSIVE_MARKER: &str = "Diplomado Masivo";

fn main() {
    env_logger::init();

    let credentials = Credentials::obtain();
    let client = CanvasClient::new(credentials);

    let raw_ids = read_course_ids_input();
    let course_ids = parse_course_ids(&raw_ids);
    if course_ids.is_empty() {
        eprintln!("Por favor, ingresa al menos un ID de curso.");
        exit(1);
    }

    let actions = ["Revisar", "Corregir"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("¿Qué acción deseas realizar?")
        .items(&actions)
        .default(0)
        .interact()
        .unwrap_or(0);

    match actions[selection] {
        "Revisar" => {
            for course_id in &course_ids {
                review_course(&client, course_id);
                report::print_divider();
            }
        }
        _ => {
            // Acknowledged no-op: the correction pathway is not implemented.
            report::print_info("Acción seleccionada: Corregir cursos (no implementada).");
        }
    }
}

// Course ids come from the command line when given, otherwise from a free
// text prompt; either way the same separator rules apply.
fn read_course_ids_input() -> String {
    let from_args = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !from_args.trim().is_empty() {
        return from_args;
    }
    Input::new()
        .with_prompt("Ingresa los IDs de los cursos (separados por espacio, coma o salto de línea)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default()
}

fn review_course(api: &impl CanvasApi, course_id: &str) {
    info!("Reviewing course {}", course_id);
    let course = match canvas::fetch_course(api, course_id) {
        Some(course) => course,
        None => {
            report::print_warning(&format!("Curso con ID {} no encontrado.", course_id));
            return;
        }
    };

    let account = course
        .account_id
        .and_then(|account_id| canvas::fetch_account(api, account_id));
    let is_massive = account
        .as_ref()
        .map(|account| normalized_contains(&account.name, MASSIVE_MARKER))
        .unwrap_or(false);
    let student_count = canvas::fetch_course_users(api, course_id)
        .map(|users| users.iter().filter(|user| user.is_student()).count());

    report::print_course_header(&course, account.as_ref(), is_massive, student_count);

    let assignments = match canvas::fetch_assignments(api, course_id) {
        Some(assignments) if !assignments.is_empty() => assignments,
        Some(_) => {
            report::print_warning("No se encontraron tareas en este curso.");
            return;
        }
        None => {
            report::print_warning("No se pudieron obtener las tareas de este curso.");
            return;
        }
    };

    let forums = named_like(&assignments, &["foro academico"]);
    let teamworks = named_like(&assignments, &["trabajo en equipo", "tarea en equipo"]);
    let finals = if is_massive {
        named_like(&assignments, &["cuestionario final"])
    } else {
        named_like(&assignments, &["trabajo final"])
    };

    review_bucket(
        api,
        course_id,
        &forums,
        AssignmentCategory::Forum,
        is_massive,
        "No hay tareas llamadas 'Foro academico'",
    );
    review_bucket(
        api,
        course_id,
        &teamworks,
        AssignmentCategory::TeamWork,
        is_massive,
        "No hay tareas llamadas 'Trabajo en equipo'",
    );
    review_bucket(
        api,
        course_id,
        &finals,
        AssignmentCategory::FinalWork,
        is_massive,
        "No hay tareas llamadas 'Trabajo final' o 'Cuestionario final'",
    );
}

fn named_like<'a>(assignments: &'a [Assignment], needles: &[&str]) -> Vec<&'a Assignment> {
    assignments
        .iter()
        .filter(|assignment| {
            needles
                .iter()
                .any(|needle| normalized_contains(&assignment.name, needle))
        })
        .collect()
}

fn review_bucket(
    api: &impl CanvasApi,
    course_id: &str,
    assignments: &[&Assignment],
    category: AssignmentCategory,
    is_massive: bool,
    empty_message: &str,
) {
    if assignments.is_empty() {
        report::print_info(empty_message);
        return;
    }
    for assignment in assignments {
        let checklist = analyzer::analyze(api, course_id, assignment, category, is_massive);
        report::print_assignment_checklist(&assignment.name, assignment.id, &checklist);
    }
}
