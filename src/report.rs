// Terminal rendering of the audit: course header plus one three-column
// table per assignment. Rows print exactly in checklist order.
use crate::checklist::Checklist;
use crate::models::{Account, Course};

const PASS_GLYPH: &str = "✅";
const FAIL_GLYPH: &str = "🟥";

pub fn print_divider() {
    println!("{}", "-".repeat(72));
}

/// Prints the course banner: identification, owning subaccount, massive
/// flag and student count (when the roster could be fetched).
pub fn print_course_header(
    course: &Course,
    account: Option<&Account>,
    is_massive: bool,
    student_count: Option<usize>,
) {
    println!();
    println!(
        "Curso: {} - ({}) - {}",
        course.name,
        course.id,
        course.course_code.as_deref().unwrap_or("sin código")
    );
    match account {
        Some(account) => println!("Subcuenta: {} - ({})", account.name, account.id),
        None => println!("Subcuenta: no disponible"),
    }
    println!("Diplomado Masivo: {}", if is_massive { "Si" } else { "No" });
    match student_count {
        Some(count) => println!("Cantidad de Alumnos: {}", count),
        None => println!("Cantidad de Alumnos: no disponible"),
    }
}

/// Prints the checklist for one assignment as a
/// `Requerimiento | Actual | Estado` table.
pub fn print_assignment_checklist(name: &str, id: u64, checklist: &Checklist) {
    println!();
    println!("Tarea: {} - {}", name, id);

    let label_width = checklist
        .rows()
        .iter()
        .map(|row| row.label.chars().count())
        .chain(std::iter::once("Requerimiento".len()))
        .max()
        .unwrap_or(0);
    let actual_width = checklist
        .rows()
        .iter()
        .map(|row| row.actual.chars().count())
        .chain(std::iter::once("Actual".len()))
        .max()
        .unwrap_or(0);

    println!(
        "  {:<label_width$}  {:<actual_width$}  Estado",
        "Requerimiento", "Actual"
    );
    for row in checklist.rows() {
        println!(
            "  {:<label_width$}  {:<actual_width$}  {}",
            row.label,
            row.actual,
            if row.passed { PASS_GLYPH } else { FAIL_GLYPH }
        );
    }
}

/// Inline informational banner, e.g. for an empty assignment bucket.
pub fn print_info(message: &str) {
    println!("[info] {}", message);
}

/// Inline warning banner for a skipped unit of work.
pub fn print_warning(message: &str) {
    println!("[aviso] {}", message);
}
