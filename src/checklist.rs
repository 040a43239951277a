/// One audited requirement: the label shown to the reviewer, the value
/// Canvas actually has, and whether it meets policy.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRow {
    pub label: &'static str,
    pub actual: String,
    pub passed: bool,
}

/// Ordered sequence of check rows for one assignment.
///
/// Insertion order is the display contract: the renderer prints rows exactly
/// in the order the analyzer pushed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Checklist {
    rows: Vec<CheckRow>,
}

impl Checklist {
    pub fn new() -> Self {
        Checklist::default()
    }

    pub fn push(&mut self, label: &'static str, actual: impl Into<String>, passed: bool) {
        self.rows.push(CheckRow {
            label,
            actual: actual.into(),
            passed,
        });
    }

    pub fn rows(&self) -> &[CheckRow] {
        &self.rows
    }

    pub fn all_passed(&self) -> bool {
        self.rows.iter().all(|row| row.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_insertion_order() {
        let mut checklist = Checklist::new();
        checklist.push("Tiene rubrica", "Si", true);
        checklist.push("Puntos posibles", "100", true);
        checklist.push("Módulo", "Foro", false);
        let labels: Vec<_> = checklist.rows().iter().map(|row| row.label).collect();
        assert_eq!(labels, vec!["Tiene rubrica", "Puntos posibles", "Módulo"]);
        assert!(!checklist.all_passed());
    }
}
