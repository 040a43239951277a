// Team-roster completeness: cross-references group categories, groups,
// memberships and course enrollments for the official team category.
use crate::canvas;
use crate::client::CanvasApi;
use crate::models::Student;
use log::warn;
use std::collections::HashSet;

/// Group category every course must organize its teams under.
pub const TEAM_CATEGORY_NAME: &str = "Equipo de trabajo";

/// Ad-hoc category that must not exist alongside the official one.
pub const PROJECT_GROUPS_NAME: &str = "Project Groups";

/// Presence of the two policy-relevant group categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupCategoryCheck {
    pub team_category_id: Option<u64>,
    pub project_groups_exists: bool,
}

pub fn check_group_categories(
    api: &impl CanvasApi,
    course_id: &str,
) -> Option<GroupCategoryCheck> {
    let categories = canvas::fetch_group_categories(api, course_id)?;
    Some(GroupCategoryCheck {
        team_category_id: categories
            .iter()
            .find(|category| category.name == TEAM_CATEGORY_NAME)
            .map(|category| category.id),
        project_groups_exists: categories
            .iter()
            .any(|category| category.name == PROJECT_GROUPS_NAME),
    })
}

/// Team-assignment completeness for one course.
///
/// `members_by_group` keeps the groups in fetch order and the member display
/// names in membership order; both feed directly into the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRoster {
    pub teams_created: bool,
    pub all_assigned: bool,
    pub unassigned: Vec<Student>,
    pub total_students: usize,
    pub total_teams: usize,
    pub members_by_group: Vec<(String, Vec<String>)>,
}

/// Resolves team-assignment completeness under the official team category.
///
/// The student set is the course users whose first enrollment record is a
/// student enrollment; memberships referencing anyone else (e.g. a staff
/// member added to a group) are silently excluded from the accounting.
/// With no students at all, `all_assigned` holds vacuously.
///
/// Returns `None` only when the course user listing cannot be retrieved;
/// a missing category or an empty group list is a definite
/// `teams_created = false`, not an error.
pub fn resolve_teams(api: &impl CanvasApi, course_id: &str) -> Option<TeamRoster> {
    let categories = check_group_categories(api, course_id)?;
    let category_id = match categories.team_category_id {
        Some(id) => id,
        None => return Some(TeamRoster::default()),
    };

    let groups = match canvas::fetch_groups(api, category_id) {
        Some(groups) if !groups.is_empty() => groups,
        _ => return Some(TeamRoster::default()),
    };

    let users = canvas::fetch_course_users(api, course_id)?;
    let students: Vec<Student> = users
        .iter()
        .filter(|user| user.is_student())
        .map(Student::from)
        .collect();
    let student_ids: HashSet<u64> = students.iter().map(|student| student.id).collect();

    let mut assigned: HashSet<u64> = HashSet::new();
    let mut members_by_group: Vec<(String, Vec<String>)> = Vec::new();
    for group in &groups {
        let mut member_names = Vec::new();
        match canvas::fetch_memberships(api, group.id) {
            Some(memberships) => {
                for membership in memberships {
                    if !student_ids.contains(&membership.user_id) {
                        continue;
                    }
                    assigned.insert(membership.user_id);
                    if let Some(student) =
                        students.iter().find(|s| s.id == membership.user_id)
                    {
                        member_names.push(student.name.clone());
                    }
                }
            }
            None => {
                warn!(
                    "Could not fetch memberships for group {} ({}), counting it as empty",
                    group.name, group.id
                );
            }
        }
        members_by_group.push((group.name.clone(), member_names));
    }

    let unassigned: Vec<Student> = students
        .iter()
        .filter(|student| !assigned.contains(&student.id))
        .cloned()
        .collect();

    Some(TeamRoster {
        teams_created: true,
        all_assigned: unassigned.is_empty(),
        total_students: students.len(),
        total_teams: groups.len(),
        unassigned,
        members_by_group,
    })
}
