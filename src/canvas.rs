// Typed fetch helpers over the `CanvasApi` seam. Each helper maps one
// Canvas endpoint to a model type; any failure has already been reported by
// the client and surfaces as `None` so callers can skip the dependent work.
use crate::client::CanvasApi;
use crate::models::{
    Account, Assignment, AssignmentGroup, Course, CourseUser, Group, GroupCategory, Membership,
    Quiz,
};
use log::error;
use serde::de::DeserializeOwned;
use serde_json::Value;

fn decode<T: DeserializeOwned>(what: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            error!("Failed to parse {}: {}", what, e);
            None
        }
    }
}

// Items that fail to parse are dropped individually; one malformed entity
// must not hide the rest of the listing.
fn decode_list<T: DeserializeOwned>(what: &str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| decode(what, value))
        .collect()
}

pub fn fetch_course(api: &impl CanvasApi, course_id: &str) -> Option<Course> {
    decode("course", api.get(&format!("/courses/{}", course_id))?)
}

pub fn fetch_account(api: &impl CanvasApi, account_id: u64) -> Option<Account> {
    decode("account", api.get(&format!("/accounts/{}", account_id))?)
}

pub fn fetch_assignments(api: &impl CanvasApi, course_id: &str) -> Option<Vec<Assignment>> {
    let items = api.get_all(&format!("/courses/{}/assignments", course_id))?;
    Some(decode_list("assignment", items))
}

/// Looks up the assignment group ("módulo") that owns an assignment.
pub fn fetch_assignment_group(
    api: &impl CanvasApi,
    course_id: &str,
    group_id: u64,
) -> Option<AssignmentGroup> {
    decode(
        "assignment group",
        api.get(&format!(
            "/courses/{}/assignment_groups/{}",
            course_id, group_id
        ))?,
    )
}

pub fn fetch_group_categories(
    api: &impl CanvasApi,
    course_id: &str,
) -> Option<Vec<GroupCategory>> {
    let items = api.get_all(&format!("/courses/{}/group_categories", course_id))?;
    Some(decode_list("group category", items))
}

pub fn fetch_groups(api: &impl CanvasApi, category_id: u64) -> Option<Vec<Group>> {
    let items = api.get_all(&format!("/group_categories/{}/groups", category_id))?;
    Some(decode_list("group", items))
}

pub fn fetch_memberships(api: &impl CanvasApi, group_id: u64) -> Option<Vec<Membership>> {
    let items = api.get_all(&format!("/groups/{}/memberships", group_id))?;
    Some(decode_list("membership", items))
}

/// Fetches every course user with enrollments and email included, teaching
/// staff included; filtering to students happens in the roster resolver.
pub fn fetch_course_users(api: &impl CanvasApi, course_id: &str) -> Option<Vec<CourseUser>> {
    let items = api.get_all(&format!(
        "/courses/{}/users?include[]=enrollments&include[]=email",
        course_id
    ))?;
    Some(decode_list("course user", items))
}

pub fn fetch_quiz(api: &impl CanvasApi, course_id: &str, quiz_id: u64) -> Option<Quiz> {
    decode(
        "quiz",
        api.get(&format!("/courses/{}/quizzes/{}", course_id, quiz_id))?,
    )
}
