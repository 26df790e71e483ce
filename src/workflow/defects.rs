//! Creating, reading and listing defects

use chrono::Utc;

use crate::domain::{
    can_create_defect, can_edit_defect, can_view_defect, paginate, sort_defects, Actor,
    DashboardStats, DefectFilter, PageInfo, ProjectStats, SortKey, SortOrder,
};
use crate::errors::{DefectError, Result};
use crate::schemas::{Config, Defect, Priority, Role, User};
use crate::store::DefectStore;

/// Fields supplied when reporting a defect
#[derive(Debug, Clone, Default)]
pub struct NewDefect {
    pub title: String,
    pub description: String,
    pub project: String,
    pub priority: Option<Priority>,
    pub assignee_id: Option<u64>,
    pub due_date: Option<String>,
}

/// Report a new defect. It always starts in `new`.
pub fn create_defect<S: DefectStore + ?Sized>(
    store: &mut S,
    creator: &User,
    draft: NewDefect,
    config: &Config,
) -> Result<Defect> {
    if !can_create_defect(creator.role) {
        return Err(DefectError::Unauthorized(format!(
            "{} may not report defects",
            creator.role
        )));
    }

    let title = draft.title.trim();
    let description = draft.description.trim();
    if title.is_empty() || description.is_empty() {
        return Err(DefectError::InvalidInput(
            "title and description are required".to_string(),
        ));
    }
    if draft.project.trim().is_empty() {
        return Err(DefectError::InvalidInput("project is required".to_string()));
    }

    if let Some(assignee_id) = draft.assignee_id {
        require_engineer(store, assignee_id)?;
    }
    let due_date = draft.due_date.as_deref().map(normalize_due_date).transpose()?;

    let defect = Defect::new(
        store.next_defect_id()?,
        title.to_string(),
        description.to_string(),
        draft.project.trim().to_string(),
        creator,
    )
    .with_priority(draft.priority.unwrap_or(config.default_priority))
    .with_assignee(draft.assignee_id)
    .with_due_date(due_date);

    store.insert_defect(defect.clone())?;
    tracing::info!(defect_id = defect.id, user_id = creator.id, "defect created");
    Ok(defect)
}

/// Assignees must be engineers, since only the assignee can submit for review.
fn require_engineer<S: DefectStore + ?Sized>(store: &S, user_id: u64) -> Result<()> {
    let user = store.get_user(user_id)?;
    if user.role != Role::Engineer {
        return Err(DefectError::InvalidInput(format!(
            "assignee {} is a {}, not an engineer",
            user_id, user.role
        )));
    }
    Ok(())
}

/// Parse an RFC 3339 due date and store it in UTC.
fn normalize_due_date(raw: &str) -> Result<String> {
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map(|d| d.with_timezone(&Utc).to_rfc3339())
        .map_err(|e| DefectError::InvalidInput(format!("due date {}: {}", raw, e)))
}

/// Changes to a defect's details. `None` leaves a field as it is; for the
/// nullable fields `Some(None)` clears the value.
///
/// There is no status field: status only moves through the transition policy.
#[derive(Debug, Clone, Default)]
pub struct DefectEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<Option<u64>>,
    pub due_date: Option<Option<String>>,
}

impl DefectEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DefectError::InvalidInput(format!("{} cannot be blank", field)));
    }
    Ok(value.to_string())
}

/// Edit a defect's details. Managers may edit any defect, engineers only the
/// ones assigned to them.
pub fn edit_defect<S: DefectStore + ?Sized>(
    store: &mut S,
    defect_id: u64,
    actor: &Actor,
    edit: DefectEdit,
    dry_run: bool,
) -> Result<Defect> {
    let defect = show_defect(&*store, defect_id, actor)?;
    if !can_edit_defect(&defect, actor) {
        tracing::warn!(defect_id, user_id = actor.id, "edit rejected");
        return Err(DefectError::Unauthorized(format!(
            "{} {} may not edit defect {}",
            actor.role, actor.id, defect_id
        )));
    }
    if edit.is_empty() {
        return Err(DefectError::InvalidInput("nothing to change".to_string()));
    }

    let mut edited = defect;
    if let Some(title) = &edit.title {
        edited.title = required_text("title", title)?;
    }
    if let Some(description) = &edit.description {
        edited.description = required_text("description", description)?;
    }
    if let Some(priority) = edit.priority {
        edited.priority = priority;
    }
    if let Some(assignee_id) = edit.assignee_id {
        if let Some(id) = assignee_id {
            require_engineer(&*store, id)?;
        }
        edited.assignee_id = assignee_id;
    }
    if let Some(due_date) = &edit.due_date {
        edited.due_date = due_date.as_deref().map(normalize_due_date).transpose()?;
    }

    if dry_run {
        tracing::info!("[DRY RUN] would edit defect {}", defect_id);
        return Ok(edited);
    }

    let stored = store.update_details(defect_id, &edited)?;
    tracing::info!(defect_id, user_id = actor.id, "defect edited");
    Ok(stored)
}

/// Fetch one defect if `actor` may see it.
pub fn show_defect<S: DefectStore + ?Sized>(store: &S, defect_id: u64, actor: &Actor) -> Result<Defect> {
    let defect = store.get_defect(defect_id)?;
    if !can_view_defect(&defect, actor) {
        return Err(DefectError::DefectNotFound(defect_id));
    }
    Ok(defect)
}

/// List parameters
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: DefectFilter,
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: usize,
    /// Falls back to the configured page size
    pub per_page: Option<usize>,
}

/// One page of the defects `actor` may see, filtered and ordered.
pub fn list_defects<S: DefectStore + ?Sized>(
    store: &S,
    actor: &Actor,
    query: &ListQuery,
    config: &Config,
) -> Result<(Vec<Defect>, PageInfo)> {
    let compiled = query.filter.compile(Utc::now());
    let mut defects: Vec<Defect> = store
        .list_defects()?
        .into_iter()
        .filter(|d| can_view_defect(d, actor) && compiled.matches(d))
        .collect();

    sort_defects(&mut defects, query.sort, query.order);

    let per_page = query.per_page.unwrap_or(config.page_size as usize);
    Ok(paginate(
        defects,
        query.page,
        per_page,
        config.max_page_size as usize,
    ))
}

/// Dashboard counters over the defects `actor` may see.
pub fn dashboard<S: DefectStore + ?Sized>(store: &S, actor: &Actor) -> Result<DashboardStats> {
    let visible: Vec<Defect> = store
        .list_defects()?
        .into_iter()
        .filter(|d| can_view_defect(d, actor))
        .collect();
    let mut stats = DashboardStats::compute(&visible, Utc::now());
    if actor.role == Role::Manager {
        stats.projects = ProjectStats::by_project(&visible);
    }
    Ok(stats)
}
