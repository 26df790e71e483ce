//! Defect list queries: filtering, search, ordering, pagination and the
//! dashboard counters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::schemas::{Defect, DefectStatus, Priority};

use super::states::is_open_status;

/// A defect is overdue when its due date has passed while it is still open.
///
/// Unparseable due dates are treated as absent.
pub fn is_overdue(defect: &Defect, now: DateTime<Utc>) -> bool {
    if !is_open_status(defect.status) {
        return false;
    }
    defect
        .due_date
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|due| due.with_timezone(&Utc) < now)
        .unwrap_or(false)
}

/// Criteria for narrowing a defect list. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DefectFilter {
    pub status: Option<DefectStatus>,
    pub priority: Option<Priority>,
    pub project: Option<String>,
    pub assignee_id: Option<u64>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    /// Only overdue defects
    pub overdue: bool,
}

impl DefectFilter {
    /// Compile the filter against a fixed clock.
    pub fn compile(&self, now: DateTime<Utc>) -> CompiledFilter<'_> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .and_then(|term| {
                RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()
                    .ok()
            });
        CompiledFilter {
            filter: self,
            search,
            now,
        }
    }
}

/// A filter ready to be matched repeatedly
#[derive(Debug)]
pub struct CompiledFilter<'a> {
    filter: &'a DefectFilter,
    search: Option<Regex>,
    now: DateTime<Utc>,
}

impl CompiledFilter<'_> {
    pub fn matches(&self, defect: &Defect) -> bool {
        let f = self.filter;
        if f.status.is_some_and(|s| s != defect.status) {
            return false;
        }
        if f.priority.is_some_and(|p| p != defect.priority) {
            return false;
        }
        if f.project.as_deref().is_some_and(|p| p != defect.project) {
            return false;
        }
        if f.assignee_id.is_some() && f.assignee_id != defect.assignee_id {
            return false;
        }
        if let Some(search) = &self.search {
            if !search.is_match(&defect.title) && !search.is_match(&defect.description) {
                return false;
            }
        }
        if f.overdue && !is_overdue(defect, self.now) {
            return false;
        }
        true
    }
}

/// Field to order a defect list by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    DueDate,
    Priority,
    Status,
    Title,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(SortKey::CreatedAt),
            "updated_at" => Ok(SortKey::UpdatedAt),
            "due_date" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            "title" => Ok(SortKey::Title),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Order defects in place. Ties keep ascending id order.
pub fn sort_defects(defects: &mut [Defect], key: SortKey, order: SortOrder) {
    defects.sort_by(|a, b| {
        let ordering = match key {
            // RFC 3339 strings from one clock compare chronologically
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::Priority => a.priority.cmp(&b.priority),
            SortKey::Status => a.status.cmp(&b.status),
            SortKey::Title => a.title.cmp(&b.title),
        };
        let ordering = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then(a.id.cmp(&b.id))
    });
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: usize,
    pub pages: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice out one 1-based page. `per_page` is clamped to `1..=max_per_page`
/// and a page past the end yields an empty slice.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize, max_per_page: usize) -> (Vec<T>, PageInfo) {
    let per_page = per_page.clamp(1, max_per_page.max(1));
    let page = page.max(1);
    let total = items.len();
    let pages = total.div_ceil(per_page);

    let info = PageInfo {
        total,
        pages,
        current_page: page,
        per_page,
        has_next: page < pages,
        has_prev: page > 1,
    };

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    (items, info)
}

/// Counters shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_defects: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub in_review: usize,
    pub high_priority: usize,
    pub closed: usize,
    /// Per-project breakdown; only filled in for managers
    pub projects: Vec<ProjectStats>,
}

/// Dashboard counters for one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub project: String,
    pub total_defects: usize,
    pub in_progress: usize,
    pub closed: usize,
}

impl ProjectStats {
    /// One entry per project, ordered by project name.
    pub fn by_project<'a>(defects: impl IntoIterator<Item = &'a Defect>) -> Vec<ProjectStats> {
        let mut projects: BTreeMap<&str, ProjectStats> = BTreeMap::new();
        for defect in defects {
            let entry = projects
                .entry(defect.project.as_str())
                .or_insert_with(|| ProjectStats {
                    project: defect.project.clone(),
                    ..Default::default()
                });
            entry.total_defects += 1;
            match defect.status {
                DefectStatus::InProgress => entry.in_progress += 1,
                DefectStatus::Closed => entry.closed += 1,
                _ => {}
            }
        }
        projects.into_values().collect()
    }
}

impl DashboardStats {
    pub fn compute<'a>(defects: impl IntoIterator<Item = &'a Defect>, now: DateTime<Utc>) -> Self {
        defects
            .into_iter()
            .fold(DashboardStats::default(), |mut stats, defect| {
                stats.total_defects += 1;
                match defect.status {
                    DefectStatus::InProgress => stats.in_progress += 1,
                    DefectStatus::Review => stats.in_review += 1,
                    DefectStatus::Closed => stats.closed += 1,
                    DefectStatus::New | DefectStatus::Cancelled => {}
                }
                if defect.priority == Priority::High {
                    stats.high_priority += 1;
                }
                if is_overdue(defect, now) {
                    stats.overdue += 1;
                }
                stats
            })
    }
}
