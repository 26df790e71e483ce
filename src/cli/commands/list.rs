//! List command - List defects visible to the acting user

use std::path::Path;

use crate::config::load_config;
use crate::domain::{DefectFilter, SortKey, SortOrder};
use crate::errors::Result;
use crate::schemas::{DefectStatus, Priority};
use crate::workflow::{self, ListQuery};

use super::{open_store, parse_arg, print_json, require_actor, summary_line};

/// Raw list arguments as they come off the command line
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub project: Option<String>,
    pub assignee: Option<u64>,
    pub search: Option<String>,
    pub overdue: bool,
    pub sort: String,
    pub order: String,
    pub page: usize,
    pub per_page: Option<usize>,
}

impl ListArgs {
    /// Validate enumerated values and build the query
    pub fn into_query(self) -> Result<ListQuery> {
        let status = self.status.as_deref().map(parse_arg::<DefectStatus>).transpose()?;
        let priority = self.priority.as_deref().map(parse_arg::<Priority>).transpose()?;
        Ok(ListQuery {
            filter: DefectFilter {
                status,
                priority,
                project: self.project,
                assignee_id: self.assignee,
                search: self.search,
                overdue: self.overdue,
            },
            sort: parse_arg::<SortKey>(&self.sort)?,
            order: parse_arg::<SortOrder>(&self.order)?,
            page: self.page,
            per_page: self.per_page,
        })
    }
}

/// List defects
pub async fn run(cwd: Option<&Path>, as_user: Option<u64>, args: ListArgs, json: bool) -> Result<()> {
    let store = open_store(cwd)?;
    let config = load_config(store.root())?;
    let (_, actor) = require_actor(&store, as_user)?;
    let query = args.into_query()?;

    let (defects, page) = workflow::list_defects(&store, &actor, &query, &config)?;

    if json {
        return print_json(&serde_json::json!({
            "defects": defects,
            "pagination": page,
        }));
    }

    if defects.is_empty() {
        println!("No defects found");
        return Ok(());
    }
    for defect in &defects {
        println!("{}", summary_line(defect));
    }
    println!(
        "page {}/{} ({} total)",
        page.current_page,
        page.pages.max(1),
        page.total
    );
    Ok(())
}
