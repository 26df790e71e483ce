//! Stats command - Dashboard counters

use std::path::Path;

use crate::errors::Result;
use crate::workflow;

use super::{open_store, print_json, require_actor};

pub async fn run(cwd: Option<&Path>, as_user: Option<u64>, json: bool) -> Result<()> {
    let store = open_store(cwd)?;
    let (_, actor) = require_actor(&store, as_user)?;
    let stats = workflow::dashboard(&store, &actor)?;

    if json {
        return print_json(&stats);
    }

    println!("Total defects:  {}", stats.total_defects);
    println!("In progress:    {}", stats.in_progress);
    println!("In review:      {}", stats.in_review);
    println!("Overdue:        {}", stats.overdue);
    println!("High priority:  {}", stats.high_priority);
    println!("Closed:         {}", stats.closed);

    if !stats.projects.is_empty() {
        println!();
        println!("{:<20} {:>6} {:>12} {:>7}", "Project", "Total", "In progress", "Closed");
        for project in &stats.projects {
            println!(
                "{:<20} {:>6} {:>12} {:>7}",
                project.project, project.total_defects, project.in_progress, project.closed
            );
        }
    }
    Ok(())
}
