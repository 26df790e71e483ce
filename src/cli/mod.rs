//! CLI module for defectctl
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// defectctl - Track construction defects through a role-gated review workflow
#[derive(Parser, Debug)]
#[command(name = "defectctl")]
#[command(version)]
#[command(about = "Track defects through a role-gated review workflow")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Act as this user id
    #[arg(long = "as", global = true, env = "DEFECTCTL_USER", value_name = "USER_ID")]
    pub as_user: Option<u64>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Evaluate changes without writing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a .defectctl workspace in the current directory
    Init {
        /// Re-initialize even if .defectctl already exists
        #[arg(long)]
        force: bool,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Report a new defect
    Create {
        /// Short summary
        #[arg(long)]
        title: String,

        /// Full description
        #[arg(long)]
        description: String,

        /// Project name
        #[arg(long)]
        project: String,

        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Engineer to assign
        #[arg(long)]
        assignee: Option<u64>,

        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List defects visible to you
    List {
        /// Filter by status (new, in_progress, review, closed, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// Filter by priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Filter by project name
        #[arg(long)]
        project: Option<String>,

        /// Filter by assignee id
        #[arg(long)]
        assignee: Option<u64>,

        /// Case-insensitive text in title or description
        #[arg(long)]
        search: Option<String>,

        /// Only overdue defects
        #[arg(long)]
        overdue: bool,

        /// Sort key (created_at, updated_at, due_date, priority, status, title)
        #[arg(long, default_value = "created_at")]
        sort: String,

        /// Sort order (asc, desc)
        #[arg(long, default_value = "desc")]
        order: String,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Items per page (capped by config)
        #[arg(long)]
        per_page: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a defect with its comments
    Show {
        /// Defect id
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a defect's title, description, priority, assignee or due date
    Edit {
        /// Defect id
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,

        /// Engineer to assign
        #[arg(long, conflicts_with = "unassign")]
        assignee: Option<u64>,

        /// Remove the assignee
        #[arg(long)]
        unassign: bool,

        /// Due date (RFC 3339)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the status changes you may make on a defect
    Actions {
        /// Defect id
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a defect to a new status
    Status {
        /// Defect id
        id: u64,

        /// Requested status
        to: String,

        /// Status you last saw; the change is refused if it has moved on
        #[arg(long)]
        expect: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a comment to a defect
    Comment {
        /// Defect id
        id: u64,

        /// Comment text
        text: String,
    },

    /// Show dashboard counters
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a user
    Add {
        /// User id
        id: u64,

        /// Role (manager, engineer, observer)
        #[arg(long)]
        role: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,
    },

    /// List registered users
    List {
        /// Only users with this role (manager, engineer, observer)
        #[arg(long)]
        role: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_status_command() {
        let cli = Cli::parse_from([
            "defectctl", "--as", "2", "status", "7", "review", "--expect", "in_progress",
        ]);
        assert_eq!(cli.as_user, Some(2));
        match cli.command {
            Some(Commands::Status { id, to, expect, json }) => {
                assert_eq!(id, 7);
                assert_eq!(to, "review");
                assert_eq!(expect.as_deref(), Some("in_progress"));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_list_defaults() {
        let cli = Cli::parse_from(["defectctl", "list"]);
        match cli.command {
            Some(Commands::List { sort, order, page, per_page, .. }) => {
                assert_eq!(sort, "created_at");
                assert_eq!(order, "desc");
                assert_eq!(page, 1);
                assert!(per_page.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["defectctl", "stats", "--as", "1", "--dry-run", "-v"]);
        assert_eq!(cli.as_user, Some(1));
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parses_edit_command() {
        let cli = Cli::parse_from([
            "defectctl", "edit", "4", "--priority", "low", "--unassign", "--due", "2030-01-01T00:00:00Z",
        ]);
        match cli.command {
            Some(Commands::Edit { id, priority, unassign, due, assignee, clear_due, .. }) => {
                assert_eq!(id, 4);
                assert_eq!(priority.as_deref(), Some("low"));
                assert!(unassign);
                assert!(assignee.is_none());
                assert!(!clear_due);
                assert!(due.is_some());
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let conflicting = Cli::try_parse_from(["defectctl", "edit", "4", "--assignee", "2", "--unassign"]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn test_cli_user_list_role() {
        let cli = Cli::parse_from(["defectctl", "user", "list", "--role", "engineer"]);
        match cli.command {
            Some(Commands::User { command: UserCommands::List { role, json } }) => {
                assert_eq!(role.as_deref(), Some("engineer"));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
