//! defectctl CLI - Track construction defects through a role-gated review workflow

use clap::Parser;
use defectctl::cli::commands;
use defectctl::cli::{Cli, Commands, UserCommands};
use defectctl::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> defectctl::Result<()> {
    let cwd = cli.cwd.as_deref();
    let as_user = cli.as_user;

    match cli.command {
        Some(Commands::Init { force }) => commands::init::run(cwd, force, cli.dry_run).await,
        Some(Commands::User { command }) => match command {
            UserCommands::Add {
                id,
                role,
                email,
                first_name,
                last_name,
            } => {
                commands::user::add(cwd, id, &role, &email, &first_name, &last_name, cli.dry_run)
                    .await
            }
            UserCommands::List { role, json } => {
                commands::user::list(cwd, role.as_deref(), json).await
            }
        },
        Some(Commands::Create {
            title,
            description,
            project,
            priority,
            assignee,
            due,
            json,
        }) => {
            let draft = commands::create::draft_from_args(
                title,
                description,
                project,
                priority.as_deref(),
                assignee,
                due,
            )?;
            commands::create::run(cwd, as_user, draft, json, cli.dry_run).await
        }
        Some(Commands::List {
            status,
            priority,
            project,
            assignee,
            search,
            overdue,
            sort,
            order,
            page,
            per_page,
            json,
        }) => {
            let args = commands::list::ListArgs {
                status,
                priority,
                project,
                assignee,
                search,
                overdue,
                sort,
                order,
                page,
                per_page,
            };
            commands::list::run(cwd, as_user, args, json).await
        }
        Some(Commands::Show { id, json }) => commands::show::run(cwd, as_user, id, json).await,
        Some(Commands::Edit {
            id,
            title,
            description,
            priority,
            assignee,
            unassign,
            due,
            clear_due,
            json,
        }) => {
            let args = commands::edit::EditArgs {
                title,
                description,
                priority,
                assignee,
                unassign,
                due,
                clear_due,
            };
            commands::edit::run(cwd, as_user, id, args, json, cli.dry_run).await
        }
        Some(Commands::Actions { id, json }) => {
            commands::actions::run(cwd, as_user, id, json).await
        }
        Some(Commands::Status {
            id,
            to,
            expect,
            json,
        }) => {
            commands::status::run(cwd, as_user, id, &to, expect.as_deref(), json, cli.dry_run)
                .await
        }
        Some(Commands::Comment { id, text }) => {
            commands::comment::run(cwd, as_user, id, &text, cli.dry_run).await
        }
        Some(Commands::Stats { json }) => commands::stats::run(cwd, as_user, json).await,
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
