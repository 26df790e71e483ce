//! User command - Register and list users

use std::path::Path;

use crate::errors::Result;
use crate::schemas::{Role, User};
use crate::store::DefectStore;

use super::{open_store, parse_arg, print_json};

/// Register a user
pub async fn add(
    cwd: Option<&Path>,
    id: u64,
    role: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    dry_run: bool,
) -> Result<()> {
    let mut store = open_store(cwd)?;
    let role: Role = parse_arg(role)?;
    let user = User::new(id, email, first_name, last_name, role);

    if dry_run {
        tracing::info!("[DRY RUN] would add {} ({}) as {}", user.full_name(), user.id, role);
        return Ok(());
    }

    store.add_user(user)?;
    tracing::info!(user_id = id, %role, "user added");
    Ok(())
}

/// List registered users, optionally only those with `role`
pub async fn list(cwd: Option<&Path>, role: Option<&str>, json: bool) -> Result<()> {
    let store = open_store(cwd)?;
    let role = role.map(parse_arg::<Role>).transpose()?;
    let users: Vec<User> = store
        .list_users()?
        .into_iter()
        .filter(|u| role.map_or(true, |r| u.role == r))
        .collect();

    if json {
        return print_json(&users);
    }

    for user in &users {
        println!("{:<5} {:<9} {:<24} {}", user.id, user.role.label(), user.full_name(), user.email);
    }
    Ok(())
}
