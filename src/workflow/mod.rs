//! Workflow operations
//!
//! Each operation reads authoritative records from a [`DefectStore`],
//! runs the domain rules against them and records the outcome. Identity is
//! always an explicit [`Actor`]; nothing here consults session state.

mod comments;
mod defects;
mod status;

pub use comments::add_comment;
pub use defects::{
    create_defect, dashboard, edit_defect, list_defects, show_defect, DefectEdit, ListQuery,
    NewDefect,
};
pub use status::{available_actions, change_status, change_status_from_current, StatusChange};

use crate::domain::Actor;
use crate::errors::Result;
use crate::schemas::User;
use crate::store::DefectStore;

/// Look up the acting user and build the actor passed to every rule.
pub fn resolve_actor<S: DefectStore + ?Sized>(store: &S, user_id: u64) -> Result<(User, Actor)> {
    let user = store.get_user(user_id)?;
    let actor = Actor::from(&user);
    tracing::debug!(user_id, role = %actor.role, "resolved actor");
    Ok((user, actor))
}
