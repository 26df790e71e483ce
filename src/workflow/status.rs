//! Status queries and changes

use serde::Serialize;

use crate::domain::{
    apply_status_transition, available_actions_for, can_view_defect, Actor, StatusAction,
    TransitionRejection, TransitionRequest, TransitionResult,
};
use crate::errors::{DefectError, Result};
use crate::schemas::{Defect, DefectStatus};
use crate::store::{ApplyOutcome, DefectStore};

/// Outcome of a status change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    pub defect_id: u64,
    pub from: DefectStatus,
    pub to: DefectStatus,
    /// True when the change was only evaluated, not written
    pub dry_run: bool,
    pub defect: Defect,
}

fn load_visible<S: DefectStore + ?Sized>(store: &S, defect_id: u64, actor: &Actor) -> Result<Defect> {
    let defect = store.get_defect(defect_id)?;
    if !can_view_defect(&defect, actor) {
        // Same answer as a missing defect, so ids can't be enumerated
        return Err(DefectError::DefectNotFound(defect_id));
    }
    Ok(defect)
}

/// The actions `actor` may take on a defect right now.
pub fn available_actions<S: DefectStore + ?Sized>(
    store: &S,
    defect_id: u64,
    actor: &Actor,
) -> Result<Vec<StatusAction>> {
    let defect = load_visible(store, defect_id, actor)?;
    Ok(available_actions_for(&defect, actor))
}

/// Request `requested` against the status the defect has right now.
///
/// The snapshot is read behind the visibility check, so only a write racing
/// this one can produce a conflict.
pub fn change_status_from_current<S: DefectStore + ?Sized>(
    store: &mut S,
    defect_id: u64,
    requested: DefectStatus,
    actor: &Actor,
    dry_run: bool,
) -> Result<StatusChange> {
    let authoritative = load_visible(&*store, defect_id, actor)?;
    let request = TransitionRequest::new(authoritative.status, requested);
    record_change(store, authoritative, request, actor, dry_run)
}

/// Validate a transition against the authoritative defect and record it.
///
/// Legality is always checked against the status read at application time;
/// the store's compare-and-set then catches a write that lands between that
/// read and this one.
pub fn change_status<S: DefectStore + ?Sized>(
    store: &mut S,
    defect_id: u64,
    request: TransitionRequest,
    actor: &Actor,
    dry_run: bool,
) -> Result<StatusChange> {
    let authoritative = load_visible(&*store, defect_id, actor)?;
    record_change(store, authoritative, request, actor, dry_run)
}

fn record_change<S: DefectStore + ?Sized>(
    store: &mut S,
    authoritative: Defect,
    request: TransitionRequest,
    actor: &Actor,
    dry_run: bool,
) -> Result<StatusChange> {
    let defect_id = authoritative.id;
    let next = match apply_status_transition(&authoritative, request, actor) {
        TransitionResult::Success { next_defect } => next_defect,
        TransitionResult::Rejected { rejection } => {
            tracing::warn!(defect_id, user_id = actor.id, %rejection, "status change rejected");
            return Err(rejection.into());
        }
    };

    let from = authoritative.status;
    let to = next.status;

    if dry_run {
        tracing::info!("[DRY RUN] defect {} {} -> {}", defect_id, from, to);
        return Ok(StatusChange {
            defect_id,
            from,
            to,
            dry_run: true,
            defect: next,
        });
    }

    match store.apply_transition(defect_id, from, to)? {
        ApplyOutcome::Applied(defect) => {
            tracing::info!(defect_id, user_id = actor.id, %from, %to, "status changed");
            Ok(StatusChange {
                defect_id,
                from,
                to,
                dry_run: false,
                defect,
            })
        }
        ApplyOutcome::Conflict { actual } => {
            let rejection = TransitionRejection::Conflict {
                expected: from,
                actual,
            };
            tracing::warn!(defect_id, user_id = actor.id, %rejection, "status change lost a race");
            Err(rejection.into())
        }
    }
}
