//! Append-only comments

use thiserror::Error;

use crate::schemas::{Comment, Defect, User};

use super::permissions::can_comment;

/// Why a comment was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentRejection {
    #[error("observers may not comment")]
    Unauthorized,

    #[error("comment text is required")]
    EmptyText,
}

/// Pure function that appends a comment from `author` to `defect`.
///
/// Allowed in every status, terminal ones included. Neither the status nor
/// `updated_at` changes, and existing comments are left as they are.
pub fn append_comment(defect: &Defect, author: &User, text: &str) -> Result<Defect, CommentRejection> {
    if !can_comment(author.role) {
        return Err(CommentRejection::Unauthorized);
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(CommentRejection::EmptyText);
    }

    let comment = Comment {
        id: defect.next_comment_id(),
        author_id: author.id,
        author: author.full_name(),
        author_role: author.role,
        text: text.to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    Ok(defect.clone().with_comment(comment))
}
