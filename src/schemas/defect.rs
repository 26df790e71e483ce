//! Defect schema - The tracked defect and its comments

use serde::{Deserialize, Serialize};

use super::user::{Role, User};

/// Lifecycle status of a defect. Ordering follows the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectStatus {
    /// Reported, not yet triaged
    New,
    /// Work is underway by the assignee
    InProgress,
    /// Fix submitted, awaiting manager review
    Review,
    /// Fix accepted
    Closed,
    /// Rejected by a manager
    Cancelled,
}

impl DefectStatus {
    /// Human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            DefectStatus::New => "New",
            DefectStatus::InProgress => "In progress",
            DefectStatus::Review => "In review",
            DefectStatus::Closed => "Closed",
            DefectStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefectStatus::New => write!(f, "new"),
            DefectStatus::InProgress => write!(f, "in_progress"),
            DefectStatus::Review => write!(f, "review"),
            DefectStatus::Closed => write!(f, "closed"),
            DefectStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for DefectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(DefectStatus::New),
            "in_progress" => Ok(DefectStatus::InProgress),
            "review" => Ok(DefectStatus::Review),
            "closed" => Ok(DefectStatus::Closed),
            "cancelled" => Ok(DefectStatus::Cancelled),
            _ => Err(format!("Unknown defect status: {}", s)),
        }
    }
}

/// Defect priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A comment attached to a defect. Never edited once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Identifier, unique within the owning defect
    pub id: u64,

    /// Author's user id
    pub author_id: u64,

    /// Author's display name at the time of writing
    pub author: String,

    /// Author's role at the time of writing
    pub author_role: Role,

    /// Comment body
    pub text: String,

    /// ISO 8601 creation timestamp
    pub created_at: String,
}

/// A tracked defect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique identifier
    pub id: u64,

    /// Short summary
    pub title: String,

    /// Full description
    pub description: String,

    /// Current lifecycle status
    pub status: DefectStatus,

    /// Priority
    #[serde(default)]
    pub priority: Priority,

    /// Project the defect belongs to
    pub project: String,

    /// Creator's user id
    pub creator_id: u64,

    /// Creator's display name
    pub creator: String,

    /// Assigned engineer (null if unassigned)
    #[serde(default)]
    pub assignee_id: Option<u64>,

    /// ISO 8601 due date (null if none)
    #[serde(default)]
    pub due_date: Option<String>,

    /// ISO 8601 creation timestamp
    pub created_at: String,

    /// ISO 8601 last update timestamp
    pub updated_at: String,

    /// Comments, oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Defect {
    /// Create a new defect in the `new` status, reported by `creator`
    pub fn new(id: u64, title: String, description: String, project: String, creator: &User) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Defect {
            schema_version: 1,
            id,
            title,
            description,
            status: DefectStatus::New,
            priority: Priority::default(),
            project,
            creator_id: creator.id,
            creator: creator.full_name(),
            assignee_id: None,
            due_date: None,
            created_at: now.clone(),
            updated_at: now,
            comments: Vec::new(),
        }
    }

    /// Whether `user_id` is the assignee of this defect
    pub fn is_assignee(&self, user_id: u64) -> bool {
        self.assignee_id == Some(user_id)
    }

    /// Id the next appended comment should take
    pub fn next_comment_id(&self) -> u64 {
        self.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Defect with the given status, updating the timestamp
    pub fn with_status(mut self, status: DefectStatus) -> Self {
        self.status = status;
        self.touch_returning()
    }

    /// Return a new Defect with the given priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Return a new Defect with the given assignee
    pub fn with_assignee(mut self, assignee_id: Option<u64>) -> Self {
        self.assignee_id = assignee_id;
        self
    }

    /// Return a new Defect with the given due date
    pub fn with_due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Return a new Defect with `comment` appended. Status and timestamps are untouched.
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Return a new Defect carrying the editable details of `edited`, updating
    /// the timestamp. Status, authorship and comments stay as they are.
    pub fn with_details_of(mut self, edited: &Defect) -> Self {
        self.title = edited.title.clone();
        self.description = edited.description.clone();
        self.priority = edited.priority;
        self.assignee_id = edited.assignee_id;
        self.due_date = edited.due_date.clone();
        self.touch_returning()
    }

    fn touch_returning(mut self) -> Self {
        self.updated_at = chrono::Utc::now().to_rfc3339();
        self
    }
}
