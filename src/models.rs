use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The three board columns a task can live in.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Planned,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Stable string form used for DOM ids, CSS class suffixes, the status
    /// `<select>` values and the drag/drop round trip.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Planned => "planned",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<TaskStatus> {
        match value {
            "planned" => Some(TaskStatus::Planned),
            "in-progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Planned => "Planned",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Column render order. Display grouping is always derived from the task
/// list with `AppState::tasks_by_status`; columns own no task state.
pub const COLUMN_ORDER: [TaskStatus; 3] = [
    TaskStatus::Planned,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

/// A single card on the board.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Percent complete, always within 0..=100. Forced to 100 when a column
    /// drop moves the task to `Completed`.
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

/// Who authored a chat message.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the assistant conversation. The newest assistant entry is
/// mutated in place while its response streams in.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Demo tasks shown on a fresh page load. There is no persistence, so this
/// is the whole universe until the user starts editing.
pub fn seed_tasks(now: DateTime<Utc>, ids: &mut dyn crate::ids::IdSource) -> Vec<Task> {
    let day = |n: i64| now - Duration::days(n);

    let seeds: [(&str, &str, TaskStatus, u8, i64, &[&str]); 6] = [
        (
            "Design the landing page",
            "Create wireframes and high-fidelity mockups for the new landing page",
            TaskStatus::Planned,
            0,
            2,
            &["Design"],
        ),
        (
            "Set up CI/CD pipeline",
            "Configure GitHub Actions for automated testing and deployment",
            TaskStatus::Planned,
            15,
            1,
            &["DevOps"],
        ),
        (
            "Build authentication flow",
            "Implement login, signup, and password reset with email verification",
            TaskStatus::InProgress,
            60,
            3,
            &["Backend"],
        ),
        (
            "Write API documentation",
            "Document all REST endpoints with examples and response schemas",
            TaskStatus::InProgress,
            35,
            4,
            &["Docs"],
        ),
        (
            "Optimize database queries",
            "Identify and fix slow queries, add proper indexes",
            TaskStatus::Completed,
            100,
            5,
            &["Backend"],
        ),
        (
            "Mobile responsive audit",
            "Test and fix layout issues across all mobile breakpoints",
            TaskStatus::Completed,
            100,
            6,
            &["Frontend"],
        ),
    ];

    seeds.iter()
        .map(|(title, description, status, progress, days_ago, tags)| Task {
            id: ids.next_task_id(),
            title: (*title).to_string(),
            description: (*description).to_string(),
            status: *status,
            progress: *progress,
            created_at: day(*days_ago),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in COLUMN_ORDER {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("archived"), None);
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn seed_tasks_cover_every_column() {
        let mut ids = crate::ids::SequentialIds::new();
        let tasks = seed_tasks(Utc::now(), &mut ids);
        assert_eq!(tasks.len(), 6);
        for status in COLUMN_ORDER {
            assert!(tasks.iter().any(|t| t.status == status));
        }
        // Completed seeds respect the progress invariant.
        assert!(tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .all(|t| t.progress == 100));
    }
}
