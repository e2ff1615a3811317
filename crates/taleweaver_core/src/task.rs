//! Provider task handles.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a provider task.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Queued
    #[display("PENDING")]
    Pending,
    /// Queued behind the account's concurrency limit
    #[display("THROTTLED")]
    Throttled,
    /// Being processed
    #[display("RUNNING")]
    Running,
    /// Finished with output
    #[display("SUCCEEDED")]
    Succeeded,
    /// Finished without output
    #[display("FAILED")]
    Failed,
    /// Cancelled by the account owner
    #[display("CANCELLED")]
    Cancelled,
    /// Any state this client does not know; polled like `Pending`
    #[serde(other)]
    #[display("UNKNOWN")]
    Unknown,
}

impl TaskStatus {
    /// Whether polling should stop.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }
}

/// Snapshot of a provider task as returned by the task-retrieval endpoint.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{GenerationTask, TaskStatus};
///
/// let task: GenerationTask = serde_json::from_str(
///     r#"{"id":"t-1","status":"SUCCEEDED","output":["https://img/1.png"]}"#,
/// ).unwrap();
/// assert_eq!(*task.status(), TaskStatus::Succeeded);
/// assert_eq!(task.first_output(), Some("https://img/1.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTask {
    /// Opaque task identifier
    id: String,
    /// Current status
    status: TaskStatus,
    /// Output URLs, populated on success
    #[serde(default)]
    output: Vec<String>,
    /// Provider failure message, populated on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

impl GenerationTask {
    /// Create a task snapshot.
    pub fn new(id: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            status,
            output: Vec::new(),
            failure: None,
        }
    }

    /// Attach output URLs.
    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = output;
        self
    }

    /// Attach a failure message.
    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failure = Some(failure.into());
        self
    }

    /// First non-empty output URL.
    pub fn first_output(&self) -> Option<&str> {
        self.output
            .first()
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}
