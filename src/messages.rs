// frontend/src/messages.rs
//
// The events that can occur in the UI, plus the side-effect commands the
// reducers hand back to the dispatcher.
//
use crate::models::{ChatMessage, TaskStatus};

/// Raw form input from the task dialog. Sanitization (trimming, tag
/// splitting, progress clamping) happens in the board reducer so the rules
/// live in one place.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Unparsed contents of the numeric progress field. Empty or
    /// non-integer input stores as 0; integers clamp into 0..=100.
    pub progress: String,
    /// Comma-separated tag list as typed.
    pub tags: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Task board
    OpenCreateTaskModal,
    StartEditingTask(String),            // task id
    CancelTaskModal,
    SubmitTaskForm(TaskDraft),           // create or edit, decided by the editing selection
    DeleteTask(String),                  // task id
    DropTaskOnColumn {
        task_id: String,
        status: TaskStatus,
    },

    // Chat drawer
    OpenChatDrawer,
    CloseChatDrawer,
    SendChatMessage(String),             // raw textarea contents
    ReceiveAssistantFragment(String),    // one streamed content delta
    ChatStreamCompleted,
    ChatRequestFailed(String),           // human-readable reason
}

/// Commands represent side effects that should be executed after state
/// updates. This separates pure state changes from effects like UI updates
/// and network calls.
pub enum Command {
    /// Chain another message to be processed
    SendMessage(Message),

    /// Execute a UI update function after state changes
    UpdateUI(Box<dyn FnOnce() + 'static>),

    /// Kick off the streaming chat request with a history snapshot
    StartChatRequest { messages: Vec<ChatMessage> },
}
