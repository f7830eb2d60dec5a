use std::cell::RefCell;

use wasm_bindgen::JsValue;

use crate::ids::{IdSource, UuidIds};
use crate::messages::{Command, Message};
use crate::models::{ChatMessage, Task, TaskStatus};
use crate::update::update;

/// Tracks whether the current chat exchange has an assistant message that
/// streamed fragments should append to. Making this explicit (instead of
/// "is the last message an assistant one?") keeps two consecutive assistant
/// replies from merging into a single bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantTurn {
    Closed,
    Open { index: usize },
}

/// Chat drawer state. Messages live only in memory; reloading the page
/// starts a fresh conversation.
pub struct ChatState {
    pub open: bool,
    pub messages: Vec<ChatMessage>,
    /// True while a request is in flight. The send reducer and the send
    /// button both consult this; nothing deeper enforces at-most-one.
    pub is_loading: bool,
    pub assistant_turn: AssistantTurn,
}

impl ChatState {
    fn new() -> Self {
        ChatState {
            open: false,
            messages: Vec::new(),
            is_loading: false,
            assistant_turn: AssistantTurn::Closed,
        }
    }
}

// Store global application state
pub struct AppState {
    /// The authoritative task list. Column views are derived from it on
    /// every render; there is no per-column collection to fall out of sync.
    pub tasks: Vec<Task>,
    /// Set while the task dialog is editing an existing task; `None` means
    /// the dialog (if open) is creating.
    pub editing_task_id: Option<String>,
    pub chat: ChatState,
    ids: Box<dyn IdSource>,
}

impl AppState {
    /// Fresh state with the demo board, as shown on page load.
    pub fn new() -> Self {
        let mut state = AppState::empty(Box::new(UuidIds));
        let now = chrono::Utc::now();
        state.tasks = crate::models::seed_tasks(now, state.ids.as_mut());
        state
    }

    /// Blank state with a caller-supplied id source. Tests inject
    /// `SequentialIds` here so runs are deterministic.
    pub fn empty(ids: Box<dyn IdSource>) -> Self {
        AppState {
            tasks: Vec::new(),
            editing_task_id: None,
            chat: ChatState::new(),
            ids,
        }
    }

    pub fn next_task_id(&mut self) -> String {
        self.ids.next_task_id()
    }

    /// Pure derived view: the tasks belonging to one column, in list order.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Run the update function and hand back the side effects for the
    /// dispatcher to execute once the state borrow has been released.
    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }

    /// Re-render everything that is derived from state. Cheap enough at
    /// this scale to run after every dispatch.
    pub fn refresh_ui_after_state_change() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        APP_STATE.with(|state| {
            let state = state.borrow();
            crate::components::board::render_board(&state, &document)?;
            crate::components::chat_drawer::render_chat_drawer(&state, &document)
        })
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

/// Single entry point for every state mutation: update state, release the
/// borrow, execute the returned commands, then refresh the UI. Commands may
/// dispatch again (via `Command::SendMessage`), which recurses through here
/// with the borrow already dropped.
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| {
        let mut state = state.borrow_mut();
        state.dispatch(msg)
    });

    for command in commands {
        crate::command_executors::execute(command);
    }

    if let Err(e) = AppState::refresh_ui_after_state_change() {
        web_sys::console::warn_1(&format!("Failed to refresh UI after action: {:?}", e).into());
    }
}
