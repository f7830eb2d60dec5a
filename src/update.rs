// frontend/src/update.rs
//
// Routes each message to the reducer that owns it. Reducers mutate state
// and push side effects into `commands`; they never touch the DOM directly.
//
use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    let handled = crate::reducers::board::update(state, &msg, &mut commands)
        || crate::reducers::chat::update(state, &msg, &mut commands);

    if !handled {
        web_sys::console::warn_1(&format!("Unhandled message: {:?}", msg).into());
    }

    commands
}
