//! Executes the side effects reducers hand back. Runs strictly after the
//! state borrow has been released, so executors (and anything they spawn)
//! are free to dispatch again.

use wasm_bindgen_futures::spawn_local;

use crate::messages::{Command, Message};
use crate::network::ChatClient;
use crate::state::dispatch_global_message;

pub fn execute(command: Command) {
    match command {
        Command::SendMessage(msg) => dispatch_global_message(msg),

        Command::UpdateUI(update_fn) => update_fn(),

        Command::StartChatRequest { messages } => {
            spawn_local(async move {
                match ChatClient::stream_completion(&messages).await {
                    Ok(()) => dispatch_global_message(Message::ChatStreamCompleted),
                    Err(reason) => dispatch_global_message(Message::ChatRequestFailed(reason)),
                }
            });
        }
    }
}
