//! Chat-drawer reducer: the send flow, streamed fragment application, and
//! failure surfacing. The assistant turn is tracked explicitly so fragments
//! of one response always land in one bubble and two responses never merge.

use crate::messages::{Command, Message};
use crate::models::ChatMessage;
use crate::state::{AppState, AssistantTurn};

const FALLBACK_ERROR: &str = "Something went wrong. Please try again.";

/// Returns `true` when the message was handled by the chat reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::OpenChatDrawer => {
            state.chat.open = true;
            true
        }

        Message::CloseChatDrawer => {
            // No cancellation: an in-flight stream keeps applying fragments
            // behind the closed drawer.
            state.chat.open = false;
            true
        }

        Message::SendChatMessage(raw) => {
            let text = raw.trim();
            if text.is_empty() || state.chat.is_loading {
                return true;
            }

            state.chat.assistant_turn = AssistantTurn::Closed;
            state.chat.messages.push(ChatMessage::user(text));
            state.chat.is_loading = true;

            cmds.push(Command::StartChatRequest {
                messages: state.chat.messages.clone(),
            });
            true
        }

        Message::ReceiveAssistantFragment(delta) => {
            apply_fragment(state, delta);
            true
        }

        Message::ChatStreamCompleted => {
            state.chat.assistant_turn = AssistantTurn::Closed;
            state.chat.is_loading = false;
            true
        }

        Message::ChatRequestFailed(reason) => {
            let reason = if reason.is_empty() {
                FALLBACK_ERROR
            } else {
                reason.as_str()
            };
            state
                .chat
                .messages
                .push(ChatMessage::assistant(format!("\u{26a0}\u{fe0f} {}", reason)));
            state.chat.assistant_turn = AssistantTurn::Closed;
            state.chat.is_loading = false;
            true
        }

        _ => false,
    }
}

/// First fragment of an exchange opens a new assistant message; later
/// fragments append to it in place.
fn apply_fragment(state: &mut AppState, delta: &str) {
    match state.chat.assistant_turn {
        AssistantTurn::Open { index } if index < state.chat.messages.len() => {
            state.chat.messages[index].content.push_str(delta);
        }
        _ => {
            state.chat.messages.push(ChatMessage::assistant(delta));
            state.chat.assistant_turn = AssistantTurn::Open {
                index: state.chat.messages.len() - 1,
            };
        }
    }
}
