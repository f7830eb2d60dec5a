//! The assistant drawer: a floating launcher, a message list that re-renders
//! as fragments stream in, and the input row. The drawer never talks to the
//! network itself; it only dispatches messages.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::dom_utils;
use crate::messages::Message;
use crate::models::ChatRole;
use crate::state::{dispatch_global_message, AppState, AssistantTurn, APP_STATE};

pub fn setup_chat_drawer(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("chat-launcher").is_some() {
        return Ok(());
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let launcher = document.create_element("button")?;
    launcher.set_id("chat-launcher");
    launcher.set_class_name("chat-launcher");
    launcher.set_text_content(Some("\u{1f4ac}"));
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
            dispatch_global_message(Message::OpenChatDrawer);
        });
        launcher.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    body.append_child(&launcher)?;

    let drawer = document.create_element("div")?;
    drawer.set_id("chat-drawer");
    drawer.set_class_name("chat-drawer");
    dom_utils::hide(&drawer);
    drawer.set_inner_html(
        r#"<div class="chat-header">
            <div class="chat-titles">
                <h3>AI Assistant</h3>
                <p class="chat-subtitle">Ask me anything about your tasks</p>
            </div>
            <button id="chat-close-btn" class="chat-close-btn">&times;</button>
        </div>
        <div id="chat-messages" class="chat-messages"></div>
        <div class="chat-input-area">
            <textarea id="chat-input" class="chat-input" rows="1" placeholder="Type a message..."></textarea>
            <button id="chat-send-btn" class="chat-send-btn">Send</button>
        </div>"#,
    );
    body.append_child(&drawer)?;

    if let Some(close) = document.get_element_by_id("chat-close-btn") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
            dispatch_global_message(Message::CloseChatDrawer);
        });
        close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(send) = document.get_element_by_id("chat-send-btn") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
            send_current_input();
        });
        send.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Enter sends, Shift+Enter keeps the newline.
    if let Some(input) = document.get_element_by_id("chat-input") {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                send_current_input();
            }
        });
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Read the textarea, clear it, and dispatch. The loading check here only
/// decides whether to clear the field; the reducer re-checks before it
/// mutates anything.
fn send_current_input() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let input = dom_utils::html_textarea(&document, "chat-input");
    let text = input.value();
    if text.trim().is_empty() {
        return;
    }

    let is_loading = APP_STATE.with(|state| state.borrow().chat.is_loading);
    if is_loading {
        return;
    }

    input.set_value("");
    dispatch_global_message(Message::SendChatMessage(text));
}

/// Sync the whole drawer from state: visibility, send control, and the
/// message list.
pub fn render_chat_drawer(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let Some(drawer) = document.get_element_by_id("chat-drawer") else {
        return Ok(());
    };

    if state.chat.open {
        dom_utils::show(&drawer);
    } else {
        dom_utils::hide(&drawer);
    }
    if let Some(launcher) = document.get_element_by_id("chat-launcher") {
        if state.chat.open {
            dom_utils::hide(&launcher);
        } else {
            dom_utils::show(&launcher);
        }
    }

    dom_utils::set_button_disabled(document, "chat-send-btn", state.chat.is_loading);

    let Some(list) = document.get_element_by_id("chat-messages") else {
        return Ok(());
    };
    list.set_inner_html("");

    if state.chat.messages.is_empty() {
        let greeting = document.create_element("div")?;
        greeting.set_class_name("chat-greeting");
        greeting.set_inner_html(
            r#"<p class="chat-greeting-title">Hi there! &#x1F44B;</p>
            <p class="chat-greeting-body">I can help you manage tasks, suggest priorities, or answer project questions.</p>"#,
        );
        list.append_child(&greeting)?;
    }

    for msg in &state.chat.messages {
        let bubble = document.create_element("div")?;
        bubble.set_class_name(match msg.role {
            ChatRole::User => "chat-bubble chat-bubble-user",
            ChatRole::Assistant => "chat-bubble chat-bubble-assistant",
        });
        // Streamed content is untrusted; text_content keeps it inert.
        bubble.set_text_content(Some(&msg.content));
        list.append_child(&bubble)?;
    }

    // Waiting for the first fragment: show a typing placeholder until the
    // assistant bubble opens.
    if state.chat.is_loading && state.chat.assistant_turn == AssistantTurn::Closed {
        let typing = document.create_element("div")?;
        typing.set_class_name("chat-bubble chat-bubble-assistant chat-typing");
        typing.set_text_content(Some("\u{2026}"));
        list.append_child(&typing)?;
    }

    // Keep the newest message in view.
    list.set_scroll_top(list.scroll_height());

    Ok(())
}
