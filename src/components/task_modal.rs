//! The create / edit task dialog. One form serves both modes; the board
//! reducer decides which operation runs based on the editing selection, so
//! this component only reads fields and dispatches the raw draft.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::dom_utils;
use crate::messages::{Message, TaskDraft};
use crate::models::{Task, TaskStatus};
use crate::state::dispatch_global_message;

use super::modal;

const MODAL_ID: &str = "task-modal";

pub fn setup_task_modal(document: &Document) -> Result<(), JsValue> {
    let (_backdrop, content) = modal::ensure_modal(document, MODAL_ID)?;
    if content.child_element_count() > 0 {
        return Ok(());
    }

    content.set_inner_html(
        r#"<h2 id="task-modal-title">Create Task</h2>
        <form id="task-form">
            <label for="task-title-input">Title</label>
            <input id="task-title-input" type="text" placeholder="Enter task title..." autofocus>
            <label for="task-description-input">Description</label>
            <textarea id="task-description-input" rows="3" placeholder="Describe the task..."></textarea>
            <div class="form-row">
                <div>
                    <label for="task-status-select">Status</label>
                    <select id="task-status-select">
                        <option value="planned">Planned</option>
                        <option value="in-progress">In Progress</option>
                        <option value="completed">Completed</option>
                    </select>
                </div>
                <div>
                    <label for="task-progress-input">Progress (%)</label>
                    <input id="task-progress-input" type="number" min="0" max="100" value="0">
                </div>
            </div>
            <label for="task-tags-input">Tags (comma-separated)</label>
            <input id="task-tags-input" type="text" placeholder="e.g. Design, Frontend">
            <div class="form-buttons">
                <button type="button" id="task-cancel-btn">Cancel</button>
                <button type="submit" id="task-submit-btn">Create Task</button>
            </div>
        </form>"#,
    );

    if let Some(form) = document.get_element_by_id("task-form") {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            dispatch_global_message(Message::SubmitTaskForm(read_draft(&document)));
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    if let Some(cancel) = document.get_element_by_id("task-cancel-btn") {
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
            dispatch_global_message(Message::CancelTaskModal);
        });
        cancel.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn read_draft(document: &Document) -> TaskDraft {
    TaskDraft {
        title: dom_utils::html_input(document, "task-title-input").value(),
        description: dom_utils::html_textarea(document, "task-description-input").value(),
        status: TaskStatus::parse(&dom_utils::html_select(document, "task-status-select").value())
            .unwrap_or(TaskStatus::Planned),
        progress: dom_utils::html_input(document, "task-progress-input").value(),
        tags: dom_utils::html_input(document, "task-tags-input").value(),
    }
}

/// Open in create mode with a blank form.
pub fn open_for_create() {
    open_with(
        "Create Task",
        "Create Task",
        "",
        "",
        TaskStatus::Planned,
        "0",
        "",
    );
}

/// Open in edit mode, prefilled from the task being edited.
pub fn open_for_edit(task: &Task) {
    open_with(
        "Edit Task",
        "Save Changes",
        &task.title,
        &task.description,
        task.status,
        &task.progress.to_string(),
        &task.tags.join(", "),
    );
}

pub fn close() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(backdrop) = document.get_element_by_id(MODAL_ID) {
        modal::hide(&backdrop);
    }
}

fn open_with(
    heading: &str,
    submit_label: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    progress: &str,
    tags: &str,
) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(backdrop) = document.get_element_by_id(MODAL_ID) else {
        return;
    };

    if let Some(el) = document.get_element_by_id("task-modal-title") {
        el.set_text_content(Some(heading));
    }
    if let Some(el) = document.get_element_by_id("task-submit-btn") {
        el.set_text_content(Some(submit_label));
    }

    dom_utils::html_input(&document, "task-title-input").set_value(title);
    dom_utils::html_textarea(&document, "task-description-input").set_value(description);
    dom_utils::html_select(&document, "task-status-select").set_value(status.as_str());
    dom_utils::html_input(&document, "task-progress-input").set_value(progress);
    dom_utils::html_input(&document, "task-tags-input").set_value(tags);

    modal::show(&backdrop);

    let _ = dom_utils::html_input(&document, "task-title-input").focus();
}
