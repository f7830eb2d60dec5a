//! A single draggable task card. Cards are throwaway DOM: the board render
//! pass rebuilds them from state, so no per-card bookkeeping is kept.

use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::messages::Message;
use crate::models::Task;
use crate::state::dispatch_global_message;

pub fn create_card(document: &Document, task: &Task, now: DateTime<Utc>) -> Result<Element, JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name(&format!("task-card status-{}", task.status.as_str()));
    card.set_attribute("draggable", "true")?;
    card.set_attribute("data-task-id", &task.id)?;

    // The native drag payload carries the task id as plain text; the
    // column drop handler reads it back out.
    {
        let task_id = task.id.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::DragEvent| {
            if let Some(dt) = event.data_transfer() {
                let _ = dt.set_data("text/plain", &task_id);
                dt.set_effect_allowed("move");
            }
        });
        card.add_event_listener_with_callback("dragstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Header row: relative age on the left, edit/delete on the right.
    let head = document.create_element("div")?;
    head.set_class_name("task-card-head");

    let age = document.create_element("span")?;
    age.set_class_name("task-age");
    age.set_text_content(Some(&crate::utils::time_ago(task.created_at, now)));
    head.append_child(&age)?;

    let actions = document.create_element("div")?;
    actions.set_class_name("task-actions");
    actions.append_child(&action_button(document, "Edit", {
        let task_id = task.id.clone();
        move || dispatch_global_message(Message::StartEditingTask(task_id.clone()))
    })?.into())?;
    let delete_btn = action_button(document, "Delete", {
        let task_id = task.id.clone();
        move || dispatch_global_message(Message::DeleteTask(task_id.clone()))
    })?;
    let _ = delete_btn.class_list().add_1("task-action-delete");
    actions.append_child(&delete_btn)?;
    head.append_child(&actions)?;
    card.append_child(&head)?;

    // Title and description come from user input; text_content keeps them
    // inert.
    let title = document.create_element("h3")?;
    title.set_class_name("task-title");
    title.set_text_content(Some(&task.title));
    card.append_child(&title)?;

    let description = document.create_element("p")?;
    description.set_class_name("task-description");
    description.set_text_content(Some(&task.description));
    card.append_child(&description)?;

    let progress = document.create_element("div")?;
    progress.set_class_name("task-progress");
    progress.set_inner_html(&format!(
        r#"<div class="progress-meta">
            <span class="progress-label">Progress</span>
            <span class="progress-value">{0}%</span>
        </div>
        <div class="progress-track"><div class="progress-fill" style="width: {0}%"></div></div>"#,
        task.progress,
    ));
    card.append_child(&progress)?;

    if !task.tags.is_empty() {
        let tags = document.create_element("div")?;
        tags.set_class_name("task-tags");
        for tag in &task.tags {
            let badge = document.create_element("span")?;
            badge.set_class_name("task-tag");
            badge.set_text_content(Some(tag));
            tags.append_child(&badge)?;
        }
        card.append_child(&tags)?;
    }

    Ok(card)
}

fn action_button(
    document: &Document,
    label: &str,
    on_click: impl FnMut() + 'static,
) -> Result<Element, JsValue> {
    let button = document.create_element("button")?;
    button.set_class_name("task-action-btn");
    button.set_text_content(Some(label));

    let mut on_click = on_click;
    let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
        on_click();
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(button)
}
