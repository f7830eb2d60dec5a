//! The board page: header with the create button, plus one drop-target
//! column per task status. Columns are static DOM; the cards inside them
//! are rebuilt from state on every render.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::messages::Message;
use crate::models::{TaskStatus, COLUMN_ORDER};
use crate::state::{dispatch_global_message, AppState};

pub fn setup_board(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("board-root").is_some() {
        return Ok(());
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let root = document.create_element("div")?;
    root.set_id("board-root");
    root.set_class_name("board-root");

    // Header with the page title and the create button.
    let header = document.create_element("header")?;
    header.set_id("board-header");
    header.set_class_name("board-header");
    header.set_inner_html(
        r#"<div class="board-heading">
            <h1>Project Board</h1>
            <p class="board-subtitle">Manage your tasks with ease</p>
        </div>"#,
    );

    let create_btn = document.create_element("button")?;
    create_btn.set_id("create-task-btn");
    create_btn.set_class_name("primary-button");
    create_btn.set_text_content(Some("+ Create Task"));
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::MouseEvent| {
            dispatch_global_message(Message::OpenCreateTaskModal);
        });
        create_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    header.append_child(&create_btn)?;
    root.append_child(&header)?;

    let columns = document.create_element("main")?;
    columns.set_id("board-columns");
    columns.set_class_name("board-columns");
    for status in COLUMN_ORDER {
        columns.append_child(&create_column(document, status)?.into())?;
    }
    root.append_child(&columns)?;

    body.append_child(&root)?;
    Ok(())
}

/// One column: heading (dot, label, live count) and the drop-target list.
fn create_column(document: &Document, status: TaskStatus) -> Result<Element, JsValue> {
    let column = document.create_element("div")?;
    column.set_id(&format!("column-{}", status.as_str()));
    column.set_class_name("column-wrap");

    let head = document.create_element("div")?;
    head.set_class_name("column-header");
    head.set_inner_html(&format!(
        r#"<span class="column-dot column-dot-{0}"></span>
        <h2>{1}</h2>
        <span id="column-count-{0}" class="column-count">0</span>"#,
        status.as_str(),
        status.label(),
    ));
    column.append_child(&head)?;

    let list = document.create_element("div")?;
    list.set_id(&format!("column-list-{}", status.as_str()));
    list.set_class_name("column-list");

    // dragover must be cancelled or the browser never fires drop.
    {
        let list_el = list.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::DragEvent| {
            event.prevent_default();
            let _ = list_el.class_list().add_1("drag-over");
        });
        list.add_event_listener_with_callback("dragover", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let list_el = list.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::DragEvent| {
            let _ = list_el.class_list().remove_1("drag-over");
        });
        list.add_event_listener_with_callback("dragleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let list_el = list.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::DragEvent| {
            event.prevent_default();
            let _ = list_el.class_list().remove_1("drag-over");

            // The card put its task id into the native drag payload.
            let task_id = event
                .data_transfer()
                .and_then(|dt| dt.get_data("text/plain").ok())
                .unwrap_or_default();
            if !task_id.is_empty() {
                dispatch_global_message(Message::DropTaskOnColumn { task_id, status });
            }
        });
        list.add_event_listener_with_callback("drop", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    column.append_child(&list)?;
    Ok(column)
}

/// Rebuild every column from the authoritative task list.
pub fn render_board(state: &AppState, document: &Document) -> Result<(), JsValue> {
    let now = chrono::Utc::now();

    for status in COLUMN_ORDER {
        let tasks = state.tasks_by_status(status);

        if let Some(count) = document.get_element_by_id(&format!("column-count-{}", status.as_str()))
        {
            count.set_text_content(Some(&tasks.len().to_string()));
        }

        let Some(list) = document.get_element_by_id(&format!("column-list-{}", status.as_str()))
        else {
            continue;
        };
        list.set_inner_html("");

        if tasks.is_empty() {
            let placeholder = document.create_element("div")?;
            placeholder.set_class_name("column-placeholder");
            placeholder.set_text_content(Some("Drop tasks here"));
            list.append_child(&placeholder)?;
            continue;
        }

        for task in tasks {
            list.append_child(&super::task_card::create_card(document, task, now)?.into())?;
        }
    }

    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn setup_creates_one_drop_target_per_column() {
        let document = web_sys::window().unwrap().document().unwrap();
        setup_board(&document).unwrap();
        for status in COLUMN_ORDER {
            assert!(document
                .get_element_by_id(&format!("column-list-{}", status.as_str()))
                .is_some());
        }
    }
}
