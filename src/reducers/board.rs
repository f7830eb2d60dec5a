//! Task-board reducer: create / edit / delete / column-drop, plus the
//! dialog's editing selection. All form input is sanitized here so the
//! board has no error paths downstream.

use crate::messages::{Command, Message, TaskDraft};
use crate::models::{Task, TaskStatus};
use crate::state::AppState;

/// Progress field rule: integers clamp into 0..=100, anything else
/// (empty, fractional, garbage) stores as 0.
pub fn parse_progress(input: &str) -> u8 {
    input
        .trim()
        .parse::<i64>()
        .map(|p| p.clamp(0, 100) as u8)
        .unwrap_or(0)
}

fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns `true` when the message was handled by the board reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::OpenCreateTaskModal => {
            state.editing_task_id = None;
            cmds.push(Command::UpdateUI(Box::new(|| {
                crate::components::task_modal::open_for_create();
            })));
            true
        }

        Message::StartEditingTask(task_id) => {
            let Some(task) = state.task_by_id(task_id).cloned() else {
                // Card was deleted out from under the menu; nothing to edit.
                return true;
            };
            state.editing_task_id = Some(task_id.clone());
            cmds.push(Command::UpdateUI(Box::new(move || {
                crate::components::task_modal::open_for_edit(&task);
            })));
            true
        }

        Message::CancelTaskModal => {
            state.editing_task_id = None;
            cmds.push(Command::UpdateUI(Box::new(|| {
                crate::components::task_modal::close();
            })));
            true
        }

        Message::SubmitTaskForm(draft) => {
            handle_submit(state, draft, cmds);
            true
        }

        Message::DeleteTask(task_id) => {
            state.tasks.retain(|t| t.id != *task_id);
            true
        }

        Message::DropTaskOnColumn { task_id, status } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == *task_id) {
                task.status = *status;
                if *status == TaskStatus::Completed {
                    task.progress = 100;
                }
            }
            true
        }

        _ => false,
    }
}

fn handle_submit(state: &mut AppState, draft: &TaskDraft, cmds: &mut Vec<Command>) {
    let title = draft.title.trim().to_string();
    if title.is_empty() {
        // Keep the dialog open; an empty title is not a task.
        return;
    }

    let description = draft.description.trim().to_string();
    let progress = parse_progress(&draft.progress);
    let tags = parse_tags(&draft.tags);

    match state.editing_task_id.take() {
        Some(editing_id) => {
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == editing_id) {
                task.title = title;
                task.description = description;
                task.status = draft.status;
                task.progress = progress;
                task.tags = tags;
                // id and created_at survive the edit.
            }
        }
        None => {
            let task = Task {
                id: state.next_task_id(),
                title,
                description,
                status: draft.status,
                progress,
                created_at: chrono::Utc::now(),
                tags,
            };
            state.tasks.push(task);
        }
    }

    cmds.push(Command::UpdateUI(Box::new(|| {
        crate::components::task_modal::close();
    })));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use proptest::prelude::*;

    fn empty_state() -> AppState {
        AppState::empty(Box::new(SequentialIds::new()))
    }

    fn draft(title: &str, progress: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: "desc".to_string(),
            status: TaskStatus::Planned,
            progress: progress.to_string(),
            tags: String::new(),
        }
    }

    fn dispatch(state: &mut AppState, msg: Message) -> Vec<Command> {
        let mut cmds = Vec::new();
        assert!(update(state, &msg, &mut cmds), "board reducer must handle");
        cmds
    }

    #[test]
    fn create_appends_with_fresh_id_and_defaults() {
        let mut state = empty_state();
        dispatch(&mut state, Message::SubmitTaskForm(draft("  Ship it  ", "")));

        assert_eq!(state.tasks.len(), 1);
        let task = &state.tasks[0];
        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "Ship it");
        assert_eq!(task.progress, 0);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut state = empty_state();
        dispatch(&mut state, Message::SubmitTaskForm(draft("   ", "50")));
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn tags_split_on_commas_and_drop_empties() {
        let mut state = empty_state();
        let mut d = draft("Tagged", "0");
        d.tags = " Design , , Frontend,".to_string();
        dispatch(&mut state, Message::SubmitTaskForm(d));
        assert_eq!(state.tasks[0].tags, vec!["Design", "Frontend"]);
    }

    #[test]
    fn edit_replaces_matching_task_and_clears_selection() {
        let mut state = empty_state();
        dispatch(&mut state, Message::SubmitTaskForm(draft("Original", "10")));
        dispatch(&mut state, Message::SubmitTaskForm(draft("Bystander", "20")));
        let created_at = state.tasks[0].created_at;

        dispatch(&mut state, Message::StartEditingTask("task-1".to_string()));
        assert_eq!(state.editing_task_id.as_deref(), Some("task-1"));

        let mut d = draft("Renamed", "55");
        d.status = TaskStatus::InProgress;
        dispatch(&mut state, Message::SubmitTaskForm(d));

        assert_eq!(state.editing_task_id, None);
        assert_eq!(state.tasks.len(), 2);
        let edited = state.task_by_id("task-1").unwrap();
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.progress, 55);
        assert_eq!(edited.status, TaskStatus::InProgress);
        assert_eq!(edited.created_at, created_at);
        assert_eq!(state.task_by_id("task-2").unwrap().title, "Bystander");
    }

    #[test]
    fn editing_a_deleted_task_is_a_no_op() {
        let mut state = empty_state();
        dispatch(&mut state, Message::StartEditingTask("task-9".to_string()));
        assert_eq!(state.editing_task_id, None);
    }

    #[test]
    fn delete_removes_exactly_one_preserving_order() {
        let mut state = empty_state();
        for title in ["a", "b", "c"] {
            dispatch(&mut state, Message::SubmitTaskForm(draft(title, "0")));
        }

        dispatch(&mut state, Message::DeleteTask("task-2".to_string()));

        let ids: Vec<&str> = state.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["task-1", "task-3"]);
    }

    #[test]
    fn drop_on_completed_forces_progress_to_100() {
        let mut state = empty_state();
        dispatch(&mut state, Message::SubmitTaskForm(draft("a", "40")));

        dispatch(
            &mut state,
            Message::DropTaskOnColumn {
                task_id: "task-1".to_string(),
                status: TaskStatus::Completed,
            },
        );

        let task = state.task_by_id("task-1").unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.progress, 100);
    }

    #[test]
    fn drop_on_other_columns_leaves_progress_alone() {
        let mut state = empty_state();
        dispatch(&mut state, Message::SubmitTaskForm(draft("a", "40")));

        dispatch(
            &mut state,
            Message::DropTaskOnColumn {
                task_id: "task-1".to_string(),
                status: TaskStatus::InProgress,
            },
        );

        let task = state.task_by_id("task-1").unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.progress, 40);
    }

    #[test]
    fn drop_touches_only_the_named_task() {
        let mut state = empty_state();
        dispatch(&mut state, Message::SubmitTaskForm(draft("a", "10")));
        dispatch(&mut state, Message::SubmitTaskForm(draft("b", "20")));

        dispatch(
            &mut state,
            Message::DropTaskOnColumn {
                task_id: "task-1".to_string(),
                status: TaskStatus::Completed,
            },
        );

        let other = state.task_by_id("task-2").unwrap();
        assert_eq!(other.status, TaskStatus::Planned);
        assert_eq!(other.progress, 20);
    }

    proptest! {
        /// Stored progress equals clamp(p, 0, 100) for any integer input,
        /// and 0 for anything that does not parse as an integer.
        #[test]
        fn progress_clamps_integers(p in -1000i64..2000i64) {
            prop_assert_eq!(parse_progress(&p.to_string()), p.clamp(0, 100) as u8);
        }

        #[test]
        fn progress_defaults_non_integers_to_zero(s in "[a-z.%+ ]{0,8}") {
            if s.trim().parse::<i64>().is_err() {
                prop_assert_eq!(parse_progress(&s), 0);
            }
        }
    }
}
