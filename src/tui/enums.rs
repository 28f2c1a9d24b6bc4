//! Enumerations for dashboard state management.

/// Which screen the dashboard is showing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TaskList,
    TaskDetail,
    AddTask,
    EditTask,
    AddSubTask,
    RenameSubTask,
    Help,
    Confirm,
}

/// A destructive action waiting for y/n.
#[derive(Clone, PartialEq, Debug)]
pub enum PendingAction {
    DeleteTask(String),
    DeleteSubTask { task_id: String, sub_task_id: String },
}
