//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tp_core::{EventId, TaskId, TaskStatus};

/// Command-line client for the todopeer time tracker.
///
/// Tasks are started, paused and finished here; the time spent on them is
/// recorded as events on the todopeer backend.
#[derive(Debug, Parser)]
#[command(name = "todopeer", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in to your account.
    Login(LoginArgs),

    /// Log out and forget the stored token.
    Logout,

    /// Show the current user and what is running.
    #[command(visible_alias = "me")]
    My(MyArgs),

    /// List tasks.
    #[command(visible_alias = "l")]
    List(ListArgs),

    /// Add a new task.
    #[command(visible_alias = "a")]
    Add(AddArgs),

    /// Update a task.
    #[command(visible_alias = "u")]
    Update(UpdateArgs),

    /// Start a task.
    ///
    /// Without arguments the most recent task of the last two days is
    /// resumed. A numeric argument starts that task id; anything else is
    /// created as a new task and started.
    #[command(visible_alias = "s")]
    Start(StartArgs),

    /// Pause the running task.
    #[command(visible_alias = "p")]
    Pause,

    /// Mark a task as done, optionally describing its last event.
    ///
    /// Without a task id the running task is used. A single non-numeric
    /// argument is taken as the description.
    #[command(visible_alias = "d")]
    Done(DoneArgs),

    /// Delete a task, defaulting to the running one.
    #[command(visible_alias = "dt")]
    Delete(OptionalTaskArgs),

    /// Permanently remove a task, defaulting to the running one.
    #[command(visible_alias = "rm")]
    Remove(OptionalTaskArgs),

    /// Restore a deleted task.
    #[command(visible_alias = "ud")]
    Undelete(TaskArgs),

    /// Show a task and its events, defaulting to the running one.
    #[command(visible_alias = "t")]
    Task(OptionalTaskArgs),

    /// Show the events of a day with a per-task summary.
    Day(DayArgs),

    /// Change the times, description or task of an event.
    ///
    /// Times are `now`, `HH:MM[:SS]`, or `p`/`n` followed by a duration
    /// (`p15m`, `n1h30m`) relative to the event's current value.
    #[command(visible_alias = "ue")]
    UpdateEvent(UpdateEventArgs),

    /// Delete an event, defaulting to the running one.
    #[command(visible_alias = "de")]
    DeleteEvent(OptionalEventArgs),

    /// Permanently remove an event, defaulting to the running one.
    #[command(visible_alias = "re")]
    RemoveEvent(OptionalEventArgs),

    /// Cut a gap out of the running event.
    ///
    /// The running event is ended `<duration>` ago and a new event is
    /// started on the same task.
    #[command(visible_alias = "g")]
    Gap(GapArgs),

    /// Run a pomodoro countdown.
    #[command(visible_alias = "pomo")]
    Pomodoro(PomodoroArgs),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email to log in with; prompted for when absent.
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct MyArgs {
    /// Print the running task's name only, for use in pipelines.
    #[arg(short = 'N', long)]
    pub name_only: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Statuses to include: n (not started), i (doing), d (done), p (paused).
    #[arg(long, value_delimiter = ',', default_values = ["n", "i", "p"])]
    pub status: Vec<TaskStatus>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task name.
    pub name: String,

    /// Task description.
    #[arg(conflicts_with = "desc")]
    pub description: Option<String>,

    /// Task description.
    #[arg(short, long)]
    pub desc: Option<String>,

    /// Due date (YYYY-MM-DD).
    #[arg(short = 'D', long)]
    pub due: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub task_id: TaskId,

    /// New task name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// New task description; an empty string clears it.
    #[arg(short, long)]
    pub desc: Option<String>,

    /// New due date (YYYY-MM-DD).
    #[arg(short = 'D', long)]
    pub due: Option<NaiveDate>,

    /// Mark the task as paused.
    #[arg(short, long)]
    pub pause: bool,
}

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Task id, or the name of a new task.
    pub task: Option<String>,

    /// Description for the new event.
    pub description: Option<String>,

    /// Start this long ago, e.g. 15m.
    #[arg(short, long)]
    pub offset: Option<String>,

    /// Run a 25 minute pomodoro and pause the task afterwards.
    #[arg(short, long)]
    pub pomodoro: bool,
}

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Task id, or the description when it is the only argument.
    pub task: Option<String>,

    /// Description for the task's last event.
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct TaskArgs {
    pub task_id: TaskId,
}

#[derive(Debug, Args)]
pub struct OptionalTaskArgs {
    pub task_id: Option<TaskId>,
}

#[derive(Debug, Args)]
pub struct DayArgs {
    /// `p<n>` for n days ago, `n<n>` for n days ahead, or a date (YYYY-MM-DD).
    pub day: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateEventArgs {
    pub event_id: Option<EventId>,

    /// New start time.
    #[arg(short, long)]
    pub start: Option<String>,

    /// New end time.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Move the times by whole days first: `p<n>` or `n<n>`.
    #[arg(short = 'D', long)]
    pub offset: Option<String>,

    /// New description; an empty string clears it.
    #[arg(short, long)]
    pub desc: Option<String>,

    /// Move the event to another task.
    #[arg(short, long)]
    pub task: Option<TaskId>,
}

#[derive(Debug, Args)]
pub struct OptionalEventArgs {
    pub event_id: Option<EventId>,
}

#[derive(Debug, Args)]
pub struct GapArgs {
    /// Size of the gap, e.g. 20m.
    pub duration: String,

    /// Description for the event being ended.
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct PomodoroArgs {
    /// Length of the pomodoro.
    #[arg(default_value = "25m")]
    pub duration: String,

    /// Count from the start of the running event and pause its task when done.
    #[arg(short, long = "continue")]
    pub continue_running: bool,
}
