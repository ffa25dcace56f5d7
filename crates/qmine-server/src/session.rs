//! Per-player session state.

use tracing::debug;

use qmine_miner::{MinerTask, TaskState};
use qmine_world::{Actor, Dimension, PlayerPrefs};

/// Everything the server tracks for one connected player: their saved
/// preferences and at most one running mining task.
pub struct PlayerSession {
    player: String,
    pub prefs: PlayerPrefs,
    task: Option<MinerTask>,
}

impl PlayerSession {
    pub fn new(player: impl Into<String>, prefs: PlayerPrefs) -> Self {
        Self {
            player: player.into(),
            prefs,
            task: None,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn has_active_task(&self) -> bool {
        self.task.is_some()
    }

    /// Adopt a new task. Returns false, dropping the task, when one is
    /// already running.
    pub fn try_start(&mut self, task: MinerTask) -> bool {
        if self.task.is_some() {
            debug!(player = %self.player, "task already running, trigger dropped");
            return false;
        }
        self.task = Some(task);
        true
    }

    /// Advance the running task by one slice, retiring it when done.
    pub fn tick(&mut self, dim: &mut dyn Dimension, actor: &mut dyn Actor) -> Option<TaskState> {
        let task = self.task.as_mut()?;
        let state = task.advance(dim, actor);
        if task.is_finished() {
            self.task = None;
        }
        Some(state)
    }

    /// The session ended: cancel whatever is running. The task's own
    /// cancellation delivers any gathered loot first.
    pub fn destroy(&mut self, dim: &mut dyn Dimension, actor: &mut dyn Actor) {
        if let Some(mut task) = self.task.take() {
            task.cancel(dim, actor);
        }
    }
}
