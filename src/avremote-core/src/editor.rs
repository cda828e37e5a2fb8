use crate::command::PluginCustomCommand;

/// Terminal outcome of a custom-command editor handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Saved(PluginCustomCommand),
    Cancelled,
}

/// Modal add/edit handshake for custom commands.
///
/// The host hands in an existing record to edit, or nothing to create one.
/// The outcome starts out [`EditorOutcome::Cancelled`], so a session
/// dismissed by any means other than an explicit [`EditorSession::save`]
/// (back navigation, process death) finishes as a safe no-op.
#[derive(Debug)]
pub struct EditorSession {
    plugin_unique_id: String,
    command: PluginCustomCommand,
    editing: bool,
    outcome: EditorOutcome,
}

impl EditorSession {
    /// Start a session creating a new command.
    pub fn create(plugin_unique_id: impl Into<String>) -> Self {
        Self {
            plugin_unique_id: plugin_unique_id.into(),
            command: PluginCustomCommand::default(),
            editing: false,
            outcome: EditorOutcome::Cancelled,
        }
    }

    /// Start a session editing an existing command.
    pub fn edit(plugin_unique_id: impl Into<String>, command: PluginCustomCommand) -> Self {
        Self {
            plugin_unique_id: plugin_unique_id.into(),
            command,
            editing: true,
            outcome: EditorOutcome::Cancelled,
        }
    }

    /// Build a session from the optional record the host passed along:
    /// present means edit, absent means create.
    pub fn from_request(
        plugin_unique_id: impl Into<String>,
        command: Option<PluginCustomCommand>,
    ) -> Self {
        match command {
            Some(command) => Self::edit(plugin_unique_id, command),
            None => Self::create(plugin_unique_id),
        }
    }

    /// True when the session edits an existing command.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The command being edited, or the default record when creating.
    pub fn command(&self) -> &PluginCustomCommand {
        &self.command
    }

    /// Record the result. `source` is forced to the owning plugin's unique
    /// id; whatever the editor surface put there is overwritten.
    pub fn save(&mut self, mut command: PluginCustomCommand) {
        command.source = self.plugin_unique_id.clone();
        self.outcome = EditorOutcome::Saved(command);
    }

    /// Discard any result recorded so far.
    pub fn cancel(&mut self) {
        self.outcome = EditorOutcome::Cancelled;
    }

    /// Complete the handshake. Terminal on either outcome.
    pub fn finish(self) -> EditorOutcome {
        self.outcome
    }
}
