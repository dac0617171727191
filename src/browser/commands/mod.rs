//! # Command System
//!
//! Key events are matched against registered commands; the first command
//! relevant to the current focus turns the key into [`CommandEvent`]s that
//! the controller applies to the ViewModel.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod app;
pub mod context;
pub mod events;
pub mod navigation;
pub mod search;

pub use app::{AppTerminateCommand, QuitCommand};
pub use context::{CommandContext, ViewModelSnapshot};
pub use events::{CommandEvent, PageDirection};
pub use navigation::{
    CloseDetailCommand, DismissErrorCommand, FocusSearchCommand, GridMoveCommand, PageCommand,
    SelectItemCommand,
};
pub use search::{LeaveSearchBarCommand, QueryBackspaceCommand, QueryCharCommand, SubmitSearchCommand};

/// Trait for all commands that process key events
pub trait Command: Send + Sync {
    /// Check if this command should handle the given key in the current context
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Turn the key into the events it requests
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Command name for logging
    fn name(&self) -> &'static str;
}

type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that dispatches key events to the first relevant command
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Application
        self.add_command(Box::new(AppTerminateCommand));

        // Search bar
        self.add_command(Box::new(SubmitSearchCommand));
        self.add_command(Box::new(QueryBackspaceCommand));
        self.add_command(Box::new(LeaveSearchBarCommand));
        self.add_command(Box::new(QueryCharCommand));

        // Overlay
        self.add_command(Box::new(CloseDetailCommand));

        // Grid
        self.add_command(Box::new(DismissErrorCommand));
        self.add_command(Box::new(SelectItemCommand));
        self.add_command(Box::new(FocusSearchCommand));
        self.add_command(Box::new(PageCommand));
        self.add_command(Box::new(GridMoveCommand));
        self.add_command(Box::new(QuitCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process a key event; unhandled keys yield no events
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                return command.execute(event, context);
            }
        }
        Ok(Vec::new())
    }

    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
