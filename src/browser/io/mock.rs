//! # Mock I/O for Testing
//!
//! Scripted event input and a recording render stream. The render stream
//! is cheap to clone and every clone sees the same recording, so a test can
//! keep a handle after the renderer takes ownership of the stream.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Event stream replaying pre-programmed events
#[derive(Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Queue one key press per character of `text`
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_key(KeyCode::Char(ch));
        }
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.push_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug, Default)]
struct Recording {
    commands: Vec<RenderCommand>,
    /// Bytes written since the last clear
    screen: Vec<u8>,
    raw_mode: bool,
    alternate_screen: bool,
}

/// Render stream that records instead of drawing
#[derive(Clone)]
pub struct MockRenderStream {
    recording: Arc<Mutex<Recording>>,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording::default())),
            terminal_size: size,
        }
    }

    fn recording(&self) -> std::sync::MutexGuard<'_, Recording> {
        // A poisoned recording only means a test already panicked
        self.recording
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.recording().commands.push(command);
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.recording().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.recording().commands.clear();
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.recording().commands.contains(command)
    }

    /// Text written since the last screen clear, escape sequences included
    pub fn get_buffer_string(&self) -> String {
        String::from_utf8_lossy(&self.recording().screen).to_string()
    }

    /// Every byte ever written, escape sequences included
    pub fn get_all_output(&self) -> String {
        let recording = self.recording();
        let bytes: Vec<u8> = recording
            .commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect();
        String::from_utf8_lossy(&bytes).to_string()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.recording().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.recording().alternate_screen
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut recording = self.recording();
        recording.screen.extend_from_slice(buf);
        recording.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::ClearScreen);
        recording.screen.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::EnterAlternateScreen);
        recording.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::LeaveAlternateScreen);
        recording.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::EnableRawMode);
        recording.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::DisableRawMode);
        recording.raw_mode = false;
        Ok(())
    }
}
