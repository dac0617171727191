//! # Application Controller
//!
//! Orchestrates the browser: reads terminal events, turns keys into
//! commands, applies command events to the ViewModel, folds catalog
//! completions in and renders whatever the ViewModel reports as changed.

use crate::browser::{
    commands::{CommandContext, CommandEvent, CommandRegistry, PageDirection, ViewModelSnapshot},
    io::{EventStream, RenderStream},
    models::Completion,
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::time::Duration;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The main application controller
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller over injected I/O streams
    pub fn with_io_streams(
        mut view_model: ViewModel,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main loop until a quit is requested
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.view_renderer.render_full(&self.view_model)?;

        let result = self.event_loop().await;

        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(INPUT_POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.handle_event(event)?;
            }
            self.pump()?;

            // Let catalog tasks progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key(key_event)
            }
            Event::Resize(width, height) => {
                self.view_model.update_terminal_size(width, height);
                self.view_renderer.update_size(width, height);
                self.render_pending()
            }
            _ => Ok(()),
        }
    }

    /// Dispatch a key through the command registry and render the result
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));
        let events = self.command_registry.process_event(key_event, &context)?;
        if events.is_empty() {
            return Ok(());
        }

        tracing::debug!("Command events generated: {:?}", events);
        for event in events {
            self.apply_command_event(event);
        }

        if self.should_quit {
            return Ok(());
        }
        self.render_pending()
    }

    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::QueryCharRequested { ch } => self.view_model.insert_query_char(ch),
            CommandEvent::QueryBackspaceRequested => self.view_model.backspace_query(),
            CommandEvent::SearchSubmitRequested => self.view_model.submit_query(),
            CommandEvent::FocusChangeRequested { focus } => self.view_model.set_focus(focus),
            CommandEvent::GridMoveRequested { direction } => {
                self.view_model.move_grid_cursor(direction)
            }
            CommandEvent::ItemSelectRequested => self.view_model.open_highlighted(),
            CommandEvent::DetailCloseRequested => self.view_model.close_overlay(),
            CommandEvent::ErrorDismissRequested => self.view_model.dismiss_error(),
            CommandEvent::PageChangeRequested { direction } => match direction {
                PageDirection::Next => self.view_model.next_page(),
                PageDirection::Previous => self.view_model.previous_page(),
            },
            CommandEvent::QuitRequested => {
                tracing::info!("Quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Apply catalog completions that already arrived and render them
    pub fn pump(&mut self) -> Result<usize> {
        let applied = self.view_model.poll_catalog();
        self.render_pending()?;
        Ok(applied)
    }

    /// Wait for the next catalog completion, apply it and render
    pub async fn wait_for_catalog(&mut self) -> Result<Option<Completion>> {
        let completion = self.view_model.wait_for_catalog().await;
        self.render_pending()?;
        Ok(completion)
    }

    /// Render everything the ViewModel queued since the last render
    pub fn render_pending(&mut self) -> Result<()> {
        for event in self.view_model.collect_pending_view_events() {
            self.view_renderer.handle_view_event(&event, &self.view_model)?;
        }
        Ok(())
    }

    /// Redraw the whole screen
    pub fn render_full(&mut self) -> Result<()> {
        self.view_model.collect_pending_view_events();
        self.view_renderer.render_full(&self.view_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::events::Focus;
    use crate::browser::io::{MockEventStream, MockRenderStream};
    use crate::catalog::mock::{sample_item, sample_page};
    use crate::catalog::{CatalogClient, ImageResolver, MockCatalog};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;

    fn controller(
        catalog: MockCatalog,
        events: MockEventStream,
    ) -> (AppController<MockEventStream, MockRenderStream>, MockRenderStream) {
        let client: Arc<dyn CatalogClient> = Arc::new(catalog);
        let view_model = ViewModel::new(client, ImageResolver::default());
        let stream = MockRenderStream::with_size((90, 30));
        let controller = AppController::with_io_streams(view_model, events, stream.clone()).unwrap();
        (controller, stream)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn controller_should_adopt_render_stream_size() {
        let (controller, _) = controller(MockCatalog::new(), MockEventStream::empty());
        assert_eq!(controller.view_model().terminal_size(), (90, 30));
        assert_eq!(controller.view_model().grid_columns(), 3);
    }

    #[tokio::test]
    async fn typing_and_enter_should_search() {
        let catalog =
            MockCatalog::new().with_search_page("up", sample_page(vec![sample_item(1, "Up")]));
        let (mut controller, stream) = controller(catalog, MockEventStream::empty());

        controller.handle_key(press(KeyCode::Char('u'))).unwrap();
        controller.handle_key(press(KeyCode::Char('p'))).unwrap();
        assert_eq!(controller.view_model().query_input(), "up");

        controller.handle_key(press(KeyCode::Enter)).unwrap();
        assert!(controller.view_model().state().is_searching());

        controller.wait_for_catalog().await.unwrap();
        assert_eq!(controller.view_model().state().results().len(), 1);
        assert_eq!(controller.view_model().focus(), Focus::Grid);
        assert!(stream.get_all_output().contains("Found 1 movies."));
    }

    #[tokio::test]
    async fn run_should_stop_on_ctrl_c_and_restore_terminal() {
        let mut events = MockEventStream::empty();
        events.push_text("x");
        events.push_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        let (mut controller, stream) = controller(MockCatalog::new(), events);

        controller.run().await.unwrap();

        assert!(controller.should_quit());
        assert_eq!(controller.view_model().query_input(), "x");
        assert!(!stream.is_raw_mode());
        assert!(!stream.is_alternate_screen());
    }

    #[test]
    fn resize_should_update_grid_columns() {
        let (mut controller, _) = controller(MockCatalog::new(), MockEventStream::empty());

        controller.handle_event(Event::Resize(150, 40)).unwrap();

        assert_eq!(controller.view_model().grid_columns(), 5);
        assert_eq!(controller.view_model().terminal_size(), (150, 40));
    }
}
