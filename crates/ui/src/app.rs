mod event_loop;

use crate::components::{Composer, Header};
use crate::controller::{ChatController, SubmitOutcome, TurnCompletion};
use crate::event_handler::{EventHandler, KeyAction};
use crate::render::TranscriptRenderer;
use crate::state::{AppState, InputState};
use crate::theme::Theme;
use crate::view::TerminalView;
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};
use tokio::sync::mpsc;

/// Terminal chat widget
///
/// Owns the controller and the widget state. Answer requests run as tokio
/// tasks and report back over a channel; only the event loop touches the
/// transcript.
pub struct App {
    controller: ChatController<TerminalView>,
    state: AppState,
    completion_tx: mpsc::UnboundedSender<TurnCompletion>,
    completion_rx: mpsc::UnboundedReceiver<TurnCompletion>,
}

impl App {
    pub fn new(controller: ChatController<TerminalView>) -> Self {
        let mut state = AppState::new(controller.widget().assistant_name.clone());
        state.input = InputState::with_history(controller.transcript().user_messages());
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self { controller, state, completion_tx, completion_rx }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn controller(&self) -> &ChatController<TerminalView> {
        &self.controller
    }

    pub fn should_exit(&self) -> bool {
        self.state.should_exit
    }

    /// Run the widget until the user quits
    pub async fn run(&mut self) -> std::io::Result<()> {
        event_loop::run(self).await
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && let Some(action) = EventHandler::handle_key_event(key, &mut self.state)
        {
            self.handle_key_action(action);
        }
    }

    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::SendMessage { message } => self.send_message(message),
            KeyAction::ToggleOpen => tracing::debug!(open = self.state.open, "widget toggled"),
            KeyAction::Exit => self.state.request_exit(),
        }
    }

    fn send_message(&mut self, message: String) {
        match self.controller.submit(&message) {
            SubmitOutcome::Sent(pending) => {
                self.state.input.add_to_history(message.trim().to_string());
                self.state.clear_notice();
                self.state.open = true;

                let tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    let completion = pending.resolve().await;
                    if tx.send(completion).is_err() {
                        tracing::debug!("widget closed before the answer arrived");
                    }
                });
            }
            SubmitOutcome::Empty => {}
            SubmitOutcome::Busy => {
                self.state.input.buffer = message;
                self.state.input.move_end();
                self.state.set_notice("Still waiting for the previous answer");
            }
        }
    }

    pub fn handle_completion(&mut self, completion: TurnCompletion) {
        if let Err(e) = self.controller.complete(completion) {
            tracing::error!(error = %e, "failed to apply answer");
        }
    }

    /// Resolve a turn whose request task went away without reporting back.
    /// Returns whether the transcript changed.
    pub fn recover_abandoned_turn(&mut self) -> bool {
        self.controller.recover_abandoned_turn()
    }

    /// Receive the next finished turn
    pub async fn next_completion(&mut self) -> Option<TurnCompletion> {
        self.completion_rx.recv().await
    }

    /// Lay out and draw one frame
    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Theme::base()), area);

        let constraints = if self.state.open {
            vec![Constraint::Length(1), Constraint::Min(3), Constraint::Length(Composer::height())]
        } else {
            vec![Constraint::Length(1), Constraint::Min(0), Constraint::Length(Composer::height())]
        };
        let rows = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

        Header::new(&self.state, self.controller.is_awaiting()).render(frame, rows[0]);

        if self.state.open {
            let rendered = self.controller.view().latest();
            TranscriptRenderer::new(rendered, &self.state.assistant_name).render(frame, rows[1]);
        }

        Composer::new(&self.state).render(frame, rows[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbox_core::WidgetConfig;
    use chatbox_providers::{MockAnswerService, MockResponse};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;

    fn create_test_app(responses: Vec<MockResponse>) -> App {
        let service = Arc::new(MockAnswerService::with_responses(responses));
        let widget = WidgetConfig {
            assistant_name: "Helper".to_string(),
            welcome_message: "Welcome".to_string(),
            ..WidgetConfig::default()
        };
        App::new(ChatController::new(service, TerminalView::new(), &widget))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, 16)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| (0..buffer.area.width).map(|x| buffer[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_app_new() {
        let app = create_test_app(vec![]);
        assert_eq!(app.state().assistant_name, "Helper");
        assert_eq!(app.controller().transcript().len(), 1);
        assert!(!app.should_exit());
    }

    #[tokio::test]
    async fn test_enter_submits_and_completion_resolves() {
        let mut app = create_test_app(vec![MockResponse::answer("Hello!")]);

        type_str(&mut app, "Hi");
        press(&mut app, KeyCode::Enter);

        assert!(app.controller().is_awaiting());
        assert_eq!(app.controller().transcript().len(), 3);
        assert_eq!(app.state().input.message_history, vec!["Hi"]);

        let completion = app.next_completion().await.unwrap();
        app.handle_completion(completion);

        assert!(!app.controller().is_awaiting());
        assert_eq!(app.controller().transcript().last().unwrap().text, "Hello!");
    }

    #[tokio::test]
    async fn test_busy_submission_keeps_input() {
        let mut app = create_test_app(vec![MockResponse::Answer { text: "slow".to_string(), delay_ms: 50 }]);

        type_str(&mut app, "one");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "two");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().transcript().len(), 3);
        assert_eq!(app.state().input.buffer, "two");
        assert!(app.state().notice.is_some());

        let completion = app.next_completion().await.unwrap();
        app.handle_completion(completion);
        assert_eq!(app.controller().transcript().last().unwrap().text, "slow");
    }

    #[test]
    fn test_blank_enter_does_nothing() {
        let mut app = create_test_app(vec![]);
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.controller().transcript().len(), 1);
        assert!(!app.controller().is_awaiting());
    }

    #[test]
    fn test_escape_exits() {
        let mut app = create_test_app(vec![]);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_render_open_and_closed() {
        let mut app = create_test_app(vec![]);
        let open = screen(&app);
        assert!(open.contains("Helper [idle]"));
        assert!(open.contains("Welcome"));
        assert!(open.contains("Type a message..."));

        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL)));
        let closed = screen(&app);
        assert!(!closed.contains("Welcome"));
        assert!(closed.contains("[Ctrl-O] open"));
    }

    #[tokio::test]
    async fn test_render_shows_placeholder_newest_first() {
        let mut app = create_test_app(vec![MockResponse::Answer { text: "later".to_string(), delay_ms: 50 }]);
        type_str(&mut app, "Hi");
        press(&mut app, KeyCode::Enter);

        let text = screen(&app);
        assert!(text.contains("[waiting]"));
        let placeholder = text.find('…').unwrap();
        let welcome = text.find("Welcome").unwrap();
        assert!(placeholder < welcome);
    }
}
