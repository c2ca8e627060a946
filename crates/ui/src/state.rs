mod input;

pub use input::InputState;

/// Terminal widget state that is not part of the conversation itself
#[derive(Debug, Clone)]
pub struct AppState {
    /// Name shown in the header and on operator messages
    pub assistant_name: String,
    /// Whether the message panel is expanded
    pub open: bool,
    /// Set when the user asks to quit
    pub should_exit: bool,
    /// Composer input
    pub input: InputState,
    /// Transient status line (e.g. a rejected submission)
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            open: true,
            should_exit: false,
            input: InputState::new(),
            notice: None,
        }
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("Assistant")
    }
}
