pub mod app;
pub mod components;
pub mod controller;
pub mod event_handler;
pub mod render;
pub mod state;
pub mod theme;
pub mod view;

pub use app::App;
pub use controller::{ChatController, PendingTurn, SubmitOutcome, TurnCompletion, TurnState};
pub use event_handler::{EventHandler, KeyAction};
pub use render::{MessageRole, RenderedMessage, RenderedTranscript, Segment, TranscriptRenderer};
pub use state::{AppState, InputState};
pub use theme::Theme;
pub use view::{ChatView, RecordingView, TerminalView};
