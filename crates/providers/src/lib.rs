pub mod adapter;
pub mod mock;
pub mod types;

pub use adapter::{AnswerService, AnswerServiceFactory, HttpAnswerService};
pub use mock::{MockAnswerService, MockResponse};
pub use types::{AnswerRequest, AnswerRequestFailed, AnswerResponse};

pub use chatbox_core::{Error, Result};
