pub mod extractor;
pub mod store;

pub use extractor::{ConsoleSession, SESSION_HEADER};
pub use store::{ScreenState, Session, SessionStore};
