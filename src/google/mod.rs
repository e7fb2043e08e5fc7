//! Google Calendar: OAuth credentials, cached session and the calendar source.

mod credentials;
mod session;
mod source;

pub use credentials::Credentials;
pub use session::Session;
pub use source::GoogleCalendar;
