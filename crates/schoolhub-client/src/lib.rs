//! # SchoolHub Client
//!
//! Headless model of the teacher's class screen: it fetches the teacher's
//! classes, keeps the screen state and submits homework and class messages
//! through the SchoolHub API. Rendering is left to the caller, which reads
//! the state and the queued [`Alert`]s.
//!
//! - [`api`]: the endpoints the screen calls, and an HTTP implementation
//! - [`screen`]: screen state and user actions
//! - [`session`]: the logged-in user and token, persisted as JSON
//!
//! ```ignore
//! use schoolhub_client::{ClassScreen, HttpClient, Session};
//!
//! let client = HttpClient::new("http://localhost:3000");
//! let session = client.login("mrs.cohen", "secret123").await?;
//! session.save("session.json").await?;
//!
//! let mut screen = ClassScreen::new(client, session);
//! screen.mount().await;
//! ```

pub mod api;
pub mod error;
pub mod screen;
pub mod session;

pub use api::{ClassApi, HttpClient};
pub use error::ClientError;
pub use screen::{Alert, ClassCard, ClassScreen, HomeworkItem};
pub use session::Session;
