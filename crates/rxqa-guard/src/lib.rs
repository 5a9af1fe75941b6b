//! Edge collaborators of the prescription form: access tokens, access
//! windows and tamper-evident session storage.

pub mod checksum;
pub mod error;
pub mod store;
pub mod token;
pub mod window;

pub use checksum::ChecksumPackage;
pub use error::{GuardError, Result};
pub use store::{Loaded, SessionStore};
pub use token::{AccessToken, access_link};
pub use window::{AccessWindow, WindowStatus, format_wait};
