//! Accomplishments: aggregation across submissions, display order, and
//! the badge catalogue.

pub mod aggregate;
pub mod catalogue;
pub mod export;
pub mod order;
mod session;

pub use aggregate::{aggregate, newly_earned};
pub use catalogue::{description, icon};
pub use export::format_for_submission;
pub use order::sort_for_display;
pub use session::{PendingFlags, Session, SubmissionOutcome};
