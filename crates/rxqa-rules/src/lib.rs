//! Detection and validation rules for the prescription form.
//!
//! Every rule is a pure function of the field value, the form snapshot and
//! the [`RuleContext`]. [`RuleEngine`] is the usual entry point.

pub mod calendar;
pub mod context;
pub mod detect;
mod engine;
pub mod limits;
pub mod numeric;
pub mod validate;

pub use calendar::{Age, DateParts};
pub use context::{EngineOptions, RuleContext};
pub use detect::form::{ActiveControl, SubmissionContext};
pub use engine::{FieldViolations, RuleEngine};
pub use limits::{RangeLimits, total_dose_factor};
