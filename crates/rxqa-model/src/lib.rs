pub mod error;
pub mod field;
pub mod medication;
pub mod tag;
pub mod violation;

pub use error::{ModelError, Result};
pub use field::{FieldName, FormValues};
pub use medication::Medication;
pub use tag::{DetectionTag, FieldTags, Pattern, TagSet};
pub use violation::{Bound, Violation};
