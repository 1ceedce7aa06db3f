pub mod attribute;
pub mod diagnosis;
pub mod error;
pub mod record;
pub mod verdict;

pub use attribute::Attribute;
pub use diagnosis::Diagnosis;
pub use error::CoreError;
pub use record::PatientRecord;
pub use verdict::Verdict;
