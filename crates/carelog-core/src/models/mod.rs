pub mod analysis;
pub mod record;
pub mod user;

pub use analysis::{AnalysisOutcome, ReportAnalysis};
pub use record::{Record, RecordResponse};
pub use user::User;
