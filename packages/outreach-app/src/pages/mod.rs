//! One module per view of the query flow

pub mod capture;
pub mod history;
pub mod process;
pub mod results;

pub use capture::{CaptureOutcome, QueryCapture};
pub use history::QueryHistory;
pub use process::{ExtractionMode, ExtractionStage, ProcessOutcome};
pub use results::{EmailOutcome, ResultsPresenter};
