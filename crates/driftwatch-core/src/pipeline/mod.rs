pub mod driver;
pub mod logscan;
pub mod status;

pub use driver::{Pipeline, REQUIREMENT_ID, StageTiming};
