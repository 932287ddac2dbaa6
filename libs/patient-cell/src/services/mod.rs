pub mod insights;
pub mod recorder;
