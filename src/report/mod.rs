pub mod chart;
pub mod json;
pub mod markdown;
pub mod pagination;

pub use json::JsonReport;
pub use markdown::MarkdownReport;
pub use pagination::IssuePage;
