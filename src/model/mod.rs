mod issue;
mod repository;
mod result;

pub use issue::{Issue, IssueState};
pub use repository::Repository;
pub use result::Result;
