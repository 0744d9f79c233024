pub mod error;
pub mod issues;

pub use error::FetchError;
pub use issues::GithubClient;
pub use issues::GithubIssueRequester;
