use crate::github::FetchError;
use crate::model::{Issue, Repository};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

pub const PER_PAGE: usize = 100;
pub const MAX_ISSUES: usize = 1000;
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("issue-metrics/", env!("CARGO_PKG_VERSION"));

pub type PageProgress<'a> = Box<dyn FnMut(u32) + Send + 'a>;

/// One page of the issues listing, newest first.
pub trait IssuePageSource {
    async fn fetch_page(&self, repository: &Repository, page: u32)
        -> Result<Vec<Issue>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: Option<&str>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| FetchError::Transport(err.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn issues_url(&self, repository: &Repository, page: u32) -> String {
        format!(
            "{}/repos/{}/{}/issues?state=all&per_page={PER_PAGE}&page={page}&sort=created&direction=desc",
            self.api_url, repository.owner, repository.name
        )
    }
}

impl IssuePageSource for GithubClient {
    async fn fetch_page(
        &self,
        repository: &Repository,
        page: u32,
    ) -> Result<Vec<Issue>, FetchError> {
        let url = self.issues_url(repository, page);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        if let Some(err) = FetchError::from_status(response.status()) {
            log::debug!("{url} answered {}", response.status());
            return Err(err);
        }
        Ok(response.json::<Vec<Issue>>().await?)
    }
}

pub trait GithubIssueRequester {
    async fn fetch_issues<'a, S: IssuePageSource>(
        &self,
        source: &S,
        max_issues: usize,
        cb: PageProgress<'a>,
    ) -> Result<Vec<Issue>, FetchError>;
}

impl GithubIssueRequester for Repository {
    async fn fetch_issues<'a, S: IssuePageSource>(
        &self,
        source: &S,
        max_issues: usize,
        mut cb: PageProgress<'a>,
    ) -> Result<Vec<Issue>, FetchError> {
        let mut page = 1;
        let mut issues: Vec<Issue> = vec![];

        while issues.len() < max_issues {
            cb(page);
            let batch = source.fetch_page(self, page).await?;
            if batch.is_empty() {
                break;
            }
            log::debug!("{self}: page {page} returned {} issues", batch.len());
            issues.extend(batch);
            page += 1;
        }

        if issues.len() > max_issues {
            log::info!("{self}: capping {} fetched issues at {max_issues}", issues.len());
            issues.truncate(max_issues);
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IssueState;
    use chrono::DateTime;
    use futures::executor::block_on;
    use std::sync::Mutex;

    struct StubSource {
        pages: Vec<Result<Vec<Issue>, FetchError>>,
        requested: Mutex<Vec<u32>>,
    }

    impl StubSource {
        fn new(pages: Vec<Result<Vec<Issue>, FetchError>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(vec![]),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl IssuePageSource for StubSource {
        async fn fetch_page(
            &self,
            _repository: &Repository,
            page: u32,
        ) -> Result<Vec<Issue>, FetchError> {
            self.requested.lock().unwrap().push(page);
            self.pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_else(|| Ok(vec![]))
        }
    }

    fn issue(id: u64) -> Issue {
        Issue {
            id,
            number: id,
            title: format!("Issue {id}"),
            state: IssueState::Open,
            created_at: DateTime::parse_from_rfc3339("2024-04-01T00:00:00Z").unwrap(),
            closed_at: None,
            html_url: format!("https://github.com/acme/widgets/issues/{id}"),
            user: None,
            pull_request: None,
        }
    }

    fn page(first: u64, len: u64) -> Vec<Issue> {
        (first..first + len).map(issue).collect()
    }

    fn repo() -> Repository {
        Repository::parse("acme/widgets").unwrap()
    }

    #[test]
    fn test_fetch_stops_at_empty_page() {
        let source = StubSource::new(vec![Ok(page(1, 100)), Ok(page(101, 30))]);
        let issues = block_on(repo().fetch_issues(&source, MAX_ISSUES, Box::new(|_| {}))).unwrap();

        assert_eq!(issues.len(), 130);
        assert_eq!(issues[0].id, 1);
        assert_eq!(issues[129].id, 130);
        assert_eq!(source.requested(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fetch_caps_at_max_issues() {
        let pages = (0..12).map(|p| Ok(page(p * 100 + 1, 100))).collect();
        let source = StubSource::new(pages);
        let issues = block_on(repo().fetch_issues(&source, MAX_ISSUES, Box::new(|_| {}))).unwrap();

        assert_eq!(issues.len(), MAX_ISSUES);
        assert_eq!(source.requested(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fetch_truncates_partial_overshoot() {
        let source = StubSource::new(vec![Ok(page(1, 100)), Ok(page(101, 100))]);
        let issues = block_on(repo().fetch_issues(&source, 150, Box::new(|_| {}))).unwrap();

        assert_eq!(issues.len(), 150);
        assert_eq!(issues.last().unwrap().id, 150);
    }

    #[test]
    fn test_fetch_reports_pages_to_progress() {
        let source = StubSource::new(vec![Ok(page(1, 5))]);
        let seen = Mutex::new(vec![]);
        let result = block_on(repo().fetch_issues(
            &source,
            MAX_ISSUES,
            Box::new(|page| seen.lock().unwrap().push(page)),
        ));

        assert!(result.is_ok());
        assert_eq!(seen.into_inner().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_fetch_propagates_first_error() {
        let source = StubSource::new(vec![Ok(page(1, 100)), Err(FetchError::RateLimited)]);
        let result = block_on(repo().fetch_issues(&source, MAX_ISSUES, Box::new(|_| {})));

        assert_eq!(result, Err(FetchError::RateLimited));
        assert_eq!(source.requested(), vec![1, 2]);
    }

    #[test]
    fn test_issues_url() {
        let client = GithubClient::new("https://api.github.com/", None).unwrap();
        assert_eq!(
            client.issues_url(&repo(), 3),
            "https://api.github.com/repos/acme/widgets/issues?state=all&per_page=100&page=3&sort=created&direction=desc"
        );
    }
}
