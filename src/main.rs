mod analyze;
mod github;
mod model;
mod report;
mod utils;

use crate::analyze::aggregate;
use crate::github::issues::{DEFAULT_API_URL, MAX_ISSUES};
use crate::github::{GithubClient, GithubIssueRequester};
use crate::report::{JsonReport, MarkdownReport};
use crate::utils::ProgressBarSpinner;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use indicatif::ProgressBar;
use model::{Issue, Repository, Result};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Weekly issue statistics for a GitHub repository.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Args {
    /// Repository as `owner/name`
    repository: String,
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    #[arg(long = "api_url", default_value = DEFAULT_API_URL)]
    api_url: String,
    #[arg(long = "max_issues", default_value_t = MAX_ISSUES)]
    max_issues: usize,
    /// Page of the issue list to include in the markdown report
    #[arg(long = "page", default_value_t = 1)]
    page: usize,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
    /// Defaults to `<owner>-<name>.md` or `.json`
    #[arg(long = "output")]
    output: Option<PathBuf>,
    /// Drop pull requests returned by the issues endpoint
    #[arg(long = "exclude_pulls")]
    exclude_pulls: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let repository = Repository::parse(&args.repository)?;

    let mut issues = repo_fetch(&repository, args).await?;
    if args.exclude_pulls {
        let before = issues.len();
        issues.retain(|issue| !issue.is_pull_request());
        log::info!("Dropped {} pull requests", before - issues.len());
    }

    let analyzed = aggregate(&issues);
    let contents = match args.format {
        OutputFormat::Markdown => analyzed.report_markdown(&repository, args.page)?,
        OutputFormat::Json => analyzed.report_json()?,
    };

    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", repository.slug(), args.format.extension()))
    });
    fs::write(&path, contents)?;
    println!("✅ Report written to `{}`", path.display());
    Ok(())
}

async fn repo_fetch(repository: &Repository, args: &Args) -> Result<Vec<Issue>> {
    let client = GithubClient::new(&args.api_url, args.token.as_deref())?;
    let pb = ProgressBar::styled_spinner(format!("Fetching issues of {repository} ..."));

    let progress_pb = pb.clone();
    let progress = move |page: u32| {
        progress_pb.set_message(format!("Fetch issues (#{page} page) ..."));
    };
    match repository
        .fetch_issues(&client, args.max_issues, Box::new(progress))
        .await
    {
        Ok(issues) => {
            pb.finish_styled(format!(
                "✅ Completed fetch issues (find {} issues)",
                issues.len()
            ));
            Ok(issues)
        }
        Err(err) => {
            pb.finish_and_clear();
            Err(err.into())
        }
    }
}
