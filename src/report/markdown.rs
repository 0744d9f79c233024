use crate::analyze::{IssuesAnalyzed, WeeklyMetrics};
use crate::model::{Issue, Repository, Result};
use crate::report::chart::{format_percentage, ChartMetric};
use crate::report::IssuePage;
use itertools::Itertools;
use markdown_builder::{Markdown, MarkdownElement};
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pre-formatted block, emitted as is. `Markdown::paragraph` re-wraps at 80 columns.
#[derive(Debug, Clone)]
struct Raw(String);

impl MarkdownElement for Raw {
    fn render(&self) -> String {
        format!("{}\n", self.0)
    }
}

pub trait MarkdownReport {
    fn report_markdown(&self, repository: &Repository, page: usize) -> Result<String>;
}

impl MarkdownReport for IssuesAnalyzed {
    fn report_markdown(&self, repository: &Repository, page: usize) -> Result<String> {
        let mut doc = Markdown::new();

        doc.header1(format!("Issues of {repository}"));
        doc.add_summary(self)?;
        for metric in ChartMetric::ALL {
            doc.add_chart(metric, &self.weekly_data)?;
        }
        doc.add_weekly_breakdown(&self.weekly_data)?;
        doc.add_issues(&IssuePage::of(&self.issues, page))?;

        Ok(doc.render())
    }
}

trait MarkdownExt {
    fn add_summary(&mut self, analyzed: &IssuesAnalyzed) -> Result<()>;
    fn add_chart(&mut self, metric: ChartMetric, weeks: &[WeeklyMetrics]) -> Result<()>;
    fn add_weekly_breakdown(&mut self, weeks: &[WeeklyMetrics]) -> Result<()>;
    fn add_issues(&mut self, page: &IssuePage) -> Result<()>;
    fn raw(&mut self, block: String);
}

impl MarkdownExt for Markdown {
    fn add_summary(&mut self, analyzed: &IssuesAnalyzed) -> Result<()> {
        self.header2("Summary");

        let header = [
            "Total Issues",
            "Open Issues",
            "Closed Issues",
            "Avg Weekly Closure Rate",
        ]
        .map(centered)
        .to_vec();
        let counts = analyzed.status_counts;
        let row = vec![
            format!("**{}**", counts.total),
            format!("**{}**", counts.open),
            format!("**{}**", counts.closed),
            format!(
                "**{}**",
                format_percentage(analyzed.average_weekly_closure_rate)
            ),
        ];

        self.raw(render_table(header, vec![row])?);
        Ok(())
    }

    fn add_chart(&mut self, metric: ChartMetric, weeks: &[WeeklyMetrics]) -> Result<()> {
        self.header2(metric.label());

        let header = weeks
            .iter()
            .map(|week| centered(&week.window.label))
            .collect::<Vec<_>>();
        let row = weeks
            .iter()
            .map(|week| metric.format(metric.value(week)))
            .collect::<Vec<_>>();
        self.raw(render_table(header, vec![row])?);

        let bars = metric.bars(weeks);
        let label_width = bars.iter().map(|(label, _, _)| label.len()).max().unwrap_or(0);
        let chart = bars
            .iter()
            .map(|(label, bar, value)| format!("{label:>label_width$} │{bar} {value}"))
            .join("\n");
        self.raw(format!("```text\n{chart}\n```"));
        Ok(())
    }

    fn add_weekly_breakdown(&mut self, weeks: &[WeeklyMetrics]) -> Result<()> {
        self.header2("Weekly Breakdown");

        let header = [
            "Week",
            "New",
            "Closed",
            "Open at start",
            "Total",
            "New vs Closed",
            "Closure Rate",
        ]
        .map(centered)
        .to_vec();
        let rows = weeks
            .iter()
            .map(|week| {
                vec![
                    week.window.label.clone(),
                    week.new_issues.to_string(),
                    week.closed_issues.to_string(),
                    week.open_at_start.to_string(),
                    ChartMetric::TotalIssues.format(week.total_issues as f64),
                    ChartMetric::NewVsClosedRatio.format(week.new_vs_closed_ratio),
                    ChartMetric::ClosureRate.format(week.closure_rate),
                ]
            })
            .collect::<Vec<_>>();

        self.raw(render_table(header, rows)?);
        Ok(())
    }

    fn add_issues(&mut self, page: &IssuePage) -> Result<()> {
        self.header2(format!(
            "Issues (page {} of {})",
            page.current, page.total_pages
        ));
        if page.issues.is_empty() {
            self.paragraph("*No issues found.*".to_string());
            return Ok(());
        }

        let header = ["Number", "Title", "Status", "Created", "Closed"]
            .map(|h| Heading::new(h.to_string(), None))
            .to_vec();
        let rows = page.issues.iter().map(issue_row).collect::<Vec<_>>();
        self.raw(render_table(header, rows)?);
        self.raw(page_navigation(page));
        Ok(())
    }

    fn raw(&mut self, block: String) {
        self.elements.push(Box::new(Raw(block)));
    }
}

fn issue_row(issue: &Issue) -> Vec<String> {
    vec![
        format!("#{}", issue.number),
        format!("[{}]({})", escape_cell(&issue.title), issue.html_url),
        format!("`{}`", issue.state.as_str()),
        issue.created_at.format(DATE_FORMAT).to_string(),
        issue
            .closed_at
            .map(|at| at.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]
}

fn page_navigation(page: &IssuePage) -> String {
    let previous = if page.has_previous() { "‹ Previous" } else { "~~‹ Previous~~" };
    let next = if page.has_next() { "Next ›" } else { "~~Next ›~~" };
    let links = page
        .page_links()
        .into_iter()
        .map(|number| {
            if number == page.current {
                format!("**{number}**")
            } else {
                number.to_string()
            }
        })
        .join(" · ");
    format!("{previous} · {links} · {next}")
}

fn centered(text: &str) -> Heading {
    Heading::new(text.to_string(), Some(HeadingAlignment::Center))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn render_table(header: Vec<Heading>, rows: Vec<Vec<String>>) -> Result<String> {
    let mut table = MarkdownTable::new(rows);
    table.with_headings(header);
    Ok(table
        .as_markdown()
        .map_err(|_| "Failed to render markdown table")?)
}
