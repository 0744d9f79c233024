use crate::model::Issue;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::Serialize;

/// Issue counts by state over the whole input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub open: usize,
    pub closed: usize,
    pub total: usize,
}

/// Seven calendar days, `start` and `end` inclusive.
///
/// Membership is decided on instants: a timestamp belongs to the window when it falls in
/// `[opens_at, closes_at)`, i.e. from midnight of `start` up to midnight after `end`, both
/// taken in the offset the window was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    #[serde(rename = "startDate")]
    pub start: NaiveDate,
    #[serde(rename = "endDate")]
    pub end: NaiveDate,
    #[serde(rename = "weekLabel")]
    pub label: String,
    #[serde(skip)]
    pub opens_at: DateTime<FixedOffset>,
    #[serde(skip)]
    pub closes_at: DateTime<FixedOffset>,
}

impl WeekWindow {
    pub fn new(end: NaiveDate, offset: FixedOffset) -> Self {
        let start = end - Duration::days(6);
        Self {
            start,
            end,
            label: week_label(start, end),
            opens_at: start_of_day(start, offset),
            closes_at: start_of_day(end + Duration::days(1), offset),
        }
    }

    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        *at >= self.opens_at && *at < self.closes_at
    }

    pub fn opens_after(&self, at: &DateTime<FixedOffset>) -> bool {
        *at < self.opens_at
    }
}

fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.month() == end.month() {
        format!("{} {}-{}", start.format("%b"), start.day(), end.day())
    } else {
        format!(
            "{} {}-{} {}",
            start.format("%b"),
            start.day(),
            end.format("%b"),
            end.day()
        )
    }
}

fn start_of_day(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(offset.local_minus_utc().into());
    DateTime::from_naive_utc_and_offset(utc, offset)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMetrics {
    #[serde(flatten)]
    pub window: WeekWindow,
    pub new_issues: usize,
    pub closed_issues: usize,
    pub open_at_start: usize,
    pub total_issues: i64,
    pub new_vs_closed_ratio: f64,
    pub closure_rate: f64,
}

impl WeeklyMetrics {
    /// Whether anything was open or opened during the week.
    pub fn has_backlog(&self) -> bool {
        self.open_at_start > 0 || self.new_issues > 0
    }
}

/// Everything the reports need, computed in one pass over the fetched issues.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesAnalyzed {
    pub issues: Vec<Issue>,
    pub status_counts: StatusCounts,
    pub weekly_data: Vec<WeeklyMetrics>,
    pub average_weekly_closure_rate: f64,
}
