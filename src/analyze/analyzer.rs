use crate::analyze::{IssuesAnalyzed, StatusCounts, WeekWindow, WeeklyMetrics};
use crate::model::{Issue, IssueState};
use chrono::{DateTime, Duration, FixedOffset, Local};

pub const WEEKS: usize = 10;
const DAYS_PER_WEEK: i64 = 7;

/// Aggregates against the local clock.
///
/// The current UTC offset is used for all ten weeks, so across a daylight saving change the
/// older windows' day boundaries sit an hour off local midnight.
pub fn aggregate(issues: &[Issue]) -> IssuesAnalyzed {
    aggregate_at(issues, &Local::now().fixed_offset())
}

pub fn aggregate_at(issues: &[Issue], now: &DateTime<FixedOffset>) -> IssuesAnalyzed {
    let mut sorted = issues.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let weekly_data = build_week_windows(now)
        .iter()
        .map(|window| compute_weekly_metrics(issues, window))
        .collect::<Vec<_>>();
    let average_weekly_closure_rate = compute_average_closure_rate(&weekly_data);

    IssuesAnalyzed {
        issues: sorted,
        status_counts: compute_status_counts(issues),
        weekly_data,
        average_weekly_closure_rate,
    }
}

pub fn compute_status_counts(issues: &[Issue]) -> StatusCounts {
    issues.iter().fold(StatusCounts::default(), |mut acc, issue| {
        match issue.state {
            IssueState::Open => acc.open += 1,
            IssueState::Closed => acc.closed += 1,
            IssueState::Unknown => {}
        }
        acc.total += 1;
        acc
    })
}

/// The trailing [`WEEKS`] windows, oldest first, the last one ending on `now`'s date.
pub fn build_week_windows(now: &DateTime<FixedOffset>) -> Vec<WeekWindow> {
    let today = now.date_naive();
    let offset = *now.offset();
    (0..WEEKS as i64)
        .rev()
        .map(|week| WeekWindow::new(today - Duration::days(week * DAYS_PER_WEEK), offset))
        .collect()
}

pub fn compute_weekly_metrics(issues: &[Issue], window: &WeekWindow) -> WeeklyMetrics {
    let new_issues = issues
        .iter()
        .filter(|issue| window.contains(&issue.created_at))
        .count();
    let closed_issues = issues
        .iter()
        .filter(|issue| issue.closed_at.is_some_and(|at| window.contains(&at)))
        .count();
    let open_at_start = issues
        .iter()
        .filter(|issue| window.opens_after(&issue.created_at))
        .filter(|issue| issue.closed_at.map_or(true, |at| !window.opens_after(&at)))
        .count();

    // No closures means an unbounded ratio; the count of new issues stands in for it.
    let new_vs_closed_ratio = match (new_issues, closed_issues) {
        (_, 0) => new_issues as f64,
        (new, closed) => new as f64 / closed as f64,
    };

    let backlog = open_at_start + new_issues;
    let closure_rate = if backlog > 0 {
        closed_issues as f64 / backlog as f64
    } else {
        0.0
    };
    if closure_rate > 1.0 {
        log::warn!(
            "{}: {closed_issues} issues closed out of a backlog of {backlog}, closed dates precede created dates",
            window.label
        );
    }

    WeeklyMetrics {
        window: window.clone(),
        new_issues,
        closed_issues,
        open_at_start,
        total_issues: open_at_start as i64 + new_issues as i64 - closed_issues as i64,
        new_vs_closed_ratio,
        closure_rate,
    }
}

/// Mean closure rate over the weeks that had a backlog at all.
pub fn compute_average_closure_rate(weeks: &[WeeklyMetrics]) -> f64 {
    let (sum, count) = weeks
        .iter()
        .filter(|week| week.has_backlog())
        .fold((0.0, 0usize), |(sum, count), week| {
            (sum + week.closure_rate, count + 1)
        });
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}
