use crate::analyze::WeeklyMetrics;

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

/// Weekly series a chart can be drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    TotalIssues,
    NewVsClosedRatio,
    ClosureRate,
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 3] = [
        ChartMetric::TotalIssues,
        ChartMetric::NewVsClosedRatio,
        ChartMetric::ClosureRate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartMetric::TotalIssues => "Total Issues",
            ChartMetric::NewVsClosedRatio => "New vs Closed Ratio",
            ChartMetric::ClosureRate => "Closure Rate",
        }
    }

    pub fn value(&self, week: &WeeklyMetrics) -> f64 {
        match self {
            ChartMetric::TotalIssues => week.total_issues as f64,
            ChartMetric::NewVsClosedRatio => week.new_vs_closed_ratio,
            ChartMetric::ClosureRate => week.closure_rate,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            ChartMetric::TotalIssues => format!("{}", value.round() as i64),
            ChartMetric::NewVsClosedRatio => format!("{value:.2}"),
            ChartMetric::ClosureRate => format_percentage(value),
        }
    }

    /// One text bar per week, scaled so the largest value fills most of [`BAR_WIDTH`].
    pub fn bars(&self, weeks: &[WeeklyMetrics]) -> Vec<(String, String, String)> {
        let values = weeks.iter().map(|w| self.value(w)).collect::<Vec<_>>();
        // Headroom above the tallest bar.
        let scale = values.iter().copied().fold(0.0, f64::max) * 1.1;

        weeks
            .iter()
            .zip(values)
            .map(|(week, value)| {
                let length = if scale > 0.0 && value > 0.0 {
                    (value / scale * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                (
                    week.window.label.clone(),
                    BAR_CHAR.to_string().repeat(length),
                    self.format(value),
                )
            })
            .collect()
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
