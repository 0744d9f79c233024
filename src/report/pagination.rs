use crate::model::Issue;

pub const ISSUES_PER_PAGE: usize = 10;
const MAX_PAGE_LINKS: usize = 5;

/// A page of the sorted issue list, 1-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssuePage<'a> {
    pub issues: &'a [Issue],
    pub current: usize,
    pub total_pages: usize,
}

impl<'a> IssuePage<'a> {
    /// Out of range page numbers are clamped to the first or last page.
    pub fn of(issues: &'a [Issue], page: usize) -> Self {
        let total_pages = issues.len().div_ceil(ISSUES_PER_PAGE).max(1);
        let current = page.clamp(1, total_pages);
        let first = (current - 1) * ISSUES_PER_PAGE;
        let last = (first + ISSUES_PER_PAGE).min(issues.len());
        Self {
            issues: &issues[first..last],
            current,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Page numbers to offer around the current one.
    pub fn page_links(&self) -> Vec<usize> {
        let first = if self.current <= 3 { 1 } else { self.current - 2 };
        (first..first + MAX_PAGE_LINKS.min(self.total_pages))
            .filter(|page| *page <= self.total_pages)
            .collect()
    }
}
