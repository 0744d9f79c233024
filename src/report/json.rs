use crate::analyze::IssuesAnalyzed;
use crate::model::Result;

pub trait JsonReport {
    fn report_json(&self) -> Result<String>;
}

impl JsonReport for IssuesAnalyzed {
    fn report_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
