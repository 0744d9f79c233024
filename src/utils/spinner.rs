use crate::utils::ProgressStyleTemplate;
use indicatif::ProgressBar;
use std::time::Duration;

pub trait ProgressBarSpinner {
    fn styled_spinner(message: impl Into<String>) -> ProgressBar;
    fn finish_styled(&self, message: impl Into<String>);
}

impl ProgressBarSpinner for ProgressBar {
    fn styled_spinner(message: impl Into<String>) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyleTemplate::spinner());
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn finish_styled(&self, message: impl Into<String>) {
        self.set_style(ProgressStyleTemplate::finished());
        self.finish_with_message(message.into());
    }
}
