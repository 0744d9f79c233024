mod progress_style;
mod spinner;

pub use progress_style::ProgressStyleTemplate;
pub use spinner::ProgressBarSpinner;
