pub mod analyzer;
mod model;

pub use analyzer::{aggregate, aggregate_at};
pub use model::*;
