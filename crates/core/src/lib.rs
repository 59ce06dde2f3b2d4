#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod interaction;
pub mod model;
pub mod resolver;
pub mod shuffle;
pub mod time;

pub use error::Error;
pub use evaluator::{SelectionBreakdown, evaluate, selection_breakdown};
pub use interaction::Interaction;
pub use resolver::{Resolver, resolve_variation};
pub use time::{Clock, Stopwatch};
