pub mod step;

pub use crate::chain::Next;
pub use step::{FnStep, Step};
