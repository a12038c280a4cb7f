pub mod composer;
pub mod invocation;

pub use composer::{compose, Chain, ChainBuilder};
pub use invocation::Next;
