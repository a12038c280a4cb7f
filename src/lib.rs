// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod chain;      // chain construction + invocation
pub mod errors;     // error handling
pub mod observability;
pub mod steps;      // stock step implementations
pub mod traits;     // unified abstractions

pub use chain::{compose, Chain, ChainBuilder, Next};
pub use errors::{BoxError, ChainError};
pub use traits::{FnStep, Step};
