// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for chain construction and invocation.
//!
//! All invocation-time failures surface through the future returned by the
//! chain entry point; nothing is panicked mid-chain and nothing is swallowed.
//! There is no internal recovery or retry; every failure is terminal for that
//! invocation.

use thiserror::Error;

/// Boxed error used to carry a step's failure without wrapping or cloning it.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure outcome of a chain invocation.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A step awaited its continuation at an index the invocation had already
    /// reached, or after the invocation had settled.
    #[error("next() called multiple times")]
    NextCalledMultipleTimes,

    /// A step failed. The original error is preserved unchanged and can be
    /// recovered by downcasting.
    #[error(transparent)]
    Step(#[from] BoxError),
}

impl ChainError {
    /// Wrap an arbitrary error as a step failure.
    pub fn step<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        ChainError::Step(error.into())
    }

    /// True if this failure is a continuation protocol violation rather than
    /// a step-level error.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, ChainError::NextCalledMultipleTimes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_violation_message_is_exact() {
        let error = ChainError::NextCalledMultipleTimes;

        assert_eq!(error.to_string(), "next() called multiple times");
        assert!(error.is_protocol_violation());
    }

    #[test]
    fn step_failure_preserves_original_error() {
        let original = std::io::Error::new(std::io::ErrorKind::Other, "boom");

        let error = ChainError::step(original);

        assert_eq!(error.to_string(), "boom");
        assert!(!error.is_protocol_violation());
        match error {
            ChainError::Step(inner) => {
                assert!(inner.downcast_ref::<std::io::Error>().is_some());
            }
            other => panic!("Expected Step failure, got {:?}", other),
        }
    }
}
