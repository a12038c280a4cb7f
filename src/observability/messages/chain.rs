// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for chain invocation lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Invocation start and settlement
//! * Step failures
//! * Continuation protocol violations

use std::fmt::{Display, Formatter};

/// Chain invocation started.
///
/// # Log Level
/// `debug!` - Routine operational event
///
/// # Example
/// ```
/// use chain_composer::observability::messages::chain::ChainInvocationStarted;
///
/// let msg = ChainInvocationStarted {
///     steps: 3,
///     has_tail: true,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ChainInvocationStarted {
    pub steps: usize,
    pub has_tail: bool,
}

impl Display for ChainInvocationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chain invocation started: {} steps, tail={}",
            self.steps, self.has_tail
        )
    }
}

/// Chain invocation settled, successfully or not.
///
/// # Log Level
/// `debug!` - Routine operational event
///
/// # Example
/// ```
/// use chain_composer::observability::messages::chain::ChainSettled;
///
/// let msg = ChainSettled {
///     steps: 3,
///     outcome: "success",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ChainSettled {
    pub steps: usize,
    pub outcome: &'static str,
}

impl Display for ChainSettled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Chain invocation settled: {} steps, outcome={}",
            self.steps, self.outcome
        )
    }
}

/// A step failed, terminating the invocation.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use chain_composer::observability::messages::chain::StepFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = StepFailed {
///     step: "validate_payload",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct StepFailed<'a> {
    pub step: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StepFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step '{}' failed: {}", self.step, self.error)
    }
}

/// A continuation was awaited out of protocol.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use chain_composer::observability::messages::chain::ProtocolViolation;
///
/// let msg = ProtocolViolation { index: 2 };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ProtocolViolation {
    pub index: usize,
}

impl Display for ProtocolViolation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Continuation protocol violation at index {}: next() called multiple times",
            self.index
        )
    }
}
