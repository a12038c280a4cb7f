// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-invocation state and the continuation protocol.
//!
//! Each call to a chain entry point owns one `Invocation`: the shared
//! context, the fixed step sequence, the optional tail step, and a private
//! cursor tracking the highest step index reached so far. The cursor only
//! moves forward; awaiting a continuation at an index the invocation has
//! already reached is a protocol violation and fails the invocation.
//!
//! Execution is driven entirely by explicit continuation calls. A step that
//! returns without awaiting its continuation terminates the chain cleanly; a
//! step that neither settles nor advances leaves the invocation's future
//! pending forever. No timeout or cancellation is provided.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::errors::ChainError;
use crate::observability::messages::chain::{ChainSettled, ProtocolViolation, StepFailed};
use crate::traits::Step;

/// State owned by a single invocation of a chain.
///
/// Concurrent invocations of the same chain each get their own `Invocation`,
/// so no locking is needed across them.
pub(crate) struct Invocation<C> {
    steps: Arc<[Arc<dyn Step<C>>]>,
    tail: Option<Arc<dyn Step<C>>>,
    ctx: Arc<C>,
    cursor: AtomicI64,
    settled: AtomicBool,
    error_reported: AtomicBool,
}

impl<C> Invocation<C>
where
    C: Send + Sync + 'static,
{
    pub(crate) fn new(
        steps: Arc<[Arc<dyn Step<C>>]>,
        ctx: Arc<C>,
        tail: Option<Arc<dyn Step<C>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            steps,
            tail,
            ctx,
            cursor: AtomicI64::new(-1),
            settled: AtomicBool::new(false),
            error_reported: AtomicBool::new(false),
        })
    }

    pub(crate) async fn start(self: Arc<Self>) -> Result<(), ChainError> {
        let result = advance(self.clone(), 0).await;
        self.settled.store(true, Ordering::SeqCst);
        tracing::debug!(
            "{}",
            ChainSettled {
                steps: self.steps.len(),
                outcome: if result.is_ok() { "success" } else { "failure" },
            }
        );
        result
    }

    // At most one error event is emitted per invocation: the frame where the
    // failure originated. Ancestor frames see the same error as it unwinds
    // and stay silent.
    fn report_protocol_violation(&self, index: usize) {
        if !self.error_reported.swap(true, Ordering::SeqCst) {
            tracing::error!("{}", ProtocolViolation { index });
        }
    }
}

/// Advance the invocation to `index` and run the target found there.
///
/// Target resolution: `index == steps.len()` selects the tail step,
/// `index < steps.len()` selects the chain step, anything past that (or a
/// missing tail) resolves immediately as a clean termination.
fn advance<C>(inv: Arc<Invocation<C>>, index: usize) -> BoxFuture<'static, Result<(), ChainError>>
where
    C: Send + Sync + 'static,
{
    Box::pin(async move {
        // A continuation that fires after the invocation has settled is a
        // protocol violation even if its index would otherwise be valid.
        if inv.settled.load(Ordering::SeqCst) {
            inv.report_protocol_violation(index);
            return Err(ChainError::NextCalledMultipleTimes);
        }

        let prev = inv.cursor.fetch_max(index as i64, Ordering::SeqCst);
        if prev >= index as i64 {
            inv.report_protocol_violation(index);
            return Err(ChainError::NextCalledMultipleTimes);
        }

        let target = if index == inv.steps.len() {
            inv.tail.clone()
        } else {
            inv.steps.get(index).cloned()
        };

        let Some(target) = target else {
            // Ran off the end with no tail step: clean termination.
            return Ok(());
        };

        let next = Next {
            invocation: inv.clone(),
            index: index + 1,
        };

        tracing::trace!(index, step = target.name(), "advancing chain");
        match target.apply(inv.ctx.clone(), next).await {
            Ok(()) => Ok(()),
            Err(error) => {
                // Only the originating frame reports; the error unwinds
                // through every ancestor step unchanged.
                if !inv.error_reported.swap(true, Ordering::SeqCst) {
                    tracing::error!(
                        "{}",
                        StepFailed {
                            step: target.name(),
                            error: &error,
                        }
                    );
                }
                Err(error)
            }
        }
    })
}

/// Continuation handle injected into each step.
///
/// Awaiting [`Next::run`] advances the chain to the step after the one this
/// handle was given to. The handle may be cloned and moved freely, but only
/// one forward advancement per index is permitted per invocation; a second
/// await at the same position fails with
/// [`ChainError::NextCalledMultipleTimes`].
pub struct Next<C> {
    invocation: Arc<Invocation<C>>,
    index: usize,
}

impl<C> Clone for Next<C> {
    fn clone(&self) -> Self {
        Self {
            invocation: self.invocation.clone(),
            index: self.index,
        }
    }
}

impl<C> Next<C>
where
    C: Send + Sync + 'static,
{
    /// Run the rest of the chain from this point.
    ///
    /// Resolves with the outcome of everything downstream: the next step, the
    /// steps it advances to, and the tail step if one was supplied. Not
    /// awaiting this handle at all is valid and stops the chain after the
    /// current step.
    pub async fn run(&self) -> Result<(), ChainError> {
        advance(self.invocation.clone(), self.index).await
    }
}
