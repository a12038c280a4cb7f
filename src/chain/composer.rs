// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Middleware-chain composition.
//!
//! A [`Chain`] is an ordered, fixed sequence of steps composed into a single
//! reusable entry point. Invoking the entry point runs the steps in
//! construction order; each step receives the shared context plus a
//! continuation handle and decides whether the chain advances. Errors
//! short-circuit: once a step fails, no later step runs.
//!
//! Two entry points make the tail contract explicit instead of sniffed from
//! the argument list: [`Chain::run`] for plain invocations and
//! [`Chain::run_with_tail`] when the caller supplies its own completion step
//! to run after the last chain step.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use chain_composer::chain::{ChainBuilder, Next};
//! use chain_composer::traits::FnStep;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! type Ctx = Mutex<Vec<&'static str>>;
//!
//! let chain = ChainBuilder::new()
//!     .step(FnStep::named("greet", |ctx: Arc<Ctx>, next: Next<Ctx>| async move {
//!         ctx.lock().unwrap().push("greet");
//!         next.run().await
//!     }))
//!     .step(FnStep::named("sign_off", |ctx: Arc<Ctx>, next: Next<Ctx>| async move {
//!         ctx.lock().unwrap().push("sign_off");
//!         next.run().await
//!     }))
//!     .build();
//!
//! let ctx = Arc::new(Mutex::new(Vec::new()));
//! chain.run(ctx.clone()).await?;
//!
//! assert_eq!(*ctx.lock().unwrap(), vec!["greet", "sign_off"]);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::chain::invocation::Invocation;
use crate::errors::ChainError;
use crate::observability::messages::chain::ChainInvocationStarted;
use crate::traits::Step;

/// An ordered sequence of steps behind a single invocation entry point.
///
/// The sequence is fixed at construction and never mutated afterwards.
/// Cloning is cheap (the step slice is shared) and clones share no
/// invocation state, so concurrent invocations are independent.
pub struct Chain<C> {
    steps: Arc<[Arc<dyn Step<C>>]>,
}

impl<C> Clone for Chain<C> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Chain<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("step_count", &self.steps.len())
            .field(
                "step_names",
                &self.steps.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<C> Chain<C>
where
    C: Send + Sync + 'static,
{
    /// Number of steps in the chain.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the empty chain, which is valid and invokes as a no-op.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Invoke the chain with no tail step.
    ///
    /// Accepts either an owned context or an `Arc` the caller wants to keep
    /// a handle on; every step observes the same shared allocation.
    pub async fn run(&self, ctx: impl Into<Arc<C>>) -> Result<(), ChainError> {
        self.invoke(ctx.into(), None).await
    }

    /// Invoke the chain with a caller-supplied tail step.
    ///
    /// The tail runs as the logical step after the last chain step: it is
    /// reached only if every chain step advances, and like any step it
    /// receives the shared context plus a continuation (which, past the end
    /// of the chain, resolves as a no-op).
    pub async fn run_with_tail(
        &self,
        ctx: impl Into<Arc<C>>,
        tail: Arc<dyn Step<C>>,
    ) -> Result<(), ChainError> {
        self.invoke(ctx.into(), Some(tail)).await
    }

    async fn invoke(&self, ctx: Arc<C>, tail: Option<Arc<dyn Step<C>>>) -> Result<(), ChainError> {
        tracing::debug!(
            "{}",
            ChainInvocationStarted {
                steps: self.steps.len(),
                has_tail: tail.is_some(),
            }
        );
        Invocation::new(self.steps.clone(), ctx, tail).start().await
    }
}

impl<C> From<Vec<Arc<dyn Step<C>>>> for Chain<C> {
    fn from(steps: Vec<Arc<dyn Step<C>>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

/// Compose steps into a [`Chain`].
///
/// The empty sequence is valid and yields a no-op chain.
pub fn compose<C>(steps: impl IntoIterator<Item = Arc<dyn Step<C>>>) -> Chain<C> {
    Chain {
        steps: steps.into_iter().collect::<Vec<_>>().into(),
    }
}

/// Incremental [`Chain`] construction.
pub struct ChainBuilder<C> {
    steps: Vec<Arc<dyn Step<C>>>,
}

impl<C> ChainBuilder<C>
where
    C: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step to the end of the chain.
    pub fn step(mut self, step: impl Step<C> + 'static) -> Self {
        self.steps.push(Arc::new(step));
        self
    }

    /// Append an already-shared step.
    pub fn step_arc(mut self, step: Arc<dyn Step<C>>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Chain<C> {
        Chain {
            steps: self.steps.into(),
        }
    }
}

impl<C> Default for ChainBuilder<C>
where
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::PassthroughStep;

    #[test]
    fn empty_chain_is_valid() {
        let chain: Chain<()> = compose(Vec::new());

        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn builder_preserves_step_order_and_count() {
        let chain: Chain<()> = ChainBuilder::new()
            .step(PassthroughStep)
            .step_arc(Arc::new(PassthroughStep))
            .build();

        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
    }

    #[test]
    fn chain_from_vec_of_steps() {
        let steps: Vec<Arc<dyn Step<()>>> =
            vec![Arc::new(PassthroughStep), Arc::new(PassthroughStep)];

        let chain = Chain::from(steps);

        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn clones_share_the_step_slice() {
        let chain: Chain<()> = ChainBuilder::new().step(PassthroughStep).build();

        let cloned = chain.clone();

        assert!(Arc::ptr_eq(&chain.steps, &cloned.steps));
    }
}
