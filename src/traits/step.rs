use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::chain::Next;
use crate::errors::ChainError;

/// One unit of work in a composed chain.
///
/// A step receives the shared invocation context and a continuation handle.
/// Awaiting `next.run()` advances the chain to the following step; returning
/// without awaiting it terminates the invocation cleanly after this step.
/// Returning an error fails the whole invocation.
#[async_trait]
pub trait Step<C>: Send + Sync {
    async fn apply(&self, ctx: Arc<C>, next: Next<C>) -> Result<(), ChainError>;

    fn name(&self) -> &'static str;
}

/// Adapter that lets async closures act as chain steps.
pub struct FnStep<F> {
    f: F,
    name: &'static str,
}

impl<F> FnStep<F> {
    pub fn new(f: F) -> Self {
        Self { f, name: "fn" }
    }

    /// Like [`FnStep::new`], but with a name used in diagnostics.
    pub fn named(name: &'static str, f: F) -> Self {
        Self { f, name }
    }
}

#[async_trait]
impl<C, F, Fut> Step<C> for FnStep<F>
where
    C: Send + Sync + 'static,
    F: Fn(Arc<C>, Next<C>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ChainError>> + Send,
{
    async fn apply(&self, ctx: Arc<C>, next: Next<C>) -> Result<(), ChainError> {
        (self.f)(ctx, next).await
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
