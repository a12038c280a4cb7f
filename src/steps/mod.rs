// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::chain::Next;
use crate::errors::ChainError;
use crate::traits::Step;

/// A step that advances the chain without touching the context, for testing
/// and placeholder purposes.
pub struct PassthroughStep;

#[async_trait::async_trait]
impl<C> Step<C> for PassthroughStep
where
    C: Send + Sync + 'static,
{
    async fn apply(&self, _ctx: Arc<C>, next: Next<C>) -> Result<(), ChainError> {
        next.run().await
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

/// A step that always fails, for testing failure scenarios.
pub struct FailingStep {
    pub message: &'static str,
}

impl FailingStep {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[async_trait::async_trait]
impl<C> Step<C> for FailingStep
where
    C: Send + Sync + 'static,
{
    async fn apply(&self, _ctx: Arc<C>, _next: Next<C>) -> Result<(), ChainError> {
        Err(ChainError::step(std::io::Error::new(
            std::io::ErrorKind::Other,
            self.message,
        )))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
