// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the composer. Message types follow a struct-based
//! pattern with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Provide consistent, structured logging output
//!
//! # Usage
//!
//! ```rust
//! use chain_composer::observability::messages::chain::ProtocolViolation;
//!
//! let msg = ProtocolViolation { index: 2 };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod messages;
