//! # Core Application Logic
//!
//! This module contains the chat client's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │   TUI driver (tokio)    │
//!                    │   runs transport calls  │
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: all session state in one place
//! - [`action`]: The `Action` enum and `update()`: everything that can happen
//! - [`history`]: The turns sent to the backend as context
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod history;
pub mod state;
