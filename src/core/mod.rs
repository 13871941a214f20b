//! # Core Application Logic
//!
//! This module contains meteo's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (messages)    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │   Probe    │
//!            │  Runtime   │ ◀───────── │  (reqwest) │
//!            │ (ratatui)  │   Action   │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum, the `Effect` enum and `update()`
//! - [`input`]: The single-line location field
//! - [`config`]: Settings file and environment resolution

pub mod action;
pub mod config;
pub mod input;
pub mod state;
