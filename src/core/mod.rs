//! # Application Core
//!
//! Wiring shared by every front end: where settings come from and how
//! they are split up for each component.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │    core::config         │
//!                    │  defaults → file →      │
//!                    │  env → CLI              │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │ Directory  │      │  Prompt    │      │ Submitter  │
//!     │  Engine    │      │  Machine   │      │  (HTTP)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `IlmConfig` (sparse TOML) and `ResolvedConfig`

pub mod config;
