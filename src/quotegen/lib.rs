//! # quotegen Architecture
//!
//! quotegen is a **UI-agnostic quotation library**: it owns the quote document, the
//! values derived from it, the two ways of rendering it and the hand-off to a printer.
//! The `quotegen` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments and session commands, prints output     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One session: store, active view, access gate             │
//! │  - Returns structured Result<CmdResult> values              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validates user positions, edits, renders, prints         │
//! │  - No I/O assumptions                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store.rs, derive.rs, render/, export.rs, gate.rs)    │
//! │  - Copy-on-write snapshots of the quote                     │
//! │  - Pure derivations: totals, words, page counts             │
//! │  - Editor panel and print-ready preview                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data flow
//!
//! An edit commits a new immutable snapshot in the store. The renderer recomputes the
//! active view from that snapshot, embedding freshly derived values. From the preview,
//! the export adapter wraps the preview markup in a print document and hands it to an
//! injected [`export::PrintHost`].
//!
//! ## No I/O in the core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process. The only
//! I/O is done on request: `config` reads and writes `config.json`, and the print hosts
//! in `export` spool or write files.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for a session
//! - [`commands`]: Logic behind each session command
//! - [`model`]: The quote document and its field addressing
//! - [`store`]: Copy-on-write document store
//! - [`derive`]: Totals, amount in words, Indian number formatting, page counts
//! - [`render`]: Editor and preview rendering
//! - [`export`]: Print documents and print hosts
//! - [`gate`]: Session-scoped access gate
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing, the session loop and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod derive;
pub mod error;
pub mod export;
pub mod gate;
pub mod model;
pub mod render;
pub mod store;
