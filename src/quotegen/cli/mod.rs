//! # CLI
//!
//! The terminal client for quotegen: **one possible UI**, not the application itself.
//! It is the only code that reads stdin, writes stdout/stderr or decides exit codes.
//!
//! ## Sessions
//!
//! `quotegen` (or `quotegen session`) starts a session with a freshly seeded quote. When
//! gate credentials are configured the session is locked: on a terminal the user is
//! prompted for a username and password, otherwise the first command must be `login`.
//! The quote lives only as long as the session.
//!
//! Session commands are read one per line (see [`session`]). A failing command prints
//! its error and the session carries on.
//!
//! ## One-shot commands
//!
//! - `quotegen render --script <file>` replays editing commands and writes one rendition
//!   (editor panel, preview outline or the print document).
//! - `quotegen config [key] [value]` reads or writes `config.json`.
//!
//! ## Module Structure
//!
//! - `commands`: command selection, handlers and the session loop
//! - `session`: the session command language
//! - `render`: printing command results
//! - `setup`: argument parsing via clap
//! - `logging`: the tracing subscriber

mod commands;
mod logging;
mod render;
mod session;
pub mod setup;

pub use commands::run;
