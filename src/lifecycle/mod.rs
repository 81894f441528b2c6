//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Init logging → Build probe/reporters/engine
//!
//! Run:
//!     engine.run_all() raced against signals.rs (Ctrl-C abandons the run)
//!     → exit.rs maps the summary to a process exit code
//! ```

pub mod exit;
pub mod signals;
pub mod startup;

pub use exit::exit_code;
pub use startup::{bootstrap, Monitor, StartupError, StartupOptions};
