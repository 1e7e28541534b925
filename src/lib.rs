//! scicalc: a calculator core with an interactive prompt and a JSON HTTP API.
//!
//! The [`calculator`] module holds the pure evaluator. [`repl`] and
//! [`server`] are thin surfaces over it.

pub mod calculator;
pub mod config;
pub mod eval;
pub mod repl;
pub mod server;

pub use calculator::{CalcError, Operation, evaluate};
pub use config::Config;
