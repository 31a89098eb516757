//! # regerize
//!
//! Compiles rgr, a readable pattern-description language, into a regular
//! expression.
//!
//! ```text
//! <start>;
//! before {
//!     "www.";
//! };
//! some of <word>;   // the domain
//! ".com";
//! ```
//!
//! compiles to `^(?<=www\.)\w+\.com`.
//!
//! The pipeline lives in [`compiler`]; [`compile`] and [`compile_file`] are the
//! two entry points most callers need.

pub mod clause;
pub mod commands;
pub mod comments;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod imports;
pub mod lexing;
pub mod parsing;
pub mod resolving;

pub use compiler::{compile, compile_file, BlockMode, CompileOptions, Compiler};
pub use error::{CompileError, Result};
