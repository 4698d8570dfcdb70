//! Streamcheck - streaming structural validation with pluggable policies
//!
//! Streamcheck ingests characters from a source (a literal string, a file, or
//! a piped reader) into a per-instance buffer and scans the buffer with one or
//! more pluggable policies. The shipped policy checks bracket pairing:
//! `()`, `{}`, and `[]` must nest correctly.
//!
//! The entry point is [`SyntaxChecker`]: construct it with a source and a list
//! of [`PolicyTag`]s, call [`SyntaxChecker::validate`] to run every configured
//! policy over a fresh ingest of the source, and [`SyntaxChecker::stop`] to
//! retire the instance.

pub mod buffer;
pub mod checker;
pub mod error;
pub mod policy;
pub mod result;
pub mod source;

pub use buffer::ScanBuffer;
pub use checker::{State, SyntaxChecker};
pub use error::{CheckError, Result};
pub use policy::{BracketPolicy, Policy, PolicyFactory, PolicyRegistry, PolicyTag};
pub use result::{PolicyResult, RunResult, Verdict};
pub use source::SourceMode;
