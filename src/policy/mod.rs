//! Pluggable validation policies
//!
//! A policy is a structural check over the scan buffer. Policies are selected
//! by [`PolicyTag`] and built fresh for every validation run by the
//! [`PolicyRegistry`], so their counters only ever describe one run's work.
//! Adding a policy means implementing [`Policy`] and registering a
//! tag/factory pair; there is no conditional dispatch.

pub mod brackets;
pub mod registry;

pub use brackets::BracketPolicy;
pub use registry::PolicyRegistry;

use serde::{Deserialize, Serialize};

use crate::buffer::ScanBuffer;
use crate::result::PolicyResult;
use crate::source::SourceMode;

/// Identifier associating a configured policy with its delegate factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyTag {
    /// Bracket-pair matching: `()`, `{}`, `[]`
    BracketPairs,
}

impl std::fmt::Display for PolicyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PolicyTag::BracketPairs => "bracket-pairs",
        };
        write!(f, "{name}")
    }
}

/// A pluggable structural check bound to a tag
///
/// A delegate is created at the start of a run and discarded at the end; the
/// counters it folds into its [`PolicyResult`] never span runs.
pub trait Policy: Send {
    /// The tag this delegate answers to
    fn tag(&self) -> PolicyTag;

    /// Scan the buffer and report a verdict plus counters
    fn scan(&mut self, buffer: &ScanBuffer, mode: SourceMode) -> PolicyResult;
}

/// Constructor for a fresh policy delegate
pub type PolicyFactory = fn() -> Box<dyn Policy>;
