//! Result types - immutable outcome records for one validation run
//!
//! Each configured policy contributes one [`PolicyResult`]; the engine
//! aggregates them, in configuration order, into a [`RunResult`].

use serde::{Deserialize, Serialize};

use crate::policy::PolicyTag;
use crate::source::SourceMode;

/// Structural verdict of one policy's scan
///
/// `Invalid` is a normal outcome, not an error: it reports that the scan found
/// malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    /// Check whether this verdict is `Valid`
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verdict::Valid => "valid",
            Verdict::Invalid => "invalid",
        };
        write!(f, "{name}")
    }
}

/// Immutable record of one policy's scan over one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResult {
    tag: PolicyTag,
    verdict: Verdict,
    validations_performed: u32,
    chars_scanned: usize,
    mode: SourceMode,
}

impl PolicyResult {
    /// Create a result record; called by policy delegates at the end of a scan
    pub fn new(
        tag: PolicyTag,
        verdict: Verdict,
        validations_performed: u32,
        chars_scanned: usize,
        mode: SourceMode,
    ) -> Self {
        Self {
            tag,
            verdict,
            validations_performed,
            chars_scanned,
            mode,
        }
    }

    /// The policy that produced this record
    pub fn tag(&self) -> PolicyTag {
        self.tag
    }

    /// The structural verdict of the scan
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Scans performed during the run; zero when the buffer was empty
    pub fn validations_performed(&self) -> u32 {
        self.validations_performed
    }

    /// Characters actually examined, honoring first-error-wins short-circuiting
    pub fn chars_scanned(&self) -> usize {
        self.chars_scanned
    }

    /// The source mode active when the scan ran
    pub fn mode(&self) -> SourceMode {
        self.mode
    }
}

impl std::fmt::Display for PolicyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "policy={} verdict={} runs={} chars={} mode={}",
            self.tag, self.verdict, self.validations_performed, self.chars_scanned, self.mode
        )
    }
}

/// Ordered collection of per-policy results for one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    results: Vec<PolicyResult>,
}

impl RunResult {
    /// Create an empty run result
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, result: PolicyResult) {
        self.results.push(result);
    }

    /// Per-policy results in configuration order
    pub fn policy_results(&self) -> &[PolicyResult] {
        &self.results
    }

    /// Check whether every configured policy reported `Valid`
    pub fn all_valid(&self) -> bool {
        self.results.iter().all(|r| r.verdict().is_valid())
    }

    /// Number of per-policy results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check whether the run produced no per-policy results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{result}")?;
        }
        Ok(())
    }
}
