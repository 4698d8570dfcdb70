//! Policy registry - maps tags to delegate factories
//!
//! The checker resolves every configured tag against the registry at
//! construction time, before any run starts, so a misconfigured tag can never
//! reach a scan.

use std::collections::HashMap;

use crate::error::{CheckError, Result};
use crate::policy::{BracketPolicy, Policy, PolicyFactory, PolicyTag};

/// Maps a [`PolicyTag`] to a factory that builds a fresh delegate per run
pub struct PolicyRegistry {
    factories: HashMap<PolicyTag, PolicyFactory>,
}

impl PolicyRegistry {
    /// Create an empty registry with no policies registered
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register (or replace) the factory for a tag
    pub fn register(&mut self, tag: PolicyTag, factory: PolicyFactory) {
        self.factories.insert(tag, factory);
    }

    /// Check whether a tag has a registered factory
    pub fn contains(&self, tag: PolicyTag) -> bool {
        self.factories.contains_key(&tag)
    }

    /// Look up the factory for a tag
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::UnknownPolicy`] when no factory is registered for
    /// `tag`.
    pub fn resolve(&self, tag: PolicyTag) -> Result<PolicyFactory> {
        self.factories
            .get(&tag)
            .copied()
            .ok_or(CheckError::UnknownPolicy(tag))
    }
}

impl Default for PolicyRegistry {
    /// Registry with all shipped policies registered
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(PolicyTag::BracketPairs, || {
            Box::new(BracketPolicy::new()) as Box<dyn Policy>
        });
        registry
    }
}
