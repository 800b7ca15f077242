//! Named computations.

use crate::builtins::register_builtins;
use crate::computation::Computation;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Computations looked up by name.
#[derive(Clone, Default)]
pub struct ComputationRegistry {
    entries: HashMap<String, Arc<dyn Computation>>,
}

impl ComputationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the stock computations of [`crate::builtins`].
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register `computation` under `name`, returning whatever it replaces.
    pub fn register<S, C>(&mut self, name: S, computation: C) -> Option<Arc<dyn Computation>>
    where
        S: Into<String>,
        C: Computation + 'static,
    {
        self.register_arc(name, Arc::new(computation))
    }

    pub fn register_arc<S: Into<String>>(
        &mut self,
        name: S,
        computation: Arc<dyn Computation>,
    ) -> Option<Arc<dyn Computation>> {
        self.entries.insert(name.into(), computation)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Computation>> {
        self.entries.get(name).cloned()
    }

    /// Like [`get`](Self::get), with an error naming the known computations.
    ///
    /// # Errors
    /// Fails when nothing is registered under `name`.
    pub fn require(&self, name: &str) -> Result<Arc<dyn Computation>> {
        self.get(name).ok_or_else(|| {
            anyhow!(
                "unknown computation '{name}' (known: {})",
                self.names().join(", ")
            )
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ComputationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputationRegistry")
            .field("names", &self.names())
            .finish()
    }
}
