/*!
Sources of environment variables.

The flag set only ever reads the environment through [`EnvSource`], so that
tests and embedders can resolve flags against a fixed set of variables
instead of the real process environment.
*/

use std::collections::HashMap;

/// Something that environment variables can be looked up in.
pub trait EnvSource {
    /// Get the value of the variable called `name`, if there is one.
    fn get(&self, name: &str) -> Option<String>;
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    #[inline]
    fn get(&self, name: &str) -> Option<String> {
        E::get(self, name)
    }
}

/// The real process environment. Variables whose values aren't valid UTF-8
/// are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    #[inline]
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed map of environment variables.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl EnvSource for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MockEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
