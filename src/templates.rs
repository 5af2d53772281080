// SPDX-License-Identifier: PMPL-1.0-or-later
//! Template banks with pluggable index selection.
//!
//! A [`TemplateBank`] is an ordered list of templates plus an
//! [`IndexSelector`]. Production code picks at random; tests inject a
//! [`SeededSelector`] or [`FixedSelector`] for deterministic output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Chooses an index in `0..len`; `len` is never zero
pub trait IndexSelector: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Thread-local RNG, unseeded
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl IndexSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible sequence from a fixed seed
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl IndexSelector for SeededSelector {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always the same index (wrapped to the bank size)
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl IndexSelector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Ordered templates; `{name}` placeholders are filled by [`TemplateBank::render`]
#[derive(Clone)]
pub struct TemplateBank {
    templates: Vec<String>,
    selector: Arc<dyn IndexSelector>,
}

impl TemplateBank {
    pub fn new<I, S>(templates: I, selector: Arc<dyn IndexSelector>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
            selector,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Pick one template, `None` for an empty bank
    pub fn choose(&self) -> Option<&str> {
        if self.templates.is_empty() {
            return None;
        }
        let idx = self.selector.pick(self.templates.len());
        self.templates.get(idx).map(String::as_str)
    }

    /// Pick one template and substitute `{key}` placeholders
    pub fn render(&self, vars: &[(&str, &str)]) -> Option<String> {
        let template = self.choose()?;
        Some(vars.iter().fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{}}}", key), value)
        }))
    }
}

impl std::fmt::Debug for TemplateBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateBank")
            .field("templates", &self.templates.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(selector: Arc<dyn IndexSelector>) -> TemplateBank {
        TemplateBank::new(["first {x}", "second {x}", "third {x}"], selector)
    }

    #[test]
    fn test_fixed_selector_wraps() {
        let b = bank(Arc::new(FixedSelector(4)));
        assert_eq!(b.choose(), Some("second {x}"));
        assert_eq!(b.render(&[("x", "cat")]).as_deref(), Some("second cat"));
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let a = bank(Arc::new(SeededSelector::new(42)));
        let b = bank(Arc::new(SeededSelector::new(42)));
        let seq_a: Vec<_> = (0..10).map(|_| a.choose().map(str::to_string)).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.choose().map(str::to_string)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_random_selector_stays_in_bank() {
        let b = bank(Arc::new(RandomSelector));
        for _ in 0..50 {
            let picked = b.choose().expect("non-empty bank");
            assert!(b.templates().iter().any(|t| t == picked));
        }
    }

    #[test]
    fn test_empty_bank() {
        let b = TemplateBank::new(Vec::<String>::new(), Arc::new(RandomSelector));
        assert!(b.is_empty());
        assert_eq!(b.choose(), None);
        assert_eq!(b.render(&[]), None);
    }
}
