//! Named counters for forwarded driver calls

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Counter {
    counters: HashMap<&'static str, usize>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &'static str, value: usize) {
        *self.counters.entry(name).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counters.values().sum()
    }

    pub fn reset_all(&mut self) {
        self.counters.clear();
    }

    /// Counts ordered by name.
    pub fn sorted(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<_> = self.counters.iter().map(|(k, v)| (*k, *v)).collect();
        counts.sort_unstable_by_key(|(name, _)| *name);
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_total() {
        let mut counter = Counter::new();
        counter.increment("glBindVertexArray", 1);
        counter.increment("glBindVertexArray", 2);
        counter.increment("glDeleteBuffers", 1);
        assert_eq!(counter.get("glBindVertexArray"), 3);
        assert_eq!(counter.total(), 4);
        assert_eq!(
            counter.sorted(),
            vec![("glBindVertexArray", 3), ("glDeleteBuffers", 1)]
        );
    }

    #[test]
    fn test_reset_all() {
        let mut counter = Counter::new();
        counter.increment("glFlush", 1);
        counter.reset_all();
        assert_eq!(counter.get("glFlush"), 0);
    }
}
