//! GL Capabilities Metrics - call counting for forwarded driver calls
//!
//! Counters vanish entirely without the `metrics` feature: the stub types
//! keep the same API and every method is a no-op.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable counting (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use glcaps_metrics::Counter;
//!
//! let mut counter = Counter::new();
//! counter.increment("glBindVertexArray", 1);
//! assert_eq!(counter.get("glBindVertexArray"), 1);
//! ```

#[cfg(feature = "metrics")]
mod counter;

#[cfg(feature = "metrics")]
pub use counter::Counter;

/// Execute code only when metrics are enabled
#[macro_export]
macro_rules! metrics {
    ($($tt:tt)*) => {
        #[cfg(feature = "metrics")]
        {
            $($tt)*
        }
    };
}

/// True when this build counts calls.
pub const ENABLED: bool = cfg!(feature = "metrics");

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct Counter;

#[cfg(not(feature = "metrics"))]
impl Counter {
    pub fn new() -> Self { Self }
    pub fn increment(&mut self, _name: &'static str, _value: usize) {}
    pub fn get(&self, _name: &str) -> usize { 0 }
    pub fn total(&self) -> usize { 0 }
    pub fn reset_all(&mut self) {}
    pub fn sorted(&self) -> Vec<(&'static str, usize)> { Vec::new() }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_counter_api_compiles_either_way() {
        let mut counter = super::Counter::new();
        counter.increment("glFlush", 2);
        if super::ENABLED {
            assert_eq!(counter.get("glFlush"), 2);
        } else {
            assert_eq!(counter.get("glFlush"), 0);
        }
        counter.reset_all();
        assert_eq!(counter.total(), 0);
    }
}
