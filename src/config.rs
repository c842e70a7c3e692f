/// Iteration cap for the message-passing loop.
pub const DEFAULT_MAX_ITERS: usize = 100;

/// Summed L2 message change at or below which the loop stops.
pub const DEFAULT_TOLERANCE: f64 = 0.0001;

/// Termination settings for belief propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceConfig {
    pub max_iters: usize,
    pub tolerance: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_iters: DEFAULT_MAX_ITERS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl InferenceConfig {
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
