use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag flipped once the widget instance is disposed.
#[derive(Clone, Debug, Default)]
pub struct LivenessToken {
    disposed: Arc<AtomicBool>,
}

impl LivenessToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    /// `false` once any clone has disposed the funnel; messages are dropped from then on.
    pub fn is_alive(&self) -> bool {
        !self.disposed.load(Ordering::Acquire)
    }
}
