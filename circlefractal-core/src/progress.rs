use serde::{Deserialize, Serialize};

/// Progress of an ongoing render, counted in pixels.
///
/// Observers receive a non-decreasing sequence of these; `completed == total`
/// is only ever published for a render that succeeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderProgress {
    pub completed: u64,
    pub total: u64,
}

impl RenderProgress {
    /// Create new progress tracker.
    pub fn new(completed: u64, total: u64) -> Self {
        Self { completed, total }
    }

    /// Progress at the start of a render of `total` pixels.
    pub fn start(total: u64) -> Self {
        Self::new(0, total)
    }

    /// Completion as a fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Calculate completion percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        self.fraction() * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_progress_starts_at_zero() {
        let progress = RenderProgress::start(100);
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.total, 100);
        assert!(!progress.is_complete());
    }

    #[test]
    fn fraction_calculation() {
        let progress = RenderProgress::new(50, 100);
        assert!((progress.fraction() - 0.5).abs() < 1e-12);
        assert!((progress.percentage() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_zero_total() {
        let progress = RenderProgress::default();
        assert_eq!(progress.fraction(), 0.0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn complete_when_all_pixels_done() {
        assert!(RenderProgress::new(64, 64).is_complete());
    }

    #[test]
    fn serializes_as_plain_pair() {
        let json = serde_json::to_string(&RenderProgress::new(3, 9)).unwrap();
        assert_eq!(json, r#"{"completed":3,"total":9}"#);
    }
}
