//! Gesture bridge
//!
//! Turns the continuous mouth-openness ratio into discrete jump events.
//! Edge-triggered: one event per closed→open transition, nothing while the
//! mouth stays open.

use glam::Vec2;

/// Discrete command to start a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEvent;

/// Debounces the openness signal with a single latch
#[derive(Debug, Clone)]
pub struct GestureBridge {
    threshold: f32,
    /// Signal currently above threshold
    triggered: bool,
}

impl GestureBridge {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            triggered: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Feed one sample. `None` (or a non-finite sample) means no detection this
    /// tick: the latch is held and nothing is emitted.
    pub fn observe(&mut self, openness: Option<f32>) -> Option<JumpEvent> {
        let openness = openness.filter(|v| v.is_finite())?;

        if openness >= self.threshold {
            if !self.triggered {
                self.triggered = true;
                return Some(JumpEvent);
            }
        } else {
            self.triggered = false;
        }
        None
    }
}

/// Mouth openness from four face landmarks: lip gap normalized by face height.
///
/// Returns `None` when the face height is degenerate.
pub fn openness_from_landmarks(
    upper_lip: Vec2,
    lower_lip: Vec2,
    forehead: Vec2,
    chin: Vec2,
) -> Option<f32> {
    let face_height = forehead.distance(chin);
    if face_height <= f32::EPSILON {
        return None;
    }
    Some(upper_lip.distance(lower_lip) / face_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T: f32 = 0.17;

    fn count_events(bridge: &mut GestureBridge, samples: &[Option<f32>]) -> usize {
        samples
            .iter()
            .filter_map(|s| bridge.observe(*s))
            .count()
    }

    #[test]
    fn test_rising_edge_emits_once() {
        let mut bridge = GestureBridge::new(T);
        assert_eq!(bridge.observe(Some(0.05)), None);
        assert_eq!(bridge.observe(Some(0.3)), Some(JumpEvent));
        assert_eq!(bridge.observe(Some(0.4)), None);
        assert!(bridge.is_triggered());
    }

    #[test]
    fn test_threshold_counts_as_open() {
        let mut bridge = GestureBridge::new(T);
        assert_eq!(bridge.observe(Some(T)), Some(JumpEvent));
    }

    #[test]
    fn test_missing_sample_holds_latch() {
        let mut bridge = GestureBridge::new(T);
        bridge.observe(Some(0.5));
        assert_eq!(bridge.observe(None), None);
        assert!(bridge.is_triggered());
        // Still open after the gap: no second event
        assert_eq!(bridge.observe(Some(0.5)), None);

        let mut closed = GestureBridge::new(T);
        assert_eq!(closed.observe(None), None);
        assert!(!closed.is_triggered());
    }

    #[test]
    fn test_nan_treated_as_unavailable() {
        let mut bridge = GestureBridge::new(T);
        bridge.observe(Some(0.5));
        assert_eq!(bridge.observe(Some(f32::NAN)), None);
        assert!(bridge.is_triggered());
    }

    #[test]
    fn test_edge_retrigger() {
        let mut bridge = GestureBridge::new(T);
        let samples = [Some(0.3), Some(0.1), Some(0.3)];
        assert_eq!(count_events(&mut bridge, &samples), 2);
    }

    #[test]
    fn test_openness_from_landmarks() {
        let upper = Vec2::new(0.5, 0.60);
        let lower = Vec2::new(0.5, 0.70);
        let forehead = Vec2::new(0.5, 0.1);
        let chin = Vec2::new(0.5, 0.9);
        let ratio = openness_from_landmarks(upper, lower, forehead, chin).expect("face");
        assert!((ratio - 0.125).abs() < 1e-5);

        assert_eq!(
            openness_from_landmarks(upper, lower, forehead, forehead),
            None
        );
    }

    proptest! {
        #[test]
        fn prop_continuous_open_emits_exactly_one(
            samples in prop::collection::vec(T..10.0f32, 1..200)
        ) {
            let mut bridge = GestureBridge::new(T);
            let samples: Vec<_> = samples.into_iter().map(Some).collect();
            prop_assert_eq!(count_events(&mut bridge, &samples), 1);
        }

        #[test]
        fn prop_one_event_per_rising_edge(
            samples in prop::collection::vec(prop::option::of(0.0..0.5f32), 0..300)
        ) {
            // Reference count: rising edges over the samples that are present
            let mut open = false;
            let mut edges = 0;
            for v in samples.iter().flatten() {
                let now_open = *v >= T;
                if now_open && !open {
                    edges += 1;
                }
                open = now_open;
            }

            let mut bridge = GestureBridge::new(T);
            prop_assert_eq!(count_events(&mut bridge, &samples), edges);
        }
    }
}
