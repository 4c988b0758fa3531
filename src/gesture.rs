use std::time::{Duration, Instant};

/// Progress below this is not drawn, so quick double-clicks don't flash the ring
pub const RING_DEAD_ZONE: f32 = 0.07;

/// Where a long-press outside the pad currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Holding { started: Instant },
    /// Threshold reached; latched until the pointer is released or a new hold begins
    MenuOpened,
}

/// Result of advancing the gesture by one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoldEvent {
    None,
    Progress(f32),
    OpenMenu,
}

/// Long-press state machine: Idle -> Holding -> (MenuOpened | Idle)
#[derive(Clone, Debug)]
pub struct HoldGesture {
    state: HoldState,
    progress: f32,
    threshold: Duration,
}

impl HoldGesture {
    pub fn new(threshold: Duration) -> Self {
        Self {
            state: HoldState::Idle,
            progress: 0.0,
            threshold,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn begin(&mut self, now: Instant) {
        tracing::debug!("[Gesture] Hold started");
        self.state = HoldState::Holding { started: now };
        self.progress = 0.0;
    }

    /// Advance the hold. Returns `OpenMenu` exactly once per hold session.
    pub fn tick(&mut self, now: Instant) -> HoldEvent {
        let HoldState::Holding { started } = self.state else {
            return HoldEvent::None;
        };

        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.threshold {
            tracing::debug!("[Gesture] Hold threshold reached after {:?}", elapsed);
            self.state = HoldState::MenuOpened;
            self.progress = 0.0;
            return HoldEvent::OpenMenu;
        }

        self.progress = if self.threshold.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.threshold.as_secs_f32()).clamp(0.0, 1.0)
        };
        HoldEvent::Progress(self.progress)
    }

    /// Pointer released: back to Idle from any state
    pub fn release(&mut self) {
        if self.state != HoldState::Idle {
            tracing::debug!("[Gesture] Hold released");
        }
        self.state = HoldState::Idle;
        self.progress = 0.0;
    }
}

/// Visual parameters of the hold progress ring drawn around the pad
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldRing {
    /// 0.3 ..= 1.0
    pub alpha: f32,
    /// 2.0 ..= 12.0 px
    pub stroke_width: f32,
}

impl HoldRing {
    /// `None` inside the dead zone; above it the ring is remapped to start from zero
    pub fn from_progress(progress: f32) -> Option<Self> {
        if progress <= RING_DEAD_ZONE {
            return None;
        }
        let adjusted = ((progress - RING_DEAD_ZONE) / (1.0 - RING_DEAD_ZONE)).clamp(0.0, 1.0);
        Some(Self {
            alpha: 0.3 + adjusted * 0.7,
            stroke_width: 2.0 + adjusted * 10.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: Duration = Duration::from_millis(3000);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // === State transitions ===

    #[test]
    fn test_menu_opens_once_at_first_tick_past_threshold() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::new(THRESHOLD);
        gesture.begin(t0);

        let mut opened_at = Vec::new();
        for step in 1..=400u64 {
            let now = t0 + ms(step * 16);
            if gesture.tick(now) == HoldEvent::OpenMenu {
                opened_at.push(step * 16);
            }
        }

        // 188 * 16 = 3008 is the first tick >= 3000
        assert_eq!(opened_at, vec![3008]);
        assert_eq!(gesture.state(), HoldState::MenuOpened);
    }

    #[test]
    fn test_progress_is_elapsed_over_threshold() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::new(THRESHOLD);
        gesture.begin(t0);

        match gesture.tick(t0 + ms(1500)) {
            HoldEvent::Progress(p) => assert!((p - 0.5).abs() < 1e-4),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(gesture.state(), HoldState::Holding { started: t0 });
    }

    #[test]
    fn test_release_resets_and_blocks_pending_tick() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::new(THRESHOLD);
        gesture.begin(t0);
        gesture.tick(t0 + ms(2000));
        assert!(gesture.progress() > 0.0);

        gesture.release();
        assert_eq!(gesture.progress(), 0.0);
        assert_eq!(gesture.state(), HoldState::Idle);

        // A tick that was already scheduled arrives late
        assert_eq!(gesture.tick(t0 + ms(3500)), HoldEvent::None);
    }

    #[test]
    fn test_release_after_menu_returns_to_idle() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::new(THRESHOLD);
        gesture.begin(t0);
        assert_eq!(gesture.tick(t0 + THRESHOLD), HoldEvent::OpenMenu);
        gesture.release();
        assert_eq!(gesture.state(), HoldState::Idle);
    }

    #[test]
    fn test_new_hold_after_menu_can_open_again() {
        let t0 = Instant::now();
        let mut gesture = HoldGesture::new(THRESHOLD);
        gesture.begin(t0);
        assert_eq!(gesture.tick(t0 + THRESHOLD), HoldEvent::OpenMenu);

        let t1 = t0 + ms(10_000);
        gesture.begin(t1);
        assert_eq!(gesture.tick(t1 + THRESHOLD), HoldEvent::OpenMenu);
    }

    // === Ring rendering ===

    #[test]
    fn test_ring_dead_zone() {
        assert!(HoldRing::from_progress(0.0).is_none());
        assert!(HoldRing::from_progress(RING_DEAD_ZONE).is_none());
        assert!(HoldRing::from_progress(0.08).is_some());
    }

    #[test]
    fn test_ring_full_progress() {
        let ring = HoldRing::from_progress(1.0).unwrap();
        assert!((ring.alpha - 1.0).abs() < 1e-5);
        assert!((ring.stroke_width - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_ring_starts_near_zero_after_dead_zone() {
        let ring = HoldRing::from_progress(RING_DEAD_ZONE + 0.0001).unwrap();
        assert!((ring.alpha - 0.3).abs() < 1e-3);
        assert!((ring.stroke_width - 2.0).abs() < 1e-2);
    }
}
