//! Momentum scrolling over a one-dimensional integer offset.
//!
//! Pointer drags move the offset directly (drag follows finger); each move
//! also feeds an exponential moving average of instantaneous velocity. On
//! release the velocity decays by a fixed friction factor per ~16 ms tick,
//! producing the flick effect, until the surface comes to rest.

use std::time::Instant;

use tracing::trace;

/// EMA weight given to each new velocity sample (history gets the rest).
pub const VELOCITY_EMA: f64 = 0.5;
/// Minimum speed at release for a momentum phase to start.
pub const COAST_START: f64 = 0.01;
/// Speed below which a coasting surface snaps to rest.
pub const COAST_STOP: f64 = 0.05;
/// Per-tick velocity multiplier while coasting.
pub const FRICTION: f64 = 0.92;
/// Displacement integration interval, one timer tick.
pub const TICK_SECONDS: f64 = 0.016;

/// Drag/coast state of a [`ScrollSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollState {
    /// No input, no residual motion.
    Idle,
    /// Pointer held down; offset follows the pointer.
    Dragging,
    /// Pointer released with speed; offset driven by decaying velocity.
    Coasting,
}

/// Scroll position plus the velocity bookkeeping behind kinetic flicks.
///
/// Timestamps are injected by the caller rather than sampled internally so
/// the event loop stays in charge of time and tests can replay exact drag
/// sequences.
#[derive(Debug)]
pub struct ScrollSurface {
    offset: i32,
    max_offset: i32,
    velocity: f64,
    last_x: f64,
    last_event: Option<Instant>,
    state: ScrollState,
}

impl ScrollSurface {
    pub fn new(max_offset: i32) -> Self {
        Self {
            offset: 0,
            max_offset: max_offset.max(0),
            velocity: 0.0,
            last_x: 0.0,
            last_event: None,
            state: ScrollState::Idle,
        }
    }

    /// Current scroll offset, always within `0..=max_offset`.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Update the scrollable range, re-clamping the current offset.
    pub fn set_max_offset(&mut self, max_offset: i32) {
        self.max_offset = max_offset.max(0);
        self.offset = self.offset.clamp(0, self.max_offset);
    }

    /// Pointer pressed: cancel any in-flight momentum and anchor the drag.
    ///
    /// Reachable from every state; a press during coasting interrupts it.
    pub fn pointer_down(&mut self, x: f64, now: Instant) {
        self.velocity = 0.0;
        self.last_x = x;
        self.last_event = Some(now);
        self.state = ScrollState::Dragging;
    }

    /// Pointer moved while dragging: scroll by the delta and blend the
    /// instantaneous velocity into the running average.
    pub fn pointer_move(&mut self, x: f64, now: Instant) {
        if self.state != ScrollState::Dragging {
            return;
        }
        let delta = self.last_x - x;
        self.scroll_by(delta);

        // Whole-millisecond resolution: a burst of sub-ms events keeps the
        // previous velocity estimate instead of dividing by ~zero.
        if let Some(last) = self.last_event {
            let elapsed_ms = now.duration_since(last).as_millis() as u64;
            if elapsed_ms > 0 {
                let instant_velocity = delta * 1000.0 / elapsed_ms as f64;
                self.velocity =
                    self.velocity * (1.0 - VELOCITY_EMA) + instant_velocity * VELOCITY_EMA;
            }
        }
        self.last_x = x;
        self.last_event = Some(now);
    }

    /// Pointer released: start coasting if the drag ended with enough speed.
    pub fn pointer_up(&mut self) {
        if self.state != ScrollState::Dragging {
            return;
        }
        if self.velocity.abs() > COAST_START {
            self.state = ScrollState::Coasting;
            trace!(velocity = self.velocity, "momentum started");
        } else {
            self.state = ScrollState::Idle;
        }
    }

    /// One momentum timer tick. Returns `true` while coasting continues, so
    /// the host loop knows when to stop the timer.
    pub fn momentum_tick(&mut self) -> bool {
        if self.state != ScrollState::Coasting {
            return false;
        }
        self.velocity *= FRICTION;
        if self.velocity.abs() < COAST_STOP {
            self.velocity = 0.0;
            self.state = ScrollState::Idle;
            trace!("momentum settled");
            return false;
        }
        self.scroll_by(self.velocity * TICK_SECONDS);
        true
    }

    fn scroll_by(&mut self, delta: f64) {
        let target = self.offset as f64 + delta;
        self.offset = (target.round() as i32).clamp(0, self.max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn dragged(surface: &mut ScrollSurface, deltas: &[f64], step_ms: u64) {
        let t0 = Instant::now();
        let mut x = 500.0;
        surface.pointer_down(x, t0);
        for (i, d) in deltas.iter().enumerate() {
            // Positive delta scrolls forward, so the pointer moves left.
            x -= d;
            surface.pointer_move(x, t0 + Duration::from_millis(step_ms * (i as u64 + 1)));
        }
    }

    #[test]
    fn still_release_does_not_coast() {
        let mut surface = ScrollSurface::new(10_000);
        let t0 = Instant::now();
        surface.pointer_down(100.0, t0);
        surface.pointer_up();
        assert_eq!(surface.state(), ScrollState::Idle);
        assert_eq!(surface.offset(), 0);
        // Any momentum tick delivered late is a no-op.
        assert!(!surface.momentum_tick());
        assert_eq!(surface.offset(), 0);
    }

    #[test]
    fn zero_net_velocity_release_stays_put() {
        let mut surface = ScrollSurface::new(10_000);
        let t0 = Instant::now();
        surface.pointer_down(500.0, t0);
        // One pixel over three minutes: 0.005 px/s instantaneous, EMA 0.0025.
        surface.pointer_move(499.0, t0 + Duration::from_millis(200_000));
        assert!(surface.velocity().abs() <= COAST_START);
        let offset_at_release = surface.offset();
        surface.pointer_up();
        assert_eq!(surface.state(), ScrollState::Idle);
        for _ in 0..10 {
            surface.momentum_tick();
        }
        assert_eq!(surface.offset(), offset_at_release);
    }

    #[test]
    fn drag_follows_finger() {
        let mut surface = ScrollSurface::new(10_000);
        dragged(&mut surface, &[10.0, 15.0, 5.0], 16);
        assert_eq!(surface.offset(), 30);
        assert_eq!(surface.state(), ScrollState::Dragging);
    }

    #[test]
    fn velocity_is_ema_of_samples() {
        let mut surface = ScrollSurface::new(10_000);
        dragged(&mut surface, &[16.0], 16);
        // One sample: 16 px over 16 ms -> 1000 px/s, halved by the EMA.
        assert!((surface.velocity() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn flick_starts_momentum_and_decays_monotonically() {
        let mut surface = ScrollSurface::new(1_000_000);
        dragged(&mut surface, &[40.0, 40.0, 40.0], 16);
        assert!(surface.velocity() > COAST_START);
        surface.pointer_up();
        assert_eq!(surface.state(), ScrollState::Coasting);

        let mut previous_speed = surface.velocity().abs();
        let mut ticks = 0;
        while surface.momentum_tick() {
            let speed = surface.velocity().abs();
            assert!((speed - previous_speed * FRICTION).abs() < 1e-9);
            previous_speed = speed;
            ticks += 1;
            assert!(ticks < 1_000, "momentum never settled");
        }
        assert_eq!(surface.state(), ScrollState::Idle);
        assert_eq!(surface.velocity(), 0.0);
        assert!(surface.offset() > 120);
    }

    #[test]
    fn momentum_settles_within_bounded_ticks() {
        // From speed 100, rest is reached once 100 * 0.92^n < 0.05,
        // i.e. n > ln(0.0005) / ln(0.92) ~ 91.2.
        let bound = ((COAST_STOP / 100.0).ln() / FRICTION.ln()).ceil() as u32;
        let mut surface = ScrollSurface::new(1_000_000);
        // 3.2 px per 16 ms -> 200 px/s instantaneous -> EMA settles near 100+.
        dragged(&mut surface, &[1.6; 12], 16);
        assert!(surface.velocity() <= 110.0);
        surface.pointer_up();
        let mut ticks = 0;
        while surface.momentum_tick() {
            ticks += 1;
        }
        assert!(ticks <= bound, "settled in {ticks} ticks, bound {bound}");
    }

    #[test]
    fn pointer_down_interrupts_coasting() {
        let mut surface = ScrollSurface::new(10_000);
        dragged(&mut surface, &[40.0, 40.0], 16);
        surface.pointer_up();
        assert_eq!(surface.state(), ScrollState::Coasting);
        surface.pointer_down(300.0, Instant::now());
        assert_eq!(surface.state(), ScrollState::Dragging);
        assert_eq!(surface.velocity(), 0.0);
        assert!(!surface.momentum_tick());
    }

    #[test]
    fn offset_clamps_to_content_range() {
        let mut surface = ScrollSurface::new(50);
        let t0 = Instant::now();
        surface.pointer_down(500.0, t0);
        // Drag far past the end, then far before the start.
        surface.pointer_move(100.0, t0 + Duration::from_millis(16));
        assert_eq!(surface.offset(), 50);
        surface.pointer_move(900.0, t0 + Duration::from_millis(32));
        assert_eq!(surface.offset(), 0);
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut surface = ScrollSurface::new(400);
        let t0 = Instant::now();
        surface.pointer_down(500.0, t0);
        surface.pointer_move(200.0, t0 + Duration::from_millis(16));
        assert_eq!(surface.offset(), 300);
        surface.set_max_offset(120);
        assert_eq!(surface.offset(), 120);
    }
}
