//! One-shot numeric count-up animation.

use strum::Display;

/// Default animation length.
pub const DEFAULT_DURATION_MS: u64 = 2000;
/// Default tick interval, roughly one frame at 60 Hz.
pub const DEFAULT_TICK_MS: u64 = 16;

/// Lifecycle of a [`CountUpAnimation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AnimationState {
    #[strum(serialize = "running")]
    Running,
    #[strum(serialize = "completed")]
    Completed,
}

/// Counts a displayed integer from 0 up to `target` in fixed-size steps.
///
/// Each [`tick`](Self::tick) adds `step_size`; once the accumulator reaches
/// the target, or the tick budget of `ceil(duration / tick)` is spent, the
/// value is clamped to exactly `target` and the animation completes. The
/// displayed value is the floor of the accumulator, so it never decreases
/// and never passes the target.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUpAnimation {
    target: i64,
    step_size: f64,
    current: f64,
    elapsed_steps: u64,
    max_steps: u64,
    state: AnimationState,
}

impl CountUpAnimation {
    /// Create an animation. Negative targets are treated as 0.
    pub fn new(target: i64, duration_ms: u64, tick_ms: u64) -> Self {
        let target = target.max(0);
        let steps = (duration_ms as f64 / tick_ms.max(1) as f64).max(1.0);

        Self {
            target,
            step_size: target as f64 / steps,
            current: 0.0,
            elapsed_steps: 0,
            max_steps: steps.ceil() as u64,
            state: AnimationState::Running,
        }
    }

    /// Animation with the default 2 s duration and 16 ms tick.
    pub fn with_defaults(target: i64) -> Self {
        Self::new(target, DEFAULT_DURATION_MS, DEFAULT_TICK_MS)
    }

    /// Advance one tick and return the displayed value.
    ///
    /// Ticking a completed animation is a no-op.
    pub fn tick(&mut self) -> i64 {
        if self.is_complete() {
            return self.target;
        }

        self.elapsed_steps += 1;
        self.current += self.step_size;

        if self.current >= self.target as f64 || self.elapsed_steps >= self.max_steps {
            self.current = self.target as f64;
            self.state = AnimationState::Completed;
        }

        self.display_value()
    }

    /// Value currently shown: the accumulator rounded down.
    pub fn display_value(&self) -> i64 {
        (self.current.floor() as i64).min(self.target)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn elapsed_steps(&self) -> u64 {
        self.elapsed_steps
    }

    /// Upper bound on ticks before completion.
    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }

    pub fn remaining_ticks(&self) -> u64 {
        match self.state {
            AnimationState::Completed => 0,
            AnimationState::Running => self.max_steps - self.elapsed_steps,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == AnimationState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(anim: &mut CountUpAnimation) -> Vec<i64> {
        let mut shown = Vec::new();
        while !anim.is_complete() {
            shown.push(anim.tick());
        }
        shown
    }

    #[test]
    fn default_step_size() {
        let anim = CountUpAnimation::with_defaults(1500);
        assert_eq!(anim.step_size(), 12.0);
        assert_eq!(anim.max_steps(), 125);
    }

    #[test]
    fn reaches_target_exactly_and_never_decreases() {
        for target in [1, 7, 98, 1500, 15_000, 1_000_001] {
            let mut anim = CountUpAnimation::with_defaults(target);
            let shown = run_to_end(&mut anim);

            assert!(shown.windows(2).all(|w| w[0] <= w[1]), "target {target}");
            assert!(shown.iter().all(|v| *v <= target), "target {target}");
            assert_eq!(shown.last(), Some(&target));
            assert!(shown.len() as u64 <= anim.max_steps());
        }
    }

    #[test]
    fn zero_target_finishes_in_one_tick() {
        let mut anim = CountUpAnimation::with_defaults(0);
        assert_eq!(anim.tick(), 0);
        assert!(anim.is_complete());
        assert_eq!(anim.elapsed_steps(), 1);
    }

    #[test]
    fn negative_target_is_zero() {
        let mut anim = CountUpAnimation::with_defaults(-40);
        assert_eq!(anim.target(), 0);
        assert_eq!(anim.tick(), 0);
        assert!(anim.is_complete());
    }

    #[test]
    fn ticking_after_completion_is_noop() {
        let mut anim = CountUpAnimation::new(10, 32, 16);
        run_to_end(&mut anim);
        let steps = anim.elapsed_steps();

        assert_eq!(anim.tick(), 10);
        assert_eq!(anim.elapsed_steps(), steps);
        assert_eq!(anim.remaining_ticks(), 0);
    }

    #[test]
    fn duration_shorter_than_tick_completes_immediately() {
        let mut anim = CountUpAnimation::new(250, 5, 16);
        assert_eq!(anim.tick(), 250);
        assert!(anim.is_complete());
    }

    #[test]
    fn state_display() {
        assert_eq!(AnimationState::Running.to_string(), "running");
        assert_eq!(AnimationState::Completed.to_string(), "completed");
    }
}
