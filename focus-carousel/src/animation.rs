//! Time-based "scroll to position" animation.
//!
//! Animations are expressed purely in elapsed frame time over a total
//! duration; whoever drives the frame clock only has to call back with a
//! monotonically increasing timestamp in nanoseconds.

use std::time::Duration;

use crate::geometry::ScrollOffset;

/// Shortest scroll-to-position animation.
pub const MIN_DURATION: Duration = Duration::from_millis(200);
/// Upper bound for scroll-to-position animations.
pub const MAX_DURATION: Duration = Duration::from_millis(400);

/// Decelerating ease-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub(crate) fn easing(progress: f32) -> f32 {
    // Quadratic deceleration
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Duration for travelling `distance` pixels along an axis whose item unit is
/// `unit` pixels.
///
/// Moves of up to one unit take [`MIN_DURATION`]; a move shorter than one unit
/// is clamped up to it rather than shortened in proportion, so a 10 px nudge
/// takes as long as a full cell. Longer moves grow with the number of units
/// crossed, approaching but never exceeding [`MAX_DURATION`].
pub fn axis_duration(distance: f32, unit: f32) -> Duration {
    if unit <= f32::EPSILON || !distance.is_finite() {
        return MIN_DURATION;
    }
    let units = distance.abs() / unit;
    if units <= 1.0 {
        return MIN_DURATION;
    }
    let min = MIN_DURATION.as_secs_f32();
    let max = MAX_DURATION.as_secs_f32();
    let seconds = min + (max - min) * (1.0 - 1.0 / units);
    Duration::from_secs_f32(seconds).clamp(MIN_DURATION, MAX_DURATION)
}

/// Identifies one animation run.
///
/// Every new animation receives a fresh token; a frame delivered with a token
/// that no longer matches the running animation is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

impl AnimationToken {
    /// Raw generation number.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Result of delivering one frame to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The animation advanced and wants another frame.
    Running,
    /// The animation reached its target on this frame.
    Finished,
    /// The token does not belong to the running animation, nothing changed.
    Stale,
}

/// A running scroll-to-position animation.
pub(crate) struct ScrollAnimation {
    token: AnimationToken,
    target_position: usize,
    start: ScrollOffset,
    target: ScrollOffset,
    travel: ScrollOffset,
    duration: Duration,
    started_at_nanos: Option<u64>,
    on_finished: Option<Box<dyn FnOnce(usize)>>,
}

impl ScrollAnimation {
    pub(crate) fn new(
        token: AnimationToken,
        target_position: usize,
        start: ScrollOffset,
        target: ScrollOffset,
        unit: ScrollOffset,
    ) -> Self {
        let travel = ScrollOffset {
            horizontal: target.horizontal - start.horizontal,
            vertical: target.vertical - start.vertical,
        };
        let duration = axis_duration(travel.horizontal, unit.horizontal)
            .max(axis_duration(travel.vertical, unit.vertical));
        Self {
            token,
            target_position,
            start,
            target,
            travel,
            duration,
            started_at_nanos: None,
            on_finished: None,
        }
    }

    pub(crate) fn with_on_finished(mut self, on_finished: Box<dyn FnOnce(usize)>) -> Self {
        self.on_finished = Some(on_finished);
        self
    }

    pub(crate) fn token(&self) -> AnimationToken {
        self.token
    }

    pub(crate) fn target_position(&self) -> usize {
        self.target_position
    }

    pub(crate) fn duration(&self) -> Duration {
        self.duration
    }

    pub(crate) fn take_on_finished(&mut self) -> Option<Box<dyn FnOnce(usize)>> {
        self.on_finished.take()
    }

    /// Final offsets of the animation.
    pub(crate) fn target(&self) -> ScrollOffset {
        self.target
    }

    /// Samples the offsets for `frame_nanos`. The first sampled frame starts
    /// the clock. Returns the offsets and whether the animation is complete.
    pub(crate) fn sample(&mut self, frame_nanos: u64) -> (ScrollOffset, bool) {
        let started = *self.started_at_nanos.get_or_insert(frame_nanos);
        let elapsed = frame_nanos.saturating_sub(started);
        let total = self.duration.as_nanos().max(1) as f64;
        let raw = (elapsed as f64 / total) as f32;
        if raw >= 1.0 {
            return (self.target(), true);
        }
        let eased = easing(raw);
        let offset = ScrollOffset {
            horizontal: self.start.horizontal + self.travel.horizontal * eased,
            vertical: self.start.vertical + self.travel.vertical * eased,
        };
        (offset, false)
    }
}

/// Hands out animation tokens; each call invalidates the previous one.
#[derive(Debug, Default)]
pub(crate) struct TokenSource {
    generation: u64,
}

impl TokenSource {
    pub(crate) fn next(&mut self) -> AnimationToken {
        self.generation = self.generation.wrapping_add(1);
        AnimationToken(self.generation)
    }
}
