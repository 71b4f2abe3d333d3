use std::time::Duration;

use super::*;

/// Slowest supported playback speed
pub const MIN_SPEED: f64 = 0.25;

/// Fastest supported playback speed
pub const MAX_SPEED: f64 = 4.0;

/// Time between two steps at speed `1.0`
pub const BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// A cursor over a finished trace.
///
/// The player never recomputes anything: playing, pausing and seeking only move the cursor.
/// Time is supplied by the caller through [`TracePlayer::tick`], so the player works with any
/// timer (animation frames, a test clock, ...).
///
/// ```
/// use std::time::Duration;
/// use graph_trace::{prelude::*, algo::*, trace::TracePlayer};
///
/// let graph = Graph::from_edges(3, true, [(0, 1), (1, 2), (2, 0)]);
/// let mut player = TracePlayer::from(detect_cycle(&graph, true));
///
/// player.play();
/// assert_eq!(player.tick(Duration::from_millis(2500)), 2);
/// assert_eq!(player.position(), 2);
///
/// player.seek(usize::MAX);
/// assert!(player.is_at_end());
/// ```
#[derive(Debug, Clone)]
pub struct TracePlayer {
    steps: Vec<Step>,
    cursor: usize,
    playing: bool,
    speed: f64,
    elapsed: Duration,
}

impl From<AlgorithmResult> for TracePlayer {
    fn from(result: AlgorithmResult) -> Self {
        Self::new(result.steps)
    }
}

impl TracePlayer {
    /// Creates a paused player positioned at the first step
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            cursor: 0,
            playing: false,
            speed: 1.0,
            elapsed: Duration::ZERO,
        }
    }

    /// The step under the cursor (`None` for an empty trace)
    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns *true* if the cursor is on the last step
    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 >= self.steps.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Moves one step forward. Returns *false* if already at the end.
    pub fn step_forward(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Moves one step backward. Returns *false* if already at the start.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Jumps to step `index`, clamped to the trace
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.steps.len().saturating_sub(1));
        self.elapsed = Duration::ZERO;
    }

    /// Jumps back to the first step
    pub fn rewind(&mut self) {
        self.seek(0);
    }

    /// Starts playback; a player at the end starts over
    pub fn play(&mut self) {
        if self.is_at_end() {
            self.rewind();
        }
        self.playing = !self.steps.is_empty();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the playback speed, clamped to `[MIN_SPEED, MAX_SPEED]`
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_nan() {
            1.0
        } else {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        };
    }

    /// Time between two steps at the current speed
    pub fn interval(&self) -> Duration {
        BASE_INTERVAL.div_f64(self.speed)
    }

    /// Advances the cursor by the time passed since the last tick.
    /// Returns the number of steps moved. Playback stops on the last step.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        if !self.playing {
            return 0;
        }

        self.elapsed += elapsed;
        let interval = self.interval();

        let mut moved = 0;
        while self.elapsed >= interval && self.step_forward() {
            self.elapsed -= interval;
            moved += 1;
        }

        if self.is_at_end() {
            self.playing = false;
            self.elapsed = Duration::ZERO;
        }

        moved
    }
}
