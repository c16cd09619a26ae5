use std::fmt;
use std::time::{Duration, Instant};

use super::CubicBezier;

/// What happens when an iteration ends and the driver repeats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RepeatMode {
    /// Jump back to the start value.
    #[default]
    Restart,
    /// Run the next iteration backwards.
    Reverse,
}

/// How many times the driver repeats after its first iteration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RepeatCount {
    Infinite,
    Times(u32),
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Times(0)
    }
}

/// Timing configuration of an [`AnimationDriver`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DriverTiming {
    /// Length of one iteration.
    pub duration: Duration,
    /// Value reported at eased fraction 0.
    pub from: f32,
    /// Value reported at eased fraction 1.
    pub to: f32,
    pub easing: CubicBezier,
    pub repeat_mode: RepeatMode,
    pub repeat_count: RepeatCount,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            from: 0.0,
            to: 1.0,
            easing: CubicBezier::LINEAR,
            repeat_mode: RepeatMode::Restart,
            repeat_count: RepeatCount::Times(0),
        }
    }
}

/// Linear progress at some elapsed time.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Progress {
    iteration: u64,
    /// Position inside `iteration`, in [0, 1].
    fraction: f64,
    finished: bool,
}

impl DriverTiming {
    fn progress(&self, elapsed: Duration) -> Progress {
        let duration = self.duration.as_nanos();
        if duration == 0 {
            return Progress {
                iteration: 0,
                fraction: 1.0,
                finished: matches!(self.repeat_count, RepeatCount::Times(_)),
            };
        }

        let elapsed = elapsed.as_nanos();
        let iteration = elapsed / duration;
        let rem = elapsed % duration;

        if let RepeatCount::Times(n) = self.repeat_count {
            if iteration > n as u128 {
                return Progress { iteration: n as u64, fraction: 1.0, finished: true };
            }
        }

        // An exact boundary reports the end of the iteration that just
        // completed rather than the start of the next one.
        if rem == 0 && iteration > 0 {
            return Progress {
                iteration: (iteration - 1) as u64,
                fraction: 1.0,
                finished: false,
            };
        }

        Progress {
            iteration: iteration as u64,
            fraction: rem as f64 / duration as f64,
            finished: false,
        }
    }
}

/// Snapshot passed to update listeners on every tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DriverUpdate {
    /// Eased progress in [0, 1].
    pub fraction: f32,
    /// `from + (to - from) * fraction`.
    pub value: f32,
    pub iteration: u64,
}

/// Handle returned by [`AnimationDriver::add_update_listener`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum State {
    Idle,
    /// `start` is latched on the first tick after [`AnimationDriver::start`].
    Running { start: Option<Instant> },
}

type UpdateListener = Box<dyn FnMut(DriverUpdate)>;

/// Host-ticked progress source.
///
/// The driver does not own a timer: the host delivers frame timestamps via
/// [`tick`](Self::tick), and every tick while running recomputes the eased
/// fraction and notifies update listeners. After [`cancel`](Self::cancel)
/// returns, ticks are ignored and no listener runs.
///
/// State machine: `Idle → Running` on `start`, `Running → Idle` on `cancel`
/// or when a finite repeat count is exhausted.
pub struct AnimationDriver {
    timing: DriverTiming,
    state: State,
    fraction: f32,
    iteration: u64,
    listeners: Vec<(ListenerId, UpdateListener)>,
    next_listener: u64,
}

impl AnimationDriver {
    pub fn new(timing: DriverTiming) -> Self {
        Self {
            timing,
            state: State::Idle,
            fraction: 0.0,
            iteration: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[inline]
    pub fn timing(&self) -> &DriverTiming {
        &self.timing
    }

    /// Starts from the beginning. Calling this while running restarts.
    pub fn start(&mut self) {
        self.state = State::Running { start: None };
        self.fraction = 0.0;
        self.iteration = 0;
    }

    /// Stops delivering updates. The current fraction is kept.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Eased progress of the current iteration, in [0, 1].
    #[inline]
    pub fn animated_fraction(&self) -> f32 {
        self.fraction
    }

    /// Current value between `timing.from` and `timing.to`.
    #[inline]
    pub fn animated_value(&self) -> f32 {
        self.timing.from + (self.timing.to - self.timing.from) * self.fraction
    }

    #[inline]
    pub fn current_iteration(&self) -> u64 {
        self.iteration
    }

    /// Advances to `now` and notifies listeners.
    ///
    /// Returns `false` without side effects when the driver is idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        let start = match &mut self.state {
            State::Idle => return false,
            State::Running { start } => *start.get_or_insert(now),
        };

        let p = self.timing.progress(now.saturating_duration_since(start));
        let linear = match self.timing.repeat_mode {
            RepeatMode::Reverse if p.iteration % 2 == 1 => 1.0 - p.fraction,
            _ => p.fraction,
        };

        self.iteration = p.iteration;
        self.fraction = self.timing.easing.ease(linear as f32);
        if p.finished {
            log::trace!("driver finished after {} iteration(s)", p.iteration + 1);
            self.state = State::Idle;
        }

        let update = DriverUpdate {
            fraction: self.fraction,
            value: self.animated_value(),
            iteration: self.iteration,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(update);
        }
        true
    }

    // ── listeners ─────────────────────────────────────────────────────────

    pub fn add_update_listener(&mut self, listener: impl FnMut(DriverUpdate) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_update_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn remove_all_update_listeners(&mut self) {
        self.listeners.clear();
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("timing", &self.timing)
            .field("state", &self.state)
            .field("fraction", &self.fraction)
            .field("iteration", &self.iteration)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
