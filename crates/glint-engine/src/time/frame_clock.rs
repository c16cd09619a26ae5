use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp of this frame.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone, Copy)]
enum Source {
    /// Wall clock, delta clamped to `[dt_min, dt_max]`.
    Realtime { dt_min: Duration, dt_max: Duration },
    /// Every tick advances by exactly `step`, independent of wall time.
    FixedStep { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// One clock per loop, so independent loops do not share delta-time state.
/// Realtime clocks clamp delta time to avoid pathological values after a
/// debugger pause or a stall; fixed-step clocks make offline rendering and
/// tests deterministic.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    source: Source,
}

impl FrameClock {
    /// Creates a realtime clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a realtime clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            source: Source::Realtime { dt_min, dt_max },
        }
    }

    /// Creates a clock whose timestamps advance by `step` per tick.
    pub fn fixed_step(step: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            source: Source::FixedStep { step },
        }
    }

    /// Fixed-step clock at `fps` frames per second (at least 1).
    pub fn fixed_rate(fps: u32) -> Self {
        Self::fixed_step(Duration::from_secs(1) / fps.max(1))
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let (now, dt) = match self.source {
            Source::Realtime { dt_min, dt_max } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(self.last).clamp(dt_min, dt_max);
                (now, dt)
            }
            Source::FixedStep { step } => (self.last + step, step),
        };

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
