//! Synthetic cursor event driver
//!
//! Emits a bounded run of press/release pairs at random normalized
//! positions, pacing every emission with a fixed delay.

use crate::cursor_types::{CursorEvent, Phase};
use crate::error::{Error, Result};
use crate::sink::CursorSink;
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound (exclusive) of the random depth on a press
const MAX_DEPTH: f64 = 0.25;

/// How the depth (z) of a release event is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDepth {
    /// Release always lifts to z = 0.0
    #[default]
    Zero,
    /// Release depth is drawn like a press, from [0, 0.25)
    Random,
}

/// Parameters for a single driver run
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Number of press/release pairs
    pub count: u32,
    /// Pause after every emitted event
    pub delay: Duration,
    /// Cursor identifier carried by every event
    pub id: String,
    pub release_depth: ReleaseDepth,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            count: 10,
            delay: Duration::from_millis(100),
            id: "0".to_string(),
            release_depth: ReleaseDepth::Zero,
        }
    }
}

impl DriverConfig {
    pub fn new(count: u32, delay: Duration) -> Self {
        Self {
            count,
            delay,
            ..Default::default()
        }
    }

    /// Set the delay from a number of seconds, rejecting values a `Duration`
    /// cannot hold (negative, non-finite, or too large)
    pub fn with_delay_secs(mut self, secs: f64) -> Result<Self> {
        self.delay = Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidDelay(secs))?;
        Ok(self)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_release_depth(mut self, release_depth: ReleaseDepth) -> Self {
        self.release_depth = release_depth;
        self
    }
}

/// Blocking pause between emissions
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Real-time sleeper backed by `std::thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Totals reported after a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: u32,
    pub events: u32,
}

/// Drive `config.count` press/release pairs into `sink`.
///
/// Every event is followed by `config.delay`, including the last release,
/// so a run performs exactly `2 * count` sleeps. The first sink error ends
/// the run and is returned unchanged.
pub fn run<R, S, K>(
    config: &DriverConfig,
    rng: &mut R,
    sleeper: &mut S,
    sink: &mut K,
) -> Result<RunSummary>
where
    R: Rng,
    S: Sleeper + ?Sized,
    K: CursorSink + ?Sized,
{
    info!(
        count = config.count,
        delay_ms = config.delay.as_millis() as u64,
        id = %config.id,
        "Starting cursor run"
    );

    let mut events = 0;
    for pair in 0..config.count {
        for phase in [Phase::Press, Phase::Release] {
            let event = random_event(config, phase, rng);
            debug!(
                pair,
                phase = phase.as_str(),
                x = event.x,
                y = event.y,
                z = event.z,
                "Sending cursor event"
            );
            sink.submit(&event)?;
            events += 1;
            sleeper.sleep(config.delay);
        }
    }

    let summary = RunSummary {
        pairs: config.count,
        events,
    };
    info!(pairs = summary.pairs, events = summary.events, "Cursor run finished");
    Ok(summary)
}

/// Re-send recorded events in order, pausing `delay` after each one.
///
/// Sessions store only the run's delay, not per-event timestamps, so the
/// replay paces uniformly. This reproduces the recorded timing because
/// `run` itself paces every event by the same delay.
pub fn replay<S, K>(
    events: &[CursorEvent],
    delay: Duration,
    sleeper: &mut S,
    sink: &mut K,
) -> Result<RunSummary>
where
    S: Sleeper + ?Sized,
    K: CursorSink + ?Sized,
{
    info!(events = events.len(), "Replaying cursor events");

    let mut summary = RunSummary { pairs: 0, events: 0 };
    for event in events {
        sink.submit(event)?;
        summary.events += 1;
        if event.phase == Phase::Release {
            summary.pairs += 1;
        }
        sleeper.sleep(delay);
    }

    info!(pairs = summary.pairs, events = summary.events, "Replay finished");
    Ok(summary)
}

/// Build one event at a fresh random position
fn random_event<R: Rng>(config: &DriverConfig, phase: Phase, rng: &mut R) -> CursorEvent {
    let x: f64 = rng.gen();
    let y: f64 = rng.gen();
    let z = match (phase, config.release_depth) {
        (Phase::Release, ReleaseDepth::Zero) => 0.0,
        _ => rng.gen::<f64>() * MAX_DEPTH,
    };

    CursorEvent {
        id: config.id.clone(),
        phase,
        x,
        y,
        z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    /// Virtual clock: records requested sleeps without blocking
    #[derive(Default)]
    struct VirtualClock {
        elapsed: Duration,
        sleeps: usize,
    }

    impl Sleeper for VirtualClock {
        fn sleep(&mut self, duration: Duration) {
            self.elapsed += duration;
            self.sleeps += 1;
        }
    }

    /// Sink that fails on the nth submission
    struct FailingSink {
        seen: usize,
        fail_at: usize,
    }

    impl CursorSink for FailingSink {
        fn submit(&mut self, _event: &CursorEvent) -> Result<()> {
            if self.seen == self.fail_at {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "sink closed",
                )));
            }
            self.seen += 1;
            Ok(())
        }
    }

    fn run_recorded(config: &DriverConfig, seed: u64) -> (Vec<CursorEvent>, VirtualClock) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut clock = VirtualClock::default();
        let mut sink = RecordingSink::new();
        run(config, &mut rng, &mut clock, &mut sink).unwrap();
        (sink.into_events(), clock)
    }

    #[test]
    fn test_emits_two_events_per_pair_alternating() {
        let config = DriverConfig::new(7, Duration::ZERO);
        let (events, _) = run_recorded(&config, 1);

        assert_eq!(events.len(), 14);
        for (i, event) in events.iter().enumerate() {
            let expected = if i % 2 == 0 { Phase::Press } else { Phase::Release };
            assert_eq!(event.phase, expected, "event {} out of order", i);
            assert_eq!(event.id, "0");
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        let config = DriverConfig::new(500, Duration::ZERO).with_release_depth(ReleaseDepth::Random);
        let (events, _) = run_recorded(&config, 42);

        for event in &events {
            assert!((0.0..1.0).contains(&event.x), "x out of range: {}", event.x);
            assert!((0.0..1.0).contains(&event.y), "y out of range: {}", event.y);
            assert!((0.0..MAX_DEPTH).contains(&event.z), "z out of range: {}", event.z);
        }
    }

    #[test]
    fn test_release_depth_zero() {
        let config = DriverConfig::new(50, Duration::ZERO);
        let (events, _) = run_recorded(&config, 3);

        assert!(events
            .iter()
            .filter(|e| e.phase == Phase::Release)
            .all(|e| e.z == 0.0));
        assert!(events
            .iter()
            .filter(|e| e.phase == Phase::Press)
            .any(|e| e.z > 0.0));
    }

    #[test]
    fn test_release_depth_random() {
        let config = DriverConfig::new(50, Duration::ZERO).with_release_depth(ReleaseDepth::Random);
        let (events, _) = run_recorded(&config, 3);

        assert!(events
            .iter()
            .filter(|e| e.phase == Phase::Release)
            .any(|e| e.z > 0.0));
    }

    #[test]
    fn test_zero_count_does_nothing() {
        let config = DriverConfig::new(0, Duration::from_secs(5));
        let mut rng = StdRng::seed_from_u64(0);
        let mut clock = VirtualClock::default();
        let mut sink = RecordingSink::new();
        let start = Instant::now();

        let summary = run(&config, &mut rng, &mut clock, &mut sink).unwrap();

        assert_eq!(summary, RunSummary { pairs: 0, events: 0 });
        assert!(sink.events().is_empty());
        assert_eq!(clock.sleeps, 0);
        assert_eq!(clock.elapsed, Duration::ZERO);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_delay_follows_every_event() {
        let config = DriverConfig::new(10, Duration::ZERO)
            .with_delay_secs(0.2)
            .unwrap();
        let (events, clock) = run_recorded(&config, 9);

        assert_eq!(events.len(), 20);
        assert_eq!(clock.sleeps, 20);
        assert!(clock.elapsed >= Duration::from_millis(3800));
        assert_eq!(clock.elapsed, config.delay * 20);
    }

    #[test]
    fn test_real_time_pacing() {
        let config = DriverConfig::new(10, Duration::from_millis(5));
        let mut rng = StdRng::seed_from_u64(5);
        let mut sink = RecordingSink::new();
        let start = Instant::now();

        run(&config, &mut rng, &mut ThreadSleeper, &mut sink).unwrap();

        assert_eq!(sink.events().len(), 20);
        assert!(start.elapsed() >= Duration::from_millis(95));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = DriverConfig::new(25, Duration::ZERO).with_release_depth(ReleaseDepth::Random);
        let (first, _) = run_recorded(&config, 1234);
        let (second, _) = run_recorded(&config, 1234);
        let (other, _) = run_recorded(&config, 4321);

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_sink_error_stops_run() {
        let config = DriverConfig::new(10, Duration::ZERO);
        let mut rng = StdRng::seed_from_u64(0);
        let mut clock = VirtualClock::default();
        let mut sink = FailingSink { seen: 0, fail_at: 3 };

        let result = run(&config, &mut rng, &mut clock, &mut sink);

        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(sink.seen, 3);
        assert_eq!(clock.sleeps, 3);
    }

    #[test]
    fn test_replay_resends_in_order() {
        let config = DriverConfig::new(4, Duration::ZERO);
        let (recorded, _) = run_recorded(&config, 11);

        let mut clock = VirtualClock::default();
        let mut sink = RecordingSink::new();
        let summary = replay(&recorded, Duration::from_millis(50), &mut clock, &mut sink).unwrap();

        assert_eq!(summary, RunSummary { pairs: 4, events: 8 });
        assert_eq!(sink.events(), recorded.as_slice());
        assert_eq!(clock.elapsed, Duration::from_millis(400));
    }

    #[test]
    fn test_invalid_delay_rejected() {
        assert!(matches!(
            DriverConfig::default().with_delay_secs(-0.1),
            Err(Error::InvalidDelay(_))
        ));
        assert!(DriverConfig::default().with_delay_secs(f64::NAN).is_err());
        assert!(DriverConfig::default().with_delay_secs(f64::INFINITY).is_err());
        assert!(matches!(
            DriverConfig::default().with_delay_secs(1e20),
            Err(Error::InvalidDelay(_))
        ));

        let config = DriverConfig::default().with_delay_secs(0.0).unwrap();
        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn test_custom_id_carried() {
        let config = DriverConfig::new(2, Duration::ZERO).with_id("pad-a");
        let (events, _) = run_recorded(&config, 0);
        assert!(events.iter().all(|e| e.id == "pad-a"));
    }
}
