//! Single-owner live feed actor.
//!
//! One tokio task owns the rolling window, the current sample, and the RNG;
//! everything else talks to it over channels. Append-and-evict therefore
//! never races a correlation read, and there is no lock to hold across a
//! tick.

use chrono::Utc;
use helio_core::generator;
use helio_core::series::{LiveSample, LiveWindow};
use helio_core::trend::{combined_trend, TrendSummary};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::debug;

use crate::config::FeedConfig;

/// One broadcast frame: the latest reading, the retained window, and the
/// trend block computed over it.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub current: LiveSample,
    pub historical: Vec<LiveSample>,
    pub trends: TrendSummary,
}

enum Command {
    Subscribe {
        reply: oneshot::Sender<(Snapshot, broadcast::Receiver<Snapshot>)>,
    },
    Unsubscribe,
    SolarEvent,
}

/// Cloneable handle to the feed task.
#[derive(Clone)]
pub struct LiveFeed {
    commands: mpsc::UnboundedSender<Command>,
}

impl LiveFeed {
    /// Spawn the feed task and return a handle to it.
    pub fn spawn(config: FeedConfig) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(config, command_rx));
        Self { commands }
    }

    /// Attach a subscriber. The returned subscription yields one immediate
    /// snapshot, then every broadcast until dropped. Returns `None` if the
    /// feed task is gone.
    pub async fn subscribe(&self) -> Option<Subscription> {
        let (reply, response) = oneshot::channel();
        self.commands.send(Command::Subscribe { reply }).ok()?;
        let (snapshot, updates) = response.await.ok()?;
        Some(Subscription {
            initial: Some(snapshot),
            updates,
            commands: self.commands.clone(),
        })
    }

    /// Force a solar flare into the current reading and broadcast it.
    /// Returns false if the feed task is gone.
    pub fn trigger_solar_event(&self) -> bool {
        self.commands.send(Command::SolarEvent).is_ok()
    }
}

/// Active subscription; dropping it detaches from the feed, and detaching
/// the last subscriber idles the periodic ticks.
pub struct Subscription {
    initial: Option<Snapshot>,
    updates: broadcast::Receiver<Snapshot>,
    commands: mpsc::UnboundedSender<Command>,
}

impl Subscription {
    /// Next snapshot: the immediate one first, then each broadcast in
    /// order. Returns `None` once the feed task has shut down.
    pub async fn next(&mut self) -> Option<Snapshot> {
        if let Some(snapshot) = self.initial.take() {
            return Some(snapshot);
        }
        loop {
            match self.updates.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged behind the feed");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Unsubscribe);
    }
}

async fn run(config: FeedConfig, mut commands: mpsc::UnboundedReceiver<Command>) {
    let mut rng = match config.rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let now = Utc::now();
    let mut window = generator::seed_history(&mut rng, now, config.seed_hours, config.capacity);
    let mut current = generator::live_sample(&mut rng, &config.generator, now);

    let (updates, _) = broadcast::channel(32);
    let mut subscribers = 0usize;
    let trend_window = config.trend_window.max(1);

    let mut refresh = time::interval(Duration::from_secs(config.refresh_secs.max(1)));
    let mut append = time::interval(Duration::from_secs(config.append_secs.max(1)));
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
    append.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Subscribe { reply }) => {
                    if subscribers == 0 {
                        // Ticks were idle; start both periods from now.
                        refresh.reset();
                        append.reset();
                    }
                    subscribers += 1;
                    let frame = snapshot(&window, &current, trend_window);
                    let _ = reply.send((frame, updates.subscribe()));
                    debug!(subscribers, "Subscriber attached");
                }
                Some(Command::Unsubscribe) => {
                    subscribers = subscribers.saturating_sub(1);
                    debug!(subscribers, "Subscriber detached");
                }
                Some(Command::SolarEvent) => {
                    current.solar_flux = f64::from(rng.gen_range(150u32..200));
                    current.geomagnetic = rng.gen_range(7..=9);
                    let _ = updates.send(snapshot(&window, &current, trend_window));
                }
                None => break,
            },
            _ = refresh.tick(), if subscribers > 0 => {
                current = generator::live_sample(&mut rng, &config.generator, Utc::now());
                let _ = updates.send(snapshot(&window, &current, trend_window));
            }
            _ = append.tick(), if subscribers > 0 => {
                window.push(LiveSample { timestamp: Utc::now(), ..current });
                let _ = updates.send(snapshot(&window, &current, trend_window));
            }
        }
    }
}

/// A short window yields the all-zero trend block rather than an error;
/// the feed keeps broadcasting while history fills.
fn snapshot(window: &LiveWindow, current: &LiveSample, trend_window: usize) -> Snapshot {
    Snapshot {
        current: *current,
        historical: window.to_vec(),
        trends: combined_trend(window, trend_window).unwrap_or_default(),
    }
}
