//! Background task that ticks once per second while running.
//!
//! The task is a two-state loop. Idle waits for a start signal. Running races
//! the signal channel against a one-second sleep: the sleep winning emits a
//! tick, a stop signal winning returns to Idle. Start signals that arrive
//! while running are dropped and do not reset the current second.

use crate::types::PuzzleId;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Time between ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One elapsed second for a puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerTick {
    pub puzzle_id: PuzzleId,
}

#[derive(Debug)]
enum Signal {
    Start(PuzzleId),
    Stop,
}

/// Sends start/stop signals to the timer task
///
/// The task ends once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    signals: mpsc::UnboundedSender<Signal>,
}

impl TimerHandle {
    pub fn start(&self, puzzle_id: PuzzleId) {
        if self.signals.send(Signal::Start(puzzle_id)).is_err() {
            tracing::warn!(target: "crossword_core::timer", "timer task is gone");
        }
    }

    pub fn stop(&self) {
        if self.signals.send(Signal::Stop).is_err() {
            tracing::warn!(target: "crossword_core::timer", "timer task is gone");
        }
    }
}

/// Spawn the timer task on the current tokio runtime
///
/// Ticks are converted into the caller's event type so they share one queue
/// with every other event the caller handles.
pub fn spawn_timer<E>(events: mpsc::UnboundedSender<E>) -> (TimerHandle, JoinHandle<()>)
where
    E: From<TimerTick> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(rx, events));
    (TimerHandle { signals: tx }, task)
}

async fn run<E>(mut signals: mpsc::UnboundedReceiver<Signal>, events: mpsc::UnboundedSender<E>)
where
    E: From<TimerTick>,
{
    loop {
        // Idle
        let puzzle_id = match signals.recv().await {
            Some(Signal::Start(puzzle_id)) => puzzle_id,
            Some(Signal::Stop) => continue,
            None => return,
        };
        tracing::debug!(target: "crossword_core::timer", %puzzle_id, "timer running");

        // Running
        let sleep = time::sleep(TICK_INTERVAL);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                signal = signals.recv() => match signal {
                    Some(Signal::Stop) => break,
                    Some(Signal::Start(_)) => {}
                    None => return,
                },
                () = &mut sleep => {
                    let tick = TimerTick { puzzle_id: puzzle_id.clone() };
                    if events.send(E::from(tick)).is_err() {
                        return;
                    }
                    sleep.as_mut().reset(Instant::now() + TICK_INTERVAL);
                }
            }
        }
        tracing::debug!(target: "crossword_core::timer", %puzzle_id, "timer stopped");
    }
}
