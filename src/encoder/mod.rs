//! Quadrature encoder polling thread.
//!
//! An [`Encoder`] owns two input pins and a background thread that polls
//! them, feeding a [`QuadratureDecoder`] and maintaining a signed position
//! count. The count is an independent cross-check on open-loop step
//! counting; it is not fed back into step correction.

mod decoder;

pub use decoder::{QuadratureDecoder, Transition, QUADRATURE_STATES};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use embedded_hal::digital::InputPin;

use crate::config::EncoderConfig;
use crate::error::{EncoderError, Result};

/// Default pause between polls of the quadrature pins.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(200);

/// A gate that opens once a full polling loop has elapsed.
struct CycleGate {
    passed: Mutex<bool>,
    condvar: Condvar,
}

impl CycleGate {
    fn new() -> Self {
        Self {
            passed: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    fn open(&self) {
        let mut passed = self.passed.lock().unwrap_or_else(|e| e.into_inner());
        *passed = true;
        self.condvar.notify_all();
    }

    fn wait(&self, timeout: Duration) -> bool {
        let mut passed = self.passed.lock().unwrap_or_else(|e| e.into_inner());
        while !*passed {
            let (guard, result) = self
                .condvar
                .wait_timeout(passed, timeout)
                .unwrap_or_else(|e| e.into_inner());
            passed = guard;
            if result.timed_out() {
                return *passed;
            }
        }
        true
    }
}

/// State shared between the encoder handle and its polling thread.
struct EncoderShared {
    /// Signed quadrature position count.
    count: Mutex<i64>,
    /// Number of ambiguous double transitions skipped.
    missed_transitions: AtomicU64,
    /// Cooperative exit flag, checked once per loop.
    exit: AtomicBool,
    /// Gates registered by waiters; drained at the start of each loop and
    /// opened at its end.
    cycle_gates: Mutex<Vec<Arc<CycleGate>>>,
}

/// Handle to a quadrature encoder and its polling thread.
pub struct Encoder {
    shared: Arc<EncoderShared>,
    worker: Option<JoinHandle<()>>,
    positions_per_revolution: u32,
}

impl Encoder {
    /// Spawn an encoder polling the given pins.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::SpawnFailed`] if the polling thread could
    /// not be started.
    pub fn new<A, B>(pin_a: A, pin_b: B, positions_per_revolution: u32, invert: bool) -> Result<Self>
    where
        A: InputPin + Send + 'static,
        B: InputPin + Send + 'static,
    {
        Self::with_poll_interval(pin_a, pin_b, positions_per_revolution, invert, DEFAULT_POLL_INTERVAL)
    }

    /// Spawn an encoder from configuration.
    pub fn from_config<A, B>(pin_a: A, pin_b: B, config: &EncoderConfig) -> Result<Self>
    where
        A: InputPin + Send + 'static,
        B: InputPin + Send + 'static,
    {
        Self::new(pin_a, pin_b, config.positions_per_revolution, config.invert)
    }

    /// Spawn an encoder with an explicit polling interval.
    pub fn with_poll_interval<A, B>(
        pin_a: A,
        pin_b: B,
        positions_per_revolution: u32,
        invert: bool,
        poll_interval: Duration,
    ) -> Result<Self>
    where
        A: InputPin + Send + 'static,
        B: InputPin + Send + 'static,
    {
        let shared = Arc::new(EncoderShared {
            count: Mutex::new(0),
            missed_transitions: AtomicU64::new(0),
            exit: AtomicBool::new(false),
            cycle_gates: Mutex::new(Vec::new()),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("encoder".into())
            .spawn(move || poll_loop(pin_a, pin_b, worker_shared, invert, poll_interval))
            .map_err(|_| EncoderError::SpawnFailed)?;

        Ok(Self {
            shared,
            worker: Some(worker),
            positions_per_revolution,
        })
    }

    /// Current position in revolutions.
    pub fn revolutions(&self) -> f64 {
        self.count() as f64 / f64::from(self.positions_per_revolution)
    }

    /// Current signed quadrature position count.
    pub fn count(&self) -> i64 {
        *self
            .shared
            .count
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Number of ambiguous double transitions observed and skipped.
    pub fn missed_transitions(&self) -> u64 {
        self.shared.missed_transitions.load(Ordering::SeqCst)
    }

    /// Reset the position count to zero.
    pub fn reset_position(&self) {
        *self
            .shared
            .count
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = 0;
    }

    /// Block until at least one full polling loop has elapsed.
    ///
    /// A loop that was already in flight when this is called does not
    /// count, so an update that raced with the caller cannot be missed.
    /// Returns `false` if the timeout expired first.
    pub fn wait_for_cycle(&self, timeout: Duration) -> bool {
        let gate = Arc::new(CycleGate::new());
        self.shared
            .cycle_gates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::clone(&gate));
        gate.wait(timeout)
    }

    /// Request a cooperative stop and join the polling thread.
    ///
    /// Termination latency is bounded by one polling interval.
    pub fn exit(&mut self) {
        self.shared.exit.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("encoder polling thread panicked");
            }
        }
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        self.exit();
    }
}

fn poll_loop<A, B>(
    mut pin_a: A,
    mut pin_b: B,
    shared: Arc<EncoderShared>,
    invert: bool,
    poll_interval: Duration,
) where
    A: InputPin,
    B: InputPin,
{
    let initial_a = pin_a.is_high().unwrap_or(false);
    let initial_b = pin_b.is_high().unwrap_or(false);
    let mut decoder = QuadratureDecoder::new(initial_a, initial_b, invert);

    while !shared.exit.load(Ordering::SeqCst) {
        // Gates registered after this point wait for the next full loop.
        let gates: Vec<_> = shared
            .cycle_gates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect();

        let sample = (pin_a.is_high(), pin_b.is_high());
        let (a, b) = match sample {
            (Ok(a), Ok(b)) => (a, b),
            _ => {
                log::error!("encoder pin read failed; stopping polling loop");
                for gate in &gates {
                    gate.open();
                }
                break;
            }
        };

        match decoder.update(a, b) {
            Transition::Step(delta) => {
                *shared.count.lock().unwrap_or_else(|e| e.into_inner()) += i64::from(delta);
            }
            Transition::Missed => {
                shared.missed_transitions.fetch_add(1, Ordering::SeqCst);
                log::debug!("encoder missed a transition; count not updated");
            }
            Transition::Unchanged => {}
        }

        for gate in &gates {
            gate.open();
        }

        std::thread::sleep(poll_interval);
    }

    // Open anything still waiting so exit never strands a waiter.
    let gates: Vec<_> = shared
        .cycle_gates
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .drain(..)
        .collect();
    for gate in &gates {
        gate.open();
    }
}
