//! Fault injection for provider responses
//!
//! Every collection call is numbered. The call number drives a sinusoidal
//! delay and a periodic failure, and in `random_number` mode the response
//! is cut to a random non-empty prefix.

use std::f64::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use pets_core::Pets;
use rand::Rng;

use crate::config::{DelayConfig, Mode, ProviderConfig};

/// What to do with one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPlan {
    /// 1-based call number
    pub call: u64,
    pub delay: Duration,
    pub fail: bool,
}

/// Per-provider fault injector
#[derive(Debug)]
pub struct FaultInjector {
    mode: Mode,
    frequency_error: u64,
    delay: DelayConfig,
    calls: AtomicU64,
}

impl FaultInjector {
    pub fn new(mode: Mode, frequency_error: u64, delay: DelayConfig) -> Self {
        Self {
            mode,
            frequency_error,
            delay,
            calls: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.mode, config.frequency_error, config.delay)
    }

    /// Count one call and return its number
    pub fn record_call(&self) -> u64 {
        self.calls.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Calls counted so far
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Count a call and decide its delay and outcome
    pub fn plan(&self) -> CallPlan {
        let call = self.record_call();
        CallPlan {
            call,
            delay: self.delay_for(call),
            fail: self.should_fail(call),
        }
    }

    /// Cut `pets` to a random length in `1..=len` in `random_number` mode
    pub fn trim<R: Rng + ?Sized>(&self, pets: &mut Pets, rng: &mut R) {
        if self.mode != Mode::RandomNumber || pets.items.is_empty() {
            return;
        }
        let keep = rng.gen_range(1..=pets.items.len());
        pets.items.truncate(keep);
        pets.total = keep as u64;
    }

    /// `amplitude * |sin(call * pi / (2 * period))|` seconds, in whole milliseconds
    pub fn delay_for(&self, call: u64) -> Duration {
        if self.delay.period == 0 {
            return Duration::ZERO;
        }
        let y = call as f64 * PI / (2 * self.delay.period) as f64;
        let millis = y.sin().abs() * self.delay.amplitude * 1000.0;
        Duration::from_millis(millis as u64)
    }

    pub fn should_fail(&self, call: u64) -> bool {
        self.frequency_error > 0 && call % self.frequency_error == 0
    }
}
