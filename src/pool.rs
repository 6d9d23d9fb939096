// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Runs a pool of sampling workers against one shared sampler.
//!
//! The workers run in a crossbeam scope, one thread each, borrowing
//! the sampler.  The calling thread becomes the coordinator: it waits
//! for a stop notification on a channel, waking up every so often to
//! hand the sampler to a periodic consumer (progress reports,
//! intermediate snapshots).  When the notification arrives, or the
//! sampler halts itself on reaching its sample limit, the coordinator
//! halts the workers and the scope joins them.  Each worker finishes
//! the orbit it is on, which is always safe: the density matrix only
//! ever counts up.

use crossbeam;
use crossbeam::channel::{Receiver, RecvTimeoutError};
use failure::Error;
use rand::thread_rng;
use std::time::{Duration, Instant};

use error::BuddhaError;
use sampler::Sampler;

/// How often the coordinator checks whether the sampler halted
/// itself.
const POLL: Duration = Duration::from_millis(25);

/// How a pool is run.
#[derive(Copy, Clone, Debug)]
pub struct PoolConfig {
    /// Number of worker threads.
    pub threads: usize,
    /// Time between calls to the periodic consumer.
    pub interval: Duration,
}

impl Default for PoolConfig {
    fn default() -> PoolConfig {
        PoolConfig {
            threads: ::num_cpus::get(),
            interval: Duration::from_secs(5),
        }
    }
}

/// Why the coordinator stopped waiting.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Stopped {
    /// A stop notification arrived, or every sender went away.
    Signalled,
    /// The sampler reached its sample limit.
    Exhausted,
}

fn coordinate<F>(
    sampler: &Sampler,
    stop: &Receiver<()>,
    interval: Duration,
    on_tick: &mut F,
) -> Result<Stopped, Error>
where
    F: FnMut(&Sampler) -> Result<(), Error>,
{
    let mut last = Instant::now();
    loop {
        match stop.recv_timeout(POLL) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return Ok(Stopped::Signalled),
            Err(RecvTimeoutError::Timeout) => {}
        }
        if sampler.is_halted() {
            return Ok(Stopped::Exhausted);
        }
        if last.elapsed() >= interval {
            on_tick(sampler)?;
            last = Instant::now();
        }
    }
}

/// Sample until told to stop.  Blocks the calling thread, which
/// serves as the coordinator, and returns once every worker has
/// exited.  The sampler is left halted.
///
/// An error from `on_tick` halts the pool and is returned.
pub fn run<F>(
    sampler: &Sampler,
    config: PoolConfig,
    stop: &Receiver<()>,
    mut on_tick: F,
) -> Result<Stopped, Error>
where
    F: FnMut(&Sampler) -> Result<(), Error>,
{
    let threads = config.threads.max(1);
    info!("Starting {} sampling workers", threads);
    let outcome = crossbeam::scope(|spawner| {
        for id in 0..threads {
            spawner.spawn(move |_| {
                let mut rng = thread_rng();
                sampler.work(&mut rng);
                debug!("Worker {} stopped", id);
            });
        }
        let stopped = coordinate(sampler, stop, config.interval, &mut on_tick);
        sampler.halt();
        stopped
    });

    match outcome {
        Ok(stopped) => stopped,
        Err(_) => Err(BuddhaError::WorkerPanicked.into()),
    }
}
