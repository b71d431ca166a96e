//! Sweep scheduler for bounded-parallel parameter sweeps.
//!
//! The scheduler walks the parameter domain, admits each value through the
//! [`AdmissionPool`], and runs one convergence computation per admitted value
//! on the blocking thread pool. Finished points go into a bounded channel;
//! a full channel blocks the worker that produced the point, and because the
//! worker keeps its permit until the send completes, a stalled consumer
//! throttles new admissions as well.
//!
//! Lifecycle: `Idle -> Sweeping -> Draining -> Done`. Cancellation only stops
//! admissions; computations already launched always run to completion and
//! deliver their point before `run` returns.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn, Instrument};
use uuid::Uuid;

use crate::domain::errors::{SweepError, SweepResult};
use crate::domain::models::{Outcome, Point, SchedulerState, SweepConfig, SweepReport};
use crate::domain::ports::{Recurrence, Simulation};
use crate::services::admission_pool::{AdmissionPermit, AdmissionPool};
use crate::services::convergence_engine::compute_point;
use crate::services::in_flight::{InFlightCounter, InFlightGuard};

/// Per-run counters updated by the workers.
#[derive(Debug, Default)]
struct WorkerStats {
    emitted: AtomicUsize,
    converged: AtomicUsize,
    exhausted: AtomicUsize,
    failed: AtomicUsize,
}

impl WorkerStats {
    fn record_emitted(&self, outcome: Outcome) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Outcome::Converged => self.converged.fetch_add(1, Ordering::Relaxed),
            Outcome::Exhausted => self.exhausted.fetch_add(1, Ordering::Relaxed),
        };
    }
}

/// One-shot engine that sweeps a parameter domain with at most K concurrent
/// computations and streams the resulting points.
pub struct SweepScheduler<R: Recurrence> {
    run_id: Uuid,
    config: Arc<SweepConfig>,
    recurrence: Arc<R>,
    pool: AdmissionPool,
    in_flight: InFlightCounter,
    points_tx: mpsc::Sender<Point>,
    points_rx: Mutex<Option<mpsc::Receiver<Point>>>,
    state: Arc<RwLock<SchedulerState>>,
    stats: Arc<WorkerStats>,
}

impl<R: Recurrence> SweepScheduler<R> {
    /// Validate `config` and build the pool, counter and point channel.
    pub fn new(config: SweepConfig, recurrence: R) -> SweepResult<Self> {
        config.validate()?;
        if !recurrence.accepts_initial(config.initial_population) {
            return Err(SweepError::InvalidInitialPopulation {
                value: config.initial_population,
                recurrence: recurrence.name(),
            });
        }

        let pool = AdmissionPool::new(config.max_concurrency)?;
        let (points_tx, points_rx) = mpsc::channel(config.channel_capacity);

        debug!(
            max_concurrency = config.max_concurrency,
            channel_capacity = config.channel_capacity,
            "admission pool ready"
        );

        Ok(Self {
            run_id: Uuid::new_v4(),
            config: Arc::new(config),
            recurrence: Arc::new(recurrence),
            pool,
            in_flight: InFlightCounter::new(),
            points_tx,
            points_rx: Mutex::new(Some(points_rx)),
            state: Arc::new(RwLock::new(SchedulerState::Idle)),
            stats: Arc::new(WorkerStats::default()),
        })
    }

    /// Hand out the receiving end of the point channel (first call only).
    ///
    /// The channel stays open while the scheduler is alive; it reports closed
    /// only after the scheduler and every worker have been dropped.
    pub fn take_point_receiver(&self) -> Option<mpsc::Receiver<Point>> {
        self.points_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Sweep the configured domain, then wait for every admitted computation.
    ///
    /// Returns when the domain is exhausted or `cancel` fires, and only after
    /// all launched computations have delivered their point and released their
    /// permit. A consumer that stops draining the channel makes this wait
    /// indefinitely; that is backpressure, not an error.
    ///
    /// The scheduler runs once. A second call returns
    /// [`SweepError::AlreadyStarted`].
    #[instrument(
        name = "sweep",
        skip(self, cancel),
        fields(run_id = %self.run_id, recurrence = self.recurrence.name())
    )]
    pub async fn run(&self, cancel: CancellationToken) -> SweepResult<SweepReport> {
        {
            let mut state = self.state.write().await;
            if *state != SchedulerState::Idle {
                return Err(SweepError::AlreadyStarted);
            }
            *state = SchedulerState::Sweeping;
        }

        let started = Instant::now();
        let sample_count = self.config.sample_count();
        info!(
            sample_count,
            range_start = self.config.range_start,
            range_end = self.config.range_end,
            step_size = self.config.step_size,
            max_concurrency = self.pool.capacity(),
            "sweep started"
        );

        let mut admitted = 0usize;
        let mut cancelled = false;
        let mut sweep_error = None;

        for parameter in self.config.parameters() {
            let permit = match self.pool.acquire(&cancel).await {
                Ok(Some(permit)) => permit,
                Ok(None) => {
                    cancelled = true;
                    warn!(admitted, sample_count, "cancellation observed, admissions stopped");
                    break;
                }
                Err(err) => {
                    error!(error = %err, "admission failed");
                    sweep_error = Some(err);
                    break;
                }
            };

            let guard = self.in_flight.enter();
            admitted += 1;
            debug!(parameter, in_flight = self.in_flight.current(), "admitted");
            self.launch(parameter, permit, guard);
        }

        self.set_state(SchedulerState::Draining).await;
        debug!(in_flight = self.in_flight.current(), "draining");
        self.in_flight.wait_idle().await;
        // Workers leave the in-flight count just before handing back their permit
        if let Err(err) = self.pool.wait_all_returned().await {
            sweep_error.get_or_insert(err);
        }
        self.set_state(SchedulerState::Done).await;

        if let Some(err) = sweep_error {
            return Err(err);
        }

        let report = SweepReport {
            run_id: self.run_id,
            sample_count,
            admitted,
            emitted: self.stats.emitted.load(Ordering::Acquire),
            converged: self.stats.converged.load(Ordering::Acquire),
            exhausted: self.stats.exhausted.load(Ordering::Acquire),
            failed: self.stats.failed.load(Ordering::Acquire),
            cancelled,
            peak_in_flight: self.in_flight.peak(),
            elapsed: started.elapsed(),
        };

        info!(
            admitted = report.admitted,
            emitted = report.emitted,
            converged = report.converged,
            exhausted = report.exhausted,
            failed = report.failed,
            cancelled = report.cancelled,
            elapsed_ms = u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            "sweep finished"
        );

        Ok(report)
    }

    /// Spawn the computation for one admitted parameter.
    ///
    /// The point is sent before anything is released. The in-flight entry is
    /// dropped before the permit, so a new admission can only be counted once
    /// the entry it replaces is gone and the count never exceeds the pool
    /// capacity.
    fn launch(&self, parameter: f64, permit: AdmissionPermit, guard: InFlightGuard) {
        let recurrence = Arc::clone(&self.recurrence);
        let config = Arc::clone(&self.config);
        let points_tx = self.points_tx.clone();
        let stats = Arc::clone(&self.stats);

        let worker = async move {
            let computed = tokio::task::spawn_blocking(move || {
                compute_point(recurrence.as_ref(), parameter, &config)
            })
            .await;

            match computed {
                Ok(point) => {
                    let outcome = point.outcome;
                    if points_tx.send(point).await.is_ok() {
                        stats.record_emitted(outcome);
                    } else {
                        debug!(parameter, "point receiver dropped, point discarded");
                    }
                }
                Err(err) => {
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                    error!(parameter, error = %err, "convergence computation failed");
                }
            }

            drop(guard);
            drop(permit);
        };

        tokio::spawn(worker.instrument(tracing::debug_span!("compute", parameter)));
    }

    async fn set_state(&self, next: SchedulerState) {
        let mut state = self.state.write().await;
        debug!(from = ?*state, to = ?next, "scheduler state change");
        *state = next;
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SchedulerState {
        *self.state.read().await
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Computations admitted and not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.current()
    }

    /// Free admission permits.
    pub fn available_permits(&self) -> usize {
        self.pool.available()
    }

    pub const fn max_concurrency(&self) -> usize {
        self.pool.capacity()
    }
}

#[async_trait]
impl<R: Recurrence> Simulation for SweepScheduler<R> {
    fn take_point_receiver(&self) -> Option<mpsc::Receiver<Point>> {
        Self::take_point_receiver(self)
    }

    async fn simulate(&self, cancel: CancellationToken) -> SweepResult<SweepReport> {
        self.run(cancel).await
    }
}
