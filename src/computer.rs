//! The mission computer: owns every subsystem and both sensor producers,
//! spawns one periodic task per unit, and carries the shared state slot
//! plus the failover flag.
//!
//! Synchronization policy: the shared [`VehicleState`] lives behind an
//! `RwLock` and is only ever replaced wholesale under the write lock.
//! Consumers clone under the read lock, so a snapshot is always complete
//! and internally consistent, and a failover swap becomes visible within
//! one producer period.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::journal::Journals;
use crate::source::{SensorSuite, StateSource};
use crate::state::{Vec3, VehicleState};
use crate::subsystems::{
    BiteStatus, BuiltInTest, Communication, ControlCommands, FlightControl, FlightMode,
    Maintenance, ModeMonitor, Navigation, PowerManagement, PowerStatus, RouteState,
    ScenarioInjector, Security, Subsystem, ThreatLevel,
};
use crate::subsystems::navigation::DEFAULT_DESTINATION;
use crate::validator;

/// Periods and tuning for every periodic task. The defaults mirror the
/// update rates of the simulated avionics suite: fast inner loops for
/// sensing and control, slow outer loops for self-test and scenarios.
#[derive(Debug, Clone)]
pub struct ComputerConfig {
    pub sensor_period: Duration,
    pub flight_control_period: Duration,
    pub navigation_period: Duration,
    pub mode_monitor_period: Duration,
    pub comms_period: Duration,
    pub power_period: Duration,
    pub security_period: Duration,
    pub maintenance_period: Duration,
    pub bite_period: Duration,
    pub scenario_period: Duration,
    pub destination: Vec3,
    /// Fixed seed for replayable runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Dropout probability of the primary sensor feed, per tick.
    pub primary_dropout: f64,
}

impl Default for ComputerConfig {
    fn default() -> Self {
        Self {
            sensor_period: Duration::from_millis(10),
            flight_control_period: Duration::from_millis(10),
            navigation_period: Duration::from_millis(10),
            mode_monitor_period: Duration::from_secs(1),
            comms_period: Duration::from_secs(2),
            power_period: Duration::from_secs(3),
            security_period: Duration::from_secs(5),
            maintenance_period: Duration::from_secs(5),
            bite_period: Duration::from_secs(10),
            scenario_period: Duration::from_secs(15),
            destination: DEFAULT_DESTINATION,
            seed: None,
            primary_dropout: 0.0,
        }
    }
}

fn task_rng(seed: Option<u64>, stream: u64) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(stream)),
        None => SmallRng::from_os_rng(),
    }
}

pub struct MissionComputer {
    config: ComputerConfig,
    shared: Arc<RwLock<VehicleState>>,
    failover: Arc<AtomicBool>,
    journals: Arc<Journals>,

    primary_source: Option<Box<dyn StateSource>>,
    backup_source: Option<Box<dyn StateSource>>,

    flight_control: Arc<Mutex<FlightControl>>,
    navigation: Arc<Mutex<Navigation>>,
    bite: Arc<Mutex<BuiltInTest>>,
    comms: Arc<Mutex<Communication>>,
    power: Arc<Mutex<PowerManagement>>,
    security: Arc<Mutex<Security>>,
    mode_monitor: Arc<Mutex<ModeMonitor>>,
    maintenance: Arc<Mutex<Maintenance>>,
    scenario: Arc<Mutex<ScenarioInjector>>,

    shutdown: Option<watch::Sender<bool>>,
    tasks: Vec<JoinHandle<()>>,
}

impl MissionComputer {
    pub fn new(config: ComputerConfig) -> Self {
        let journals = Arc::new(Journals::new());
        let seed = config.seed;

        Self {
            shared: Arc::new(RwLock::new(VehicleState::default())),
            failover: Arc::new(AtomicBool::new(false)),
            primary_source: None,
            backup_source: None,
            flight_control: Arc::new(Mutex::new(FlightControl::new())),
            navigation: Arc::new(Mutex::new(Navigation::new(config.destination))),
            bite: Arc::new(Mutex::new(BuiltInTest::new(
                Arc::clone(&journals),
                task_rng(seed, 2),
            ))),
            comms: Arc::new(Mutex::new(Communication::new(
                Arc::clone(&journals),
                task_rng(seed, 3),
            ))),
            power: Arc::new(Mutex::new(PowerManagement::new(task_rng(seed, 4)))),
            security: Arc::new(Mutex::new(Security::new(
                Arc::clone(&journals),
                task_rng(seed, 5),
            ))),
            mode_monitor: Arc::new(Mutex::new(ModeMonitor::new())),
            maintenance: Arc::new(Mutex::new(Maintenance::new(Arc::clone(&journals)))),
            scenario: Arc::new(Mutex::new(ScenarioInjector::new(
                Arc::clone(&journals),
                task_rng(seed, 6),
            ))),
            journals,
            config,
            shutdown: None,
            tasks: Vec::new(),
        }
    }

    /// Builds a computer around caller-supplied producers instead of the
    /// default random sensor suites. This is the data-source seam: a real
    /// telemetry feed plugs in here.
    pub fn with_sources(
        config: ComputerConfig,
        primary: Box<dyn StateSource>,
        backup: Box<dyn StateSource>,
    ) -> Self {
        let mut computer = Self::new(config);
        computer.primary_source = Some(primary);
        computer.backup_source = Some(backup);
        computer
    }

    /// Spawns every periodic task. Must be called from within a tokio
    /// runtime. Calling `start` on an already running computer is a no-op.
    pub fn start(&mut self) {
        if self.shutdown.is_some() {
            return;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let primary = self
            .primary_source
            .take()
            .unwrap_or_else(|| self.default_source(0, self.config.primary_dropout));
        let backup = self
            .backup_source
            .take()
            .unwrap_or_else(|| self.default_source(1, 0.0));

        let primary_task = self.spawn_primary(primary, shutdown_rx.clone());
        let backup_task = self.spawn_backup(backup, shutdown_rx.clone());
        self.tasks.push(primary_task);
        self.tasks.push(backup_task);

        let subsystem_tasks = [
            self.spawn_subsystem(
                Arc::clone(&self.flight_control),
                self.config.flight_control_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.navigation),
                self.config.navigation_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.bite),
                self.config.bite_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.comms),
                self.config.comms_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.power),
                self.config.power_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.security),
                self.config.security_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.mode_monitor),
                self.config.mode_monitor_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.maintenance),
                self.config.maintenance_period,
                shutdown_rx.clone(),
            ),
            self.spawn_subsystem(
                Arc::clone(&self.scenario),
                self.config.scenario_period,
                shutdown_rx,
            ),
        ];
        self.tasks.extend(subsystem_tasks);

        self.shutdown = Some(shutdown_tx);
        info!(tasks = self.tasks.len(), "mission computer started");
    }

    /// Signals cooperative shutdown and waits for every task to finish its
    /// current tick and exit. No task runs another tick once this returns.
    pub async fn stop(&mut self) {
        let Some(shutdown) = self.shutdown.take() else {
            return;
        };
        let _ = shutdown.send(true);
        for task in self.tasks.drain(..) {
            if let Err(err) = task.await {
                warn!(%err, "task join failed");
            }
        }
        info!("mission computer stopped, all tasks drained");
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    fn default_source(&self, stream: u64, dropout: f64) -> Box<dyn StateSource> {
        let suite = match self.config.seed {
            Some(seed) => SensorSuite::seeded(seed.wrapping_add(stream)),
            None => SensorSuite::new(),
        };
        Box::new(suite.with_dropout(dropout))
    }

    fn spawn_primary(
        &self,
        mut source: Box<dyn StateSource>,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let failover = Arc::clone(&self.failover);
        let journals = Arc::clone(&self.journals);
        let period = self.config.sensor_period;

        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => match source.produce() {
                        Ok(next) => {
                            validator::audit("sensor feed", &next);
                            let line = format!(
                                "altitude={:.1} speed={:.1} position=({:.2}, {:.2}, {:.1}) fuel={:.2} engine={}",
                                next.altitude,
                                next.speed,
                                next.position.x,
                                next.position.y,
                                next.position.z,
                                next.fuel_level,
                                next.engine_status,
                            );
                            *shared.write().await = next;
                            journals.recorder.append(line);
                        }
                        Err(err) => {
                            warn!(%err, "primary sensor feed failed, arming failover");
                            journals.errors.append(format!("Sensor Data Error: {err}"));
                            failover.store(true, Ordering::SeqCst);
                        }
                    },
                    _ = shutdown.changed() => break,
                }
            }
        })
    }

    fn spawn_backup(
        &self,
        mut source: Box<dyn StateSource>,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let failover = Arc::clone(&self.failover);
        let journals = Arc::clone(&self.journals);
        let period = self.config.sensor_period;

        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => match source.produce() {
                        Ok(latest) => {
                            validator::audit("backup sensor feed", &latest);
                            if failover.swap(false, Ordering::SeqCst) {
                                *shared.write().await = latest;
                                journals.errors.append("Failover to backup sensor feed");
                                info!("failover: backup sensor feed is live");
                            }
                        }
                        Err(err) => {
                            warn!(%err, "backup sensor feed failed");
                            journals.errors.append(format!("Backup Sensor Data Error: {err}"));
                        }
                    },
                    _ = shutdown.changed() => break,
                }
            }
        })
    }

    fn spawn_subsystem<S>(
        &self,
        subsystem: Arc<Mutex<S>>,
        period: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()>
    where
        S: Subsystem + 'static,
    {
        let shared = Arc::clone(&self.shared);
        let journals = Arc::clone(&self.journals);

        tokio::spawn(async move {
            let id = subsystem.lock().await.id();
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshot = shared.read().await.clone();
                        if let Err(err) = subsystem.lock().await.tick(&snapshot) {
                            warn!(subsystem = %id, %err, "tick failed");
                            journals.errors.append(format!("{id} Error: {err}"));
                        }
                    },
                    _ = shutdown.changed() => break,
                }
            }
        })
    }

    // Read-only accessors polled by the display front-end. Each returns a
    // complete snapshot of the unit's current output.

    pub async fn current_state(&self) -> VehicleState {
        self.shared.read().await.clone()
    }

    pub async fn current_mode(&self) -> FlightMode {
        self.mode_monitor.lock().await.mode()
    }

    pub async fn commands(&self) -> ControlCommands {
        self.flight_control.lock().await.commands()
    }

    pub async fn route(&self) -> RouteState {
        self.navigation.lock().await.route()
    }

    pub async fn power_status(&self) -> PowerStatus {
        self.power.lock().await.status()
    }

    pub async fn threat_level(&self) -> ThreatLevel {
        self.security.lock().await.threat_level()
    }

    pub async fn bite_status(&self) -> BiteStatus {
        self.bite.lock().await.status()
    }

    pub fn failover_pending(&self) -> bool {
        self.failover.load(Ordering::SeqCst)
    }

    pub fn journals(&self) -> Arc<Journals> {
        Arc::clone(&self.journals)
    }
}
