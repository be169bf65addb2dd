//! Lifecycle demo wired through [`EffectHost`].

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::lifecycle::{CancelScope, Cleanup, EffectHost, EffectId};

pub const LOADING_DELAY: Duration = Duration::from_secs(2);
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectsModel {
    pub count: u32,
    pub title: String,
    pub loading: bool,
    pub clock: String,
    pub ticks: u64,
    pub count_log: Vec<String>,
}

impl Default for EffectsModel {
    fn default() -> Self {
        Self {
            count: 0,
            title: String::new(),
            loading: true,
            clock: wall_clock(),
            ticks: 0,
            count_log: Vec::new(),
        }
    }
}

impl EffectsModel {
    pub fn status_line(&self) -> &'static str {
        if self.loading {
            "Loading data... (Wait 2 seconds)"
        } else {
            "Data loaded!"
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EffectIds {
    pub title: EffectId,
    pub loading_timer: EffectId,
    pub count_logger: EffectId,
    pub clock: EffectId,
}

pub struct EffectsPage {
    model: Arc<Mutex<EffectsModel>>,
    host: EffectHost,
    ids: EffectIds,
}

impl EffectsPage {
    pub fn new() -> Self {
        let model = Arc::new(Mutex::new(EffectsModel::default()));
        let mut host = EffectHost::new();

        let title = {
            let model = Arc::clone(&model);
            host.every_commit("title", move || {
                let mut m = model.lock();
                m.title = format!("Count: {}", m.count);
                None
            })
        };

        let loading_timer = {
            let model = Arc::clone(&model);
            host.on_activate("loading-timer", move || {
                tracing::debug!("effects page mounted");
                model.lock().loading = true;
                let model = Arc::clone(&model);
                let scope = spawn_scoped(async move {
                    tokio::time::sleep(LOADING_DELAY).await;
                    model.lock().loading = false;
                });
                Some(cancel_on_cleanup(scope))
            })
        };

        let count_logger = {
            let deps = Arc::clone(&model);
            let model = Arc::clone(&model);
            host.on_change(
                "count-logger",
                move || deps.lock().count,
                move || {
                    let mut m = model.lock();
                    let line = format!("Count updated to {}", m.count);
                    tracing::info!(count = m.count, "count updated");
                    m.count_log.push(line);
                    None
                },
            )
        };

        let clock = {
            let model = Arc::clone(&model);
            host.on_activate("clock", move || {
                let model = Arc::clone(&model);
                let scope = spawn_scoped(async move {
                    let mut interval = tokio::time::interval(CLOCK_PERIOD);
                    // First tick completes immediately.
                    interval.tick().await;
                    loop {
                        interval.tick().await;
                        let mut m = model.lock();
                        m.clock = wall_clock();
                        m.ticks += 1;
                    }
                });
                Some(cancel_on_cleanup(scope))
            })
        };

        Self {
            model,
            host,
            ids: EffectIds {
                title,
                loading_timer,
                count_logger,
                clock,
            },
        }
    }

    pub fn activate(&mut self) {
        self.host.activate();
    }

    pub fn deactivate(&mut self) {
        self.host.deactivate();
        tracing::debug!("effects page unmounted");
    }

    pub fn increment(&mut self) {
        self.model.lock().count += 1;
        self.host.commit();
    }

    /// Re-render without changing the count.
    pub fn refresh(&mut self) {
        self.host.commit();
    }

    pub fn model(&self) -> EffectsModel {
        self.model.lock().clone()
    }

    pub fn effect_ids(&self) -> EffectIds {
        self.ids
    }

    pub fn runs(&self, id: EffectId) -> usize {
        self.host.runs(id)
    }
}

impl Default for EffectsPage {
    fn default() -> Self {
        Self::new()
    }
}

fn cancel_on_cleanup(scope: CancelScope) -> Cleanup {
    Box::new(move || scope.cancel())
}

/// Spawn `work` on the current runtime, bounded by the returned scope.
fn spawn_scoped<F>(work: F) -> CancelScope
where
    F: Future<Output = ()> + Send + 'static,
{
    let scope = CancelScope::new();
    match Handle::try_current() {
        Ok(handle) => {
            let guard = scope.clone();
            handle.spawn(async move {
                tokio::select! {
                    biased;
                    _ = guard.cancelled() => {}
                    _ = work => {}
                }
            });
        }
        Err(_) => tracing::warn!("no async runtime, timer effect skipped"),
    }
    scope
}

fn wall_clock() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
