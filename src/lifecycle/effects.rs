//! Explicit effect hooks for a view.
//!
//! Each effect declares when it runs:
//!
//! - [`EffectHost::on_activate`]: once, when the view becomes active
//! - [`EffectHost::every_commit`]: on activation and after every commit
//! - [`EffectHost::on_change`]: on activation and after any commit where
//!   its dependency snapshot differs by value from the previous one
//!
//! An effect may return a cleanup. The cleanup runs before the same effect
//! runs again, and on deactivation. Deactivation runs the cleanups in
//! reverse registration order.

use std::fmt;

pub type Cleanup = Box<dyn FnOnce()>;

/// Handle returned by registration, used to query run counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectId(usize);

trait DepWatch {
    fn changed(&mut self) -> bool;
}

struct DepReader<D, F> {
    read: F,
    last: Option<D>,
}

impl<D: PartialEq, F: FnMut() -> D> DepWatch for DepReader<D, F> {
    fn changed(&mut self) -> bool {
        let next = (self.read)();
        if self.last.as_ref() == Some(&next) {
            return false;
        }
        self.last = Some(next);
        true
    }
}

enum When {
    OnActivate,
    EveryCommit,
    OnChange(Box<dyn DepWatch>),
}

struct EffectSlot {
    name: &'static str,
    when: When,
    run: Box<dyn FnMut() -> Option<Cleanup>>,
    cleanup: Option<Cleanup>,
    runs: usize,
}

impl EffectSlot {
    fn fire(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
        tracing::trace!(effect = self.name, "running effect");
        self.cleanup = (self.run)();
        self.runs += 1;
    }

    fn should_fire_on_commit(&mut self) -> bool {
        match &mut self.when {
            When::OnActivate => false,
            When::EveryCommit => true,
            When::OnChange(watch) => watch.changed(),
        }
    }

    fn activate(&mut self) {
        // Seed the dependency snapshot so the first commit compares
        // against the activation-time values.
        if let When::OnChange(watch) = &mut self.when {
            watch.changed();
        }
        self.fire();
    }
}

#[derive(Default)]
pub struct EffectHost {
    effects: Vec<EffectSlot>,
    active: bool,
}

impl EffectHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_activate(
        &mut self,
        name: &'static str,
        run: impl FnMut() -> Option<Cleanup> + 'static,
    ) -> EffectId {
        self.register(name, When::OnActivate, Box::new(run))
    }

    pub fn every_commit(
        &mut self,
        name: &'static str,
        run: impl FnMut() -> Option<Cleanup> + 'static,
    ) -> EffectId {
        self.register(name, When::EveryCommit, Box::new(run))
    }

    /// `deps` is read after every commit; the effect fires when the
    /// result differs from the last one.
    pub fn on_change<D, F>(
        &mut self,
        name: &'static str,
        deps: F,
        run: impl FnMut() -> Option<Cleanup> + 'static,
    ) -> EffectId
    where
        D: PartialEq + 'static,
        F: FnMut() -> D + 'static,
    {
        let watch = DepReader { read: deps, last: None };
        self.register(name, When::OnChange(Box::new(watch)), Box::new(run))
    }

    fn register(
        &mut self,
        name: &'static str,
        when: When,
        run: Box<dyn FnMut() -> Option<Cleanup>>,
    ) -> EffectId {
        let mut slot = EffectSlot {
            name,
            when,
            run,
            cleanup: None,
            runs: 0,
        };
        // Late registration on a live view behaves like activation.
        if self.active {
            slot.activate();
        }
        self.effects.push(slot);
        EffectId(self.effects.len() - 1)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Run every effect once, in registration order. No-op if active.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        for slot in &mut self.effects {
            slot.activate();
        }
    }

    /// Apply the effects due after a state change. No-op while inactive.
    pub fn commit(&mut self) {
        if !self.active {
            return;
        }
        for slot in &mut self.effects {
            if slot.should_fire_on_commit() {
                slot.fire();
            }
        }
    }

    /// Run outstanding cleanups, last registered first.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        for slot in self.effects.iter_mut().rev() {
            if let Some(cleanup) = slot.cleanup.take() {
                tracing::trace!(effect = slot.name, "running cleanup");
                cleanup();
            }
        }
    }

    pub fn runs(&self, id: EffectId) -> usize {
        self.effects.get(id.0).map_or(0, |slot| slot.runs)
    }
}

impl Drop for EffectHost {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl fmt::Debug for EffectHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.effects.iter().map(|slot| slot.name).collect();
        f.debug_struct("EffectHost")
            .field("effects", &names)
            .field("active", &self.active)
            .finish()
    }
}
