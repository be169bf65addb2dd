//! Skip-if-unchanged caches for derived values and child renders.
//!
//! Both caches compare their inputs by value. The computation they guard
//! must be pure for the skip to be sound.

use std::fmt;
use std::sync::Arc;

/// A derived value recomputed only when its dependency snapshot changes.
pub struct Memo<D, T> {
    cached: Option<(D, T)>,
    computations: usize,
}

impl<D: PartialEq + Clone, T> Memo<D, T> {
    pub fn new() -> Self {
        Self {
            cached: None,
            computations: 0,
        }
    }

    pub fn get(&mut self, deps: &D, compute: impl FnOnce(&D) -> T) -> &T {
        if matches!(&self.cached, Some((cached, _)) if cached != deps) {
            self.cached = None;
        }
        let computations = &mut self.computations;
        let (_, value) = self.cached.get_or_insert_with(|| {
            *computations += 1;
            (deps.clone(), compute(deps))
        });
        value
    }

    /// How many times the computation has actually run.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

impl<D: PartialEq + Clone, T> Default for Memo<D, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A callback with a stable identity across renders.
///
/// Clones share the same allocation, so [`Callback::ptr_eq`] tells a child
/// whether its handler prop actually changed.
pub struct Callback {
    f: Arc<dyn Fn() + Send + Sync>,
}

impl Callback {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    pub fn call(&self) {
        (self.f)()
    }

    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl Clone for Callback {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.f))
    }
}

/// A child whose output is reused while its props compare equal.
pub struct PureChild<P, O> {
    last: Option<(P, O)>,
    renders: usize,
}

impl<P: PartialEq + Clone, O> PureChild<P, O> {
    pub fn new() -> Self {
        Self {
            last: None,
            renders: 0,
        }
    }

    pub fn render(&mut self, props: &P, view: impl FnOnce(&P) -> O) -> &O {
        if matches!(&self.last, Some((last, _)) if last != props) {
            self.last = None;
        }
        let renders = &mut self.renders;
        let (_, output) = self.last.get_or_insert_with(|| {
            *renders += 1;
            (props.clone(), view(props))
        });
        output
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl<P: PartialEq + Clone, O> Default for PureChild<P, O> {
    fn default() -> Self {
        Self::new()
    }
}
