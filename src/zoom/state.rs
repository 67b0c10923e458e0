//! Atomic zoom state holder
//!
//! The current `(factor, action)` pair lives in one heap allocation behind a
//! `crossbeam-epoch` atomic pointer. Readers pin the epoch and copy the pair
//! out; writers install a fresh allocation with a compare-and-swap retry loop
//! and hand the displaced one to the collector. A reader therefore never sees
//! a factor from one transition paired with the action of another.

use crossbeam_epoch::{self as epoch, Atomic, Owned};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::Ordering;

/// Kind of zoom transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomAction {
    /// Keep the current level, re-broadcasting it after a view resize
    Restore,
    /// Zoom in by a relative ratio
    In,
    /// Zoom out by a relative ratio
    Out,
    /// Zoom to the default level
    Default,
    /// Zoom to the least detailed level, showing the whole capture
    All,
    /// Zoom to the most detailed level the view can address
    Maximum,
}

impl ZoomAction {
    /// Relative actions leave no sticky action in the state
    pub fn is_relative(&self) -> bool {
        matches!(self, ZoomAction::In | ZoomAction::Out)
    }
}

impl fmt::Display for ZoomAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ZoomAction::Restore => "restore",
            ZoomAction::In => "in",
            ZoomAction::Out => "out",
            ZoomAction::Default => "default",
            ZoomAction::All => "all",
            ZoomAction::Maximum => "maximum",
        };
        f.write_str(name)
    }
}

/// One committed zoom state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub factor: f64,
    /// `None` after an unclamped relative zoom
    pub action: Option<ZoomAction>,
}

impl ZoomState {
    pub const fn new(factor: f64, action: Option<ZoomAction>) -> Self {
        Self { factor, action }
    }
}

/// Lock-free cell holding the current [`ZoomState`]
pub(crate) struct AtomicZoomState {
    current: Atomic<ZoomState>,
}

impl AtomicZoomState {
    pub(crate) fn new(state: ZoomState) -> Self {
        Self {
            current: Atomic::new(state),
        }
    }

    pub(crate) fn load(&self) -> ZoomState {
        let guard = epoch::pin();
        let shared = self.current.load(Ordering::Acquire, &guard);
        // SAFETY: the pointer is never null and the pinned guard keeps the
        // allocation alive until we have copied it out
        unsafe { *shared.deref() }
    }

    /// Install `state`, returning the state it displaced
    pub(crate) fn replace(&self, state: ZoomState) -> ZoomState {
        let guard = epoch::pin();
        let mut next = Owned::new(state);
        loop {
            let current = self.current.load(Ordering::Acquire, &guard);
            match self.current.compare_exchange(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
                &guard,
            ) {
                Ok(_) => {
                    // SAFETY: `current` was loaded under `guard` and has just
                    // been unlinked, so no new reader can reach it
                    unsafe {
                        let previous = *current.deref();
                        guard.defer_destroy(current);
                        return previous;
                    }
                }
                Err(e) => next = e.new,
            }
        }
    }
}

impl Drop for AtomicZoomState {
    fn drop(&mut self) {
        // SAFETY: `&mut self` guarantees no other thread holds a reference
        unsafe {
            let guard = epoch::unprotected();
            let current = self.current.load(Ordering::Relaxed, guard);
            if !current.is_null() {
                drop(current.into_owned());
            }
        }
    }
}

impl fmt::Debug for AtomicZoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicZoomState").field(&self.load()).finish()
    }
}
