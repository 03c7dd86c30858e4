//! Owned native calcer handle and the critical section around the FFI boundary.
//!
//! Every call into the engine goes through [`engine`], which holds a
//! process-wide lock for the duration of the call. Failure checks and the
//! follow-up `GetErrorString` read happen inside the same closure, so the
//! last-error string can never be replaced by an interleaved call.

use crate::error::{CatBoostError, CatBoostResult};
use crate::sys;
use std::ptr::NonNull;
use std::sync::{Mutex, PoisonError};

static ENGINE_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with exclusive access to the native engine.
pub(crate) fn engine<T>(f: impl FnOnce() -> T) -> T {
    // A panic while the lock was held cannot corrupt the unit guard
    let _guard = ENGINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    f()
}

/// A live `ModelCalcerHandle`, deleted exactly once on drop.
#[derive(Debug)]
pub(crate) struct CalcerHandle {
    raw: NonNull<sys::ModelCalcerHandle>,
}

impl CalcerHandle {
    /// Ask the engine for a fresh, empty calcer.
    pub(crate) fn create() -> CatBoostResult<Self> {
        let raw = engine(|| unsafe { sys::ModelCalcerCreate() });
        NonNull::new(raw)
            .map(|raw| CalcerHandle { raw })
            .ok_or(CatBoostError::Allocation)
    }

    pub(crate) fn as_ptr(&self) -> *mut sys::ModelCalcerHandle {
        self.raw.as_ptr()
    }
}

impl Drop for CalcerHandle {
    fn drop(&mut self) {
        engine(|| unsafe { sys::ModelCalcerDelete(self.raw.as_ptr()) });
    }
}

// SAFETY: the handle is only dereferenced by the engine, and every engine call
// is serialized through ENGINE_LOCK.
unsafe impl Send for CalcerHandle {}
unsafe impl Sync for CalcerHandle {}
