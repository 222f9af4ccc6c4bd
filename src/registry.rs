//! Fixed-capacity table of device control blocks, indexed by unit number.
//!
//! The registry is the only owner of control blocks. All access goes through
//! bounds-checked accessors. A slot is written once: a control block is only
//! committed after its setup succeeded, and is never removed afterwards, so
//! every `&Dcb` handed out stays valid for the lifetime of the registry.
//!
//! # Concurrency
//!
//! Lookups never block. Two allocations racing for the same unit are
//! serialized by the slot; the loser sees `AlreadyExists`.

use core::array;

use axerrno::{AxError, AxResult, ax_err_type};
use spin::Once;

use crate::config::UNIT_COUNT;
use crate::dcb::Dcb;
use crate::storage::{DcbStorage, DefaultStorage};

/// Control block registry with room for `N` units.
pub struct DcbRegistry<const N: usize = UNIT_COUNT, S: DcbStorage = DefaultStorage> {
    slots: [Once<S::Slot>; N],
}

impl<const N: usize, S: DcbStorage> DcbRegistry<N, S> {
    /// Creates a registry with every slot unallocated.
    pub fn new() -> Self {
        Self {
            slots: array::from_fn(|_| Once::new()),
        }
    }

    /// Number of units this registry can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Allocates an empty control block for `unit`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `unit` is not below the capacity (`NotFound`)
    /// - the unit already has a control block (`AlreadyExists`)
    /// - the storage strategy cannot provide memory (`NoMemory`)
    pub fn allocate(&self, unit: usize) -> AxResult<&Dcb> {
        self.allocate_with(unit, |_| Ok(()))
    }

    /// Allocates a control block for `unit` and commits it once `setup`
    /// succeeds.
    ///
    /// If `setup` fails, the fresh block is dropped, the slot stays
    /// unallocated and the error is returned. Lookups of `unit` fail until
    /// `setup` has returned.
    ///
    /// # Errors
    ///
    /// The errors of [`DcbRegistry::allocate`], or the error of `setup`.
    pub fn allocate_with<E, G>(&self, unit: usize, setup: G) -> Result<&Dcb, E>
    where
        E: From<AxError>,
        G: FnOnce(&Dcb) -> Result<(), E>,
    {
        let Some(slot) = self.slots.get(unit) else {
            return Err(ax_err_type!(NotFound, "unit out of range").into());
        };

        let mut fresh = false;
        let committed = slot.try_call_once(|| -> Result<S::Slot, E> {
            fresh = true;
            let dcb = S::alloc(Dcb::new(unit))?;
            setup(&dcb)?;
            Ok(dcb)
        })?;
        if !fresh {
            return Err(ax_err_type!(AlreadyExists, "unit already has a control block").into());
        }
        Ok(&**committed)
    }

    /// Gets the control block of an allocated unit.
    pub fn lookup(&self, unit: usize) -> AxResult<&Dcb> {
        match self.slots.get(unit).and_then(|slot| slot.get()) {
            Some(committed) => Ok(&**committed),
            None => Err(ax_err_type!(NotFound, "unit has no control block")),
        }
    }

    /// Whether `unit` currently has a control block.
    pub fn is_allocated(&self, unit: usize) -> bool {
        self.slots.get(unit).is_some_and(|slot| slot.is_completed())
    }

    /// Gets the number of allocated units.
    pub fn allocated_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_completed()).count()
    }
}

impl<const N: usize, S: DcbStorage> Default for DcbRegistry<N, S> {
    fn default() -> Self {
        Self::new()
    }
}
