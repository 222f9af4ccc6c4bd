//! Backing strategies for device control blocks.
//!
//! A control block is either embedded directly in its registry slot or
//! allocated on the heap when the unit is initialized. The strategy is picked
//! once at build time through the `heap-dcb` feature.

use alloc::alloc::Layout;
use alloc::boxed::Box;
use core::ops::Deref;

use axerrno::{AxResult, ax_err};

use crate::dcb::Dcb;

/// How the registry obtains storage for a control block.
pub trait DcbStorage {
    /// Value kept in a registry slot for an allocated unit.
    type Slot: Deref<Target = Dcb> + Send + Sync;

    /// Places `dcb` into fresh storage.
    ///
    /// # Errors
    ///
    /// Returns `NoMemory` if the storage cannot be obtained.
    fn alloc(dcb: Dcb) -> AxResult<Self::Slot>;
}

/// Control blocks embedded in the registry table.
#[derive(Debug)]
pub struct StaticStorage;

/// A control block stored inline in its slot.
#[derive(Debug)]
pub struct Embedded(Dcb);

impl Deref for Embedded {
    type Target = Dcb;

    #[inline]
    fn deref(&self) -> &Dcb {
        &self.0
    }
}

impl DcbStorage for StaticStorage {
    type Slot = Embedded;

    fn alloc(dcb: Dcb) -> AxResult<Embedded> {
        Ok(Embedded(dcb))
    }
}

/// Control blocks allocated on the heap, one allocation per unit.
#[derive(Debug)]
pub struct HeapStorage;

impl DcbStorage for HeapStorage {
    type Slot = Box<Dcb>;

    fn alloc(dcb: Dcb) -> AxResult<Box<Dcb>> {
        let layout = Layout::new::<Dcb>();
        // SAFETY: `Dcb` is not zero-sized.
        let ptr = unsafe { alloc::alloc::alloc(layout) } as *mut Dcb;
        if ptr.is_null() {
            return ax_err!(NoMemory, "control block allocation failed");
        }
        // SAFETY: `ptr` is non-null, properly aligned for `Dcb` and was
        // allocated with the global allocator using `Dcb`'s layout.
        unsafe {
            ptr.write(dcb);
            Ok(Box::from_raw(ptr))
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "heap-dcb")] {
        /// Storage strategy selected by the build configuration.
        pub type DefaultStorage = HeapStorage;
    } else {
        /// Storage strategy selected by the build configuration.
        pub type DefaultStorage = StaticStorage;
    }
}
