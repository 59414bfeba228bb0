use core::cell::Cell;

use critical_section::Mutex;

use crate::register::{Register, RegisterAccess};

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// Volatile access to the SENS peripheral of the running chip.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub struct Mmio;

impl Mmio {
    /// Returns the SENS register backend, once.
    ///
    /// Subsequent calls return `None` until the program restarts.
    pub fn take() -> Option<Self> {
        critical_section::with(|cs| {
            if TAKEN.borrow(cs).replace(true) {
                None
            } else {
                Some(Mmio)
            }
        })
    }

    /// Unconditionally creates the SENS register backend.
    ///
    /// # Safety
    ///
    /// The caller must ensure that no other [`Mmio`] instance is used to
    /// modify the SENS registers at the same time.
    pub const unsafe fn steal() -> Self {
        Mmio
    }
}

impl RegisterAccess for Mmio {
    #[inline(always)]
    fn read(&self, register: Register) -> u32 {
        // SAFETY: `register` is one of the SENS registers, which are valid,
        // aligned and always mapped on the ESP32.
        unsafe { core::ptr::read_volatile(register.address() as *const u32) }
    }

    #[inline(always)]
    fn write(&mut self, register: Register, value: u32) {
        // SAFETY: see `read`. Exclusive access is guaranteed by `&mut self`.
        unsafe { core::ptr::write_volatile(register.address() as *mut u32, value) }
    }
}
