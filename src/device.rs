//! # ADC device handle
//!
//! The conversion lifecycle (binding an upper-half callback, reset, setup,
//! shutdown, receive interrupts and ioctl commands) belongs to the driver
//! framework the ADC is registered with. The framework reaches the
//! chip-specific side through an [`AdcOps`] table. None of the ESP32 hooks
//! are implemented yet: each one reports [`Error::NotImplemented`] naming the
//! hook, instead of silently doing nothing.

use crate::{Error, channel::Channel};

/// A lower-half operation the driver framework can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hook {
    /// Bind the upper-half callbacks.
    Bind,
    /// Reset the device.
    Reset,
    /// Configure the device and enable interrupts.
    Setup,
    /// Disable the device and interrupts.
    Shutdown,
    /// Enable or disable receive interrupts.
    RxInt,
    /// Device-specific command.
    Ioctl,
}

/// Receives converted samples from the lower half.
pub trait AdcCallback: Sync {
    /// Called once per converted sample.
    fn on_sample(&self, channel: Channel, value: i32);
}

/// Lower-half operations of an ADC device.
///
/// Every hook defaults to [`Error::NotImplemented`].
pub trait AdcOps: Sync {
    /// Binds the upper-half `callback`.
    fn bind(&self, callback: &'static dyn AdcCallback) -> Result<(), Error> {
        let _ = callback;
        Err(not_implemented(Hook::Bind))
    }

    /// Resets the device. Called early, before interrupts are attached.
    fn reset(&self) -> Result<(), Error> {
        Err(not_implemented(Hook::Reset))
    }

    /// Configures the device. Called when the device is first opened.
    fn setup(&self) -> Result<(), Error> {
        Err(not_implemented(Hook::Setup))
    }

    /// Disables the device. Called when the device is closed.
    fn shutdown(&self) -> Result<(), Error> {
        Err(not_implemented(Hook::Shutdown))
    }

    /// Enables or disables receive interrupts.
    fn rxint(&self, enable: bool) -> Result<(), Error> {
        let _ = enable;
        Err(not_implemented(Hook::RxInt))
    }

    /// Handles a device-specific command.
    fn ioctl(&self, cmd: i32, arg: usize) -> Result<i32, Error> {
        let _ = (cmd, arg);
        Err(not_implemented(Hook::Ioctl))
    }
}

fn not_implemented(hook: Hook) -> Error {
    warn!("ADC hook {:?} is not implemented", hook);
    Error::NotImplemented(hook)
}

/// Lower half of the ESP32 SAR ADC.
struct Esp32AdcOps;

impl AdcOps for Esp32AdcOps {}

static ESP32_ADC_OPS: Esp32AdcOps = Esp32AdcOps;

static ESP32_ADC: AdcDevice = AdcDevice::new(&ESP32_ADC_OPS);

/// An ADC device, as handed to the driver framework.
///
/// The device itself holds no mutable state; everything lives in the SENS
/// registers.
pub struct AdcDevice {
    ops: &'static dyn AdcOps,
}

impl AdcDevice {
    const fn new(ops: &'static dyn AdcOps) -> Self {
        Self { ops }
    }

    /// The lower-half operations of this device.
    pub fn ops(&self) -> &'static dyn AdcOps {
        self.ops
    }
}

impl core::fmt::Debug for AdcDevice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdcDevice").finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AdcDevice {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(fmt, "AdcDevice")
    }
}

/// Returns the ESP32 ADC device.
///
/// Every call returns the same device.
pub fn initialize() -> &'static AdcDevice {
    debug!("ADC device initialized");
    &ESP32_ADC
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Discard;

    impl AdcCallback for Discard {
        fn on_sample(&self, _channel: Channel, _value: i32) {}
    }

    static DISCARD: Discard = Discard;

    #[test]
    fn initialize_returns_the_same_device() {
        let first = initialize();
        let second = initialize();
        assert!(core::ptr::eq(first, second));
        assert!(core::ptr::addr_eq(first.ops(), second.ops()));
    }

    #[test]
    fn every_hook_reports_not_implemented() {
        let ops = initialize().ops();

        assert_eq!(Err(Error::NotImplemented(Hook::Bind)), ops.bind(&DISCARD));
        assert_eq!(Err(Error::NotImplemented(Hook::Reset)), ops.reset());
        assert_eq!(Err(Error::NotImplemented(Hook::Setup)), ops.setup());
        assert_eq!(Err(Error::NotImplemented(Hook::Shutdown)), ops.shutdown());
        assert_eq!(Err(Error::NotImplemented(Hook::RxInt)), ops.rxint(true));
        assert_eq!(Err(Error::NotImplemented(Hook::Ioctl)), ops.ioctl(0, 0));
    }

    #[test]
    fn hooks_can_be_overridden() {
        struct ResetOnly;

        impl AdcOps for ResetOnly {
            fn reset(&self) -> Result<(), Error> {
                Ok(())
            }
        }

        static RESET_ONLY: ResetOnly = ResetOnly;
        let device = AdcDevice::new(&RESET_ONLY);

        assert_eq!(Ok(()), device.ops().reset());
        assert_eq!(Err(Error::NotImplemented(Hook::Setup)), device.ops().setup());
    }
}
