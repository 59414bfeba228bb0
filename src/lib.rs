//! Register-level configuration of the ESP32 SAR ADC units.
//!
//! This crate translates a logical analog-input request (which unit, which
//! channel, which input attenuation and which sample width) into
//! read-modify-write updates of the SENS peripheral registers that control
//! the two on-chip SAR ADCs. It also resolves ADC channels to the GPIO they
//! are wired to, and provides the device handle and board-level glue used to
//! register the ADC with a driver framework.
//!
//! Sampling, interrupt servicing, calibration and DMA are left to the driver
//! framework.
//!
//! ## Concurrency
//!
//! Updating a register field reads the whole register, changes the field
//! and writes the register back. Two contexts doing this concurrently on the
//! same register lose updates, even when they target different fields.
//! [`SarAdc`] therefore requires `&mut` access for every update, and
//! [`SharedSarAdc`] scopes access from several contexts with a critical
//! section.
//!
//! ## Configuration
//!
//! The crate has the following build-time configuration options, set via
//! environment variables:
//!
//! | Name                                   | Default     | Description                                  |
//! |----------------------------------------|-------------|----------------------------------------------|
//! | `ESP32_ADC_CONFIG_DEFAULT_DEVICE_PATH` | `/dev/adc0` | Path used by [`board::initialize_default`]   |
//!
//! ## Feature Flags
#![doc = document_features::document_features!()]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/46717278")]
#![deny(missing_docs, rust_2018_idioms)]
#![cfg_attr(not(test), no_std)]

// MUST be the first module
mod fmt;

mod adc;
pub mod board;
mod channel;
pub mod device;
mod hardware;
pub mod register;
#[cfg(any(test, feature = "emulation"))]
mod stub;

pub use self::{
    adc::{AdcConfig, Attenuation, SarAdc, SharedSarAdc, Width},
    channel::{ADC1_CHANNEL_TO_GPIO, ADC2_CHANNEL_TO_GPIO, Channel, Unit, channel_to_gpio},
    device::{AdcDevice, Hook, initialize},
    hardware::Mmio,
};
#[cfg(any(test, feature = "emulation"))]
pub use self::stub::Emulated;

/// Invalid argument.
pub const EINVAL: i32 = 22;
/// No such device.
pub const ENODEV: i32 = 19;
/// Function not implemented.
pub const ENOSYS: i32 = 38;

/// ADC configuration errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, strum::Display)]
#[non_exhaustive]
pub enum Error {
    /// The unit tag does not name an ADC unit.
    InvalidUnit,
    /// The channel ordinal is outside both units' ranges.
    InvalidChannel,
    /// The channel index is past the end of the unit's channel table.
    OutOfRange,
    /// The raw value does not fit a 2-bit configuration field.
    InvalidValue,
    /// No device handle could be produced.
    DeviceUnavailable,
    /// The driver framework hook is not implemented for this device.
    NotImplemented(Hook),
    /// The driver framework rejected the device with the given negated errno.
    Registration(i32),
}

impl Error {
    /// The negated errno value reported to the driver framework.
    pub const fn errno(self) -> i32 {
        match self {
            Error::InvalidUnit
            | Error::InvalidChannel
            | Error::OutOfRange
            | Error::InvalidValue => -EINVAL,
            Error::DeviceUnavailable => -ENODEV,
            Error::NotImplemented(_) => -ENOSYS,
            Error::Registration(code) => code,
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(fmt, "{}", defmt::Display2Format(self))
    }
}
