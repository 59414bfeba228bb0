//! # Board-level registration
//!
//! Obtains the ADC device and registers it with the driver framework under a
//! device path such as `/dev/adc0`.

use core::fmt::Write;

use heapless::String;

use crate::{
    Error,
    device::{self, AdcDevice},
};

/// Capacity of a path built by [`device_path`].
pub const DEVICE_PATH_LEN: usize = 16;

/// Default registration path, from `ESP32_ADC_CONFIG_DEFAULT_DEVICE_PATH`.
pub const DEFAULT_DEVICE_PATH: &str =
    esp_config::esp_config_str!("ESP32_ADC_CONFIG_DEFAULT_DEVICE_PATH");

/// The driver framework's device registry.
pub trait AdcRegistry {
    /// Registers `device` under `path`.
    ///
    /// On failure, returns the framework's negated errno value.
    fn register(&mut self, path: &str, device: &'static AdcDevice) -> Result<(), i32>;
}

/// Builds the device path `/dev/adcN`.
pub fn device_path(n: u8) -> String<DEVICE_PATH_LEN> {
    let mut path = String::new();
    // "/dev/adc" plus at most three digits always fits.
    let _ = write!(path, "/dev/adc{}", n);
    path
}

/// Initializes the ADC and registers it at `path`.
pub fn initialize(path: &str, registry: &mut impl AdcRegistry) -> Result<(), Error> {
    register_device(path, Some(device::initialize()), registry)
}

/// Initializes the ADC and registers it at [`DEFAULT_DEVICE_PATH`].
pub fn initialize_default(registry: &mut impl AdcRegistry) -> Result<(), Error> {
    initialize(DEFAULT_DEVICE_PATH, registry)
}

fn register_device(
    path: &str,
    device: Option<&'static AdcDevice>,
    registry: &mut impl AdcRegistry,
) -> Result<(), Error> {
    let Some(device) = device else {
        return Err(Error::DeviceUnavailable);
    };

    registry.register(path, device).map_err(|code| {
        error!("Error registering ADC at {}: {}", path, code);
        Error::Registration(code)
    })
}
