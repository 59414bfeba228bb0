//! # SAR ADC configuration
//!
//! ## Overview
//!
//! [`SarAdc`] programs the sample width of a unit and the input attenuation
//! of individual channels. It owns a [`RegisterAccess`] backend, and every
//! operation that changes a register takes `&mut self`, so a configuration
//! sequence can only run from the context that holds the driver.
//!
//! To configure the ADC from more than one context (for example a task and
//! an interrupt handler), put the driver in a [`SharedSarAdc`] and scope each
//! sequence with [`SharedSarAdc::lock`].
//!
//! ## Examples
//!
//! ```rust, no_run
//! # use esp32_adc::{Attenuation, Mmio, SarAdc, Unit, Width};
//! let mut adc = SarAdc::new(Mmio::take().unwrap());
//!
//! adc.set_width(Unit::Adc1, Width::_12Bit);
//! adc.set_attenuation(3, Attenuation::_6dB)?;
//!
//! assert_eq!(Width::_12Bit, adc.width(Unit::Adc1));
//! # Ok::<(), esp32_adc::Error>(())
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    Error,
    channel::{Channel, Unit},
    register::{Register, RegisterAccess},
};

/// The attenuation of an ADC channel.
///
/// The effective measurement range for a given attenuation is listed in the
/// "ADC Characteristics" section of the ESP32 datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attenuation {
    /// 0dB attenuation
    _0dB   = 0b00,
    /// 2.5dB attenuation
    _2p5dB = 0b01,
    /// 6dB attenuation
    _6dB   = 0b10,
    /// 11dB attenuation
    _11dB  = 0b11,
}

impl TryFrom<u8> for Attenuation {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 => Ok(Attenuation::_0dB),
            0b01 => Ok(Attenuation::_2p5dB),
            0b10 => Ok(Attenuation::_6dB),
            0b11 => Ok(Attenuation::_11dB),
            _ => Err(Error::InvalidValue),
        }
    }
}

/// The sampling/readout width of an ADC unit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Width {
    /// 9-bit samples
    _9Bit  = 0b00,
    /// 10-bit samples
    _10Bit = 0b01,
    /// 11-bit samples
    _11Bit = 0b10,
    /// 12-bit samples
    #[default]
    _12Bit = 0b11,
}

impl Width {
    /// Number of bits per sample.
    pub const fn bits(self) -> u8 {
        9 + self as u8
    }
}

impl TryFrom<u8> for Width {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 => Ok(Width::_9Bit),
            0b01 => Ok(Width::_10Bit),
            0b10 => Ok(Width::_11Bit),
            0b11 => Ok(Width::_12Bit),
            _ => Err(Error::InvalidValue),
        }
    }
}

/// Configuration of one ADC unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    unit: Unit,
    width: Width,
    attenuations: [Option<Attenuation>; 10],
}

impl AdcConfig {
    /// Creates a configuration for `unit` with the default width and no
    /// channel enabled.
    pub const fn new(unit: Unit) -> Self {
        Self {
            unit,
            width: Width::_12Bit,
            attenuations: [None; 10],
        }
    }

    /// The unit this configuration applies to.
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Sets the sample width.
    pub const fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    /// The sample width.
    pub const fn width(&self) -> Width {
        self.width
    }

    /// Enables `channel` with the given attenuation.
    ///
    /// Fails with [`Error::InvalidChannel`] if the channel belongs to the
    /// other unit.
    pub fn enable_channel(&mut self, channel: Channel, attenuation: Attenuation) -> Result<(), Error> {
        if channel.unit() != self.unit {
            return Err(Error::InvalidChannel);
        }

        self.attenuations[channel.index() as usize] = Some(attenuation);
        Ok(())
    }

    /// The attenuation configured for `channel`, if it is enabled.
    pub fn attenuation(&self, channel: Channel) -> Option<Attenuation> {
        if channel.unit() != self.unit {
            return None;
        }

        self.attenuations[channel.index() as usize]
    }

    /// Iterates over the enabled channels and their attenuation.
    pub fn channels(&self) -> impl Iterator<Item = (Channel, Attenuation)> + '_ {
        Channel::all(self.unit).filter_map(|channel| {
            self.attenuations[channel.index() as usize].map(|attenuation| (channel, attenuation))
        })
    }
}

/// SAR ADC configuration driver.
#[derive(Debug)]
pub struct SarAdc<R> {
    regs: R,
}

impl<R> SarAdc<R>
where
    R: RegisterAccess,
{
    /// Creates a driver operating on `regs`.
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Sets the sample width of `unit`.
    ///
    /// Both the conversion width in `SENS_SAR_START_FORCE_REG` and the
    /// readout width in the unit's read control register are updated.
    pub fn set_width(&mut self, unit: Unit, width: Width) {
        debug!("{:?}: width {:?}", unit, width);

        unit.bit_width_field().set(&mut self.regs, width as u32);
        unit.sample_bit_field().set(&mut self.regs, width as u32);
    }

    /// Returns the readout width currently programmed for `unit`.
    pub fn width(&self, unit: Unit) -> Width {
        match unit.sample_bit_field().get(&self.regs) {
            0b00 => Width::_9Bit,
            0b01 => Width::_10Bit,
            0b10 => Width::_11Bit,
            _ => Width::_12Bit,
        }
    }

    /// Sets the attenuation of the channel with ordinal `channel`.
    ///
    /// Ordinals 1–8 select a slot in `SENS_SAR_ATTEN1_REG`, 11–20 a slot in
    /// `SENS_SAR_ATTEN2_REG`. Any other ordinal fails with
    /// [`Error::InvalidChannel`] and leaves the registers untouched.
    pub fn set_attenuation(&mut self, channel: u8, attenuation: Attenuation) -> Result<(), Error> {
        let channel = Channel::new(channel)?;
        self.set_channel_attenuation(channel, attenuation);
        Ok(())
    }

    /// Sets the attenuation of `channel`.
    pub fn set_channel_attenuation(&mut self, channel: Channel, attenuation: Attenuation) {
        debug!("channel {}: attenuation {:?}", channel.ordinal(), attenuation);

        channel
            .attenuation_field()
            .set(&mut self.regs, attenuation as u32);
    }

    /// Returns the attenuation currently programmed for `channel`.
    pub fn attenuation(&self, channel: Channel) -> Attenuation {
        match channel.attenuation_field().get(&self.regs) {
            0b00 => Attenuation::_0dB,
            0b01 => Attenuation::_2p5dB,
            0b10 => Attenuation::_6dB,
            _ => Attenuation::_11dB,
        }
    }

    /// Programs the width and every enabled channel of `config`.
    ///
    /// Channels that are not enabled keep their current attenuation.
    pub fn apply(&mut self, config: &AdcConfig) {
        self.set_width(config.unit(), config.width());

        for (channel, attenuation) in config.channels() {
            self.set_channel_attenuation(channel, attenuation);
        }
    }

    /// Reads a raw register.
    pub fn read_register(&self, register: Register) -> u32 {
        self.regs.read(register)
    }

    /// Shared access to the register backend.
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Returns the register backend.
    pub fn release(self) -> R {
        self.regs
    }
}

/// A [`SarAdc`] that can be configured from multiple contexts.
///
/// Each [`lock`](Self::lock) call runs inside a critical section, so no two
/// read-modify-write sequences on the SENS registers can interleave.
pub struct SharedSarAdc<R> {
    inner: Mutex<RefCell<SarAdc<R>>>,
}

impl<R> SharedSarAdc<R>
where
    R: RegisterAccess,
{
    /// Wraps `adc` for shared use.
    pub const fn new(adc: SarAdc<R>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(adc)),
        }
    }

    /// Runs `f` with exclusive access to the driver.
    ///
    /// # Panics
    ///
    /// Panics if called reentrantly from within `f`.
    pub fn lock<T>(&self, f: impl FnOnce(&mut SarAdc<R>) -> T) -> T {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
