//! # ADC units and channels
//!
//! The ESP32 has two SAR ADC units. Channels are identified by an ordinal
//! whose numbering is disjoint between the units, so an ordinal on its own
//! determines the unit it belongs to:
//!
//! | Unit | Ordinals | GPIOs (in channel order)                  |
//! |------|----------|-------------------------------------------|
//! | ADC1 | 1–8      | 36, 37, 38, 39, 32, 33, 34, 35            |
//! | ADC2 | 11–20    | 4, 0, 2, 15, 13, 12, 14, 27, 25, 26       |
//!
//! Reconfiguring the returned GPIO as an analog input is up to the caller.

use crate::{
    Error,
    register::{
        Register,
        RegisterField,
        SAR1_BIT_WIDTH,
        SAR1_SAMPLE_BIT,
        SAR2_BIT_WIDTH,
        SAR2_SAMPLE_BIT,
    },
};

/// GPIO numbers of ADC1 channels 0..=7.
pub const ADC1_CHANNEL_TO_GPIO: [u8; 8] = [
    36, // SENSOR_VP
    37, // SENSOR_CAPP
    38, // SENSOR_CAPN
    39, // SENSOR_VN
    32, // 32K_XP
    33, // 32K_XN
    34, // VDET_1
    35, // VDET_2
];

/// GPIO numbers of ADC2 channels 0..=9.
pub const ADC2_CHANNEL_TO_GPIO: [u8; 10] = [
    4,
    0,
    2,
    15, // MTDO
    13, // MTCK
    12, // MTDI
    14, // MTMS
    27,
    25,
    26,
];

/// One of the two SAR ADC units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Unit {
    /// SAR ADC1
    Adc1 = 0,
    /// SAR ADC2
    Adc2 = 1,
}

impl TryFrom<u8> for Unit {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Unit::Adc1),
            1 => Ok(Unit::Adc2),
            _ => Err(Error::InvalidUnit),
        }
    }
}

impl Unit {
    /// Number of channels multiplexed into this unit.
    pub const fn channel_count(self) -> u8 {
        self.gpio_table().len() as u8
    }

    /// Ordinal of this unit's channel 0.
    pub const fn first_ordinal(self) -> u8 {
        match self {
            Unit::Adc1 => 1,
            Unit::Adc2 => 11,
        }
    }

    /// The channel-to-GPIO table of this unit.
    pub const fn gpio_table(self) -> &'static [u8] {
        match self {
            Unit::Adc1 => &ADC1_CHANNEL_TO_GPIO,
            Unit::Adc2 => &ADC2_CHANNEL_TO_GPIO,
        }
    }

    /// Returns the GPIO wired to channel `index` of this unit.
    ///
    /// `index` is zero-based. Fails with [`Error::OutOfRange`] if the unit
    /// has no such channel.
    pub fn gpio(self, index: u8) -> Result<u8, Error> {
        self.gpio_table()
            .get(index as usize)
            .copied()
            .ok_or(Error::OutOfRange)
    }

    pub(crate) const fn bit_width_field(self) -> RegisterField {
        match self {
            Unit::Adc1 => SAR1_BIT_WIDTH,
            Unit::Adc2 => SAR2_BIT_WIDTH,
        }
    }

    pub(crate) const fn sample_bit_field(self) -> RegisterField {
        match self {
            Unit::Adc1 => SAR1_SAMPLE_BIT,
            Unit::Adc2 => SAR2_SAMPLE_BIT,
        }
    }

    pub(crate) const fn attenuation_register(self) -> Register {
        match self {
            Unit::Adc1 => Register::SarAtten1,
            Unit::Adc2 => Register::SarAtten2,
        }
    }
}

/// Returns the GPIO wired to channel `index` of the unit with raw tag `unit`.
///
/// Fails with [`Error::InvalidUnit`] for an unknown unit tag and with
/// [`Error::OutOfRange`] for an index past the unit's last channel.
pub fn channel_to_gpio(unit: u8, index: u8) -> Result<u8, Error> {
    Unit::try_from(unit)?.gpio(index)
}

/// An ADC input channel, identified by its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Validates a channel ordinal.
    ///
    /// Fails with [`Error::InvalidChannel`] unless `ordinal` is in 1–8
    /// (ADC1) or 11–20 (ADC2).
    pub const fn new(ordinal: u8) -> Result<Self, Error> {
        match ordinal {
            1..=8 | 11..=20 => Ok(Self(ordinal)),
            _ => Err(Error::InvalidChannel),
        }
    }

    /// The channel with zero-based `index` on `unit`.
    pub fn from_unit_index(unit: Unit, index: u8) -> Result<Self, Error> {
        if index < unit.channel_count() {
            Ok(Self(unit.first_ordinal() + index))
        } else {
            Err(Error::OutOfRange)
        }
    }

    /// Iterates over every channel of `unit`.
    pub fn all(unit: Unit) -> impl Iterator<Item = Channel> {
        (0..unit.channel_count()).map(move |index| Self(unit.first_ordinal() + index))
    }

    /// The raw ordinal.
    pub const fn ordinal(self) -> u8 {
        self.0
    }

    /// The unit this channel belongs to.
    pub const fn unit(self) -> Unit {
        if self.0 < Unit::Adc2.first_ordinal() {
            Unit::Adc1
        } else {
            Unit::Adc2
        }
    }

    /// Zero-based index of this channel within its unit.
    pub const fn index(self) -> u8 {
        self.0 - self.unit().first_ordinal()
    }

    /// The GPIO wired to this channel.
    pub fn gpio(self) -> u8 {
        // A validated channel always has an entry in its unit's table.
        self.unit().gpio_table()[self.index() as usize]
    }

    /// Location of this channel's 2-bit attenuation slot.
    pub const fn attenuation_field(self) -> RegisterField {
        RegisterField::new(self.unit().attenuation_register(), self.index() * 2, 2)
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::new(ordinal)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_documented_gpio() {
        for (index, gpio) in ADC1_CHANNEL_TO_GPIO.iter().enumerate() {
            assert_eq!(Ok(*gpio), Unit::Adc1.gpio(index as u8));
            assert_eq!(Ok(*gpio), channel_to_gpio(0, index as u8));
        }
        for (index, gpio) in ADC2_CHANNEL_TO_GPIO.iter().enumerate() {
            assert_eq!(Ok(*gpio), Unit::Adc2.gpio(index as u8));
            assert_eq!(Ok(*gpio), channel_to_gpio(1, index as u8));
        }

        assert_eq!(Ok(36), Unit::Adc1.gpio(0));
        assert_eq!(Ok(26), Unit::Adc2.gpio(9));
    }

    #[test]
    fn index_past_table_is_out_of_range() {
        assert_eq!(Err(Error::OutOfRange), Unit::Adc1.gpio(8));
        assert_eq!(Err(Error::OutOfRange), Unit::Adc1.gpio(u8::MAX));
        assert_eq!(Err(Error::OutOfRange), Unit::Adc2.gpio(10));
        assert_eq!(Err(Error::OutOfRange), channel_to_gpio(1, 10));
    }

    #[test]
    fn unknown_unit_tag() {
        assert_eq!(Err(Error::InvalidUnit), Unit::try_from(2u8));
        assert_eq!(Err(Error::InvalidUnit), channel_to_gpio(2, 0));
        assert_eq!(Err(Error::InvalidUnit), channel_to_gpio(0xff, 0));
        assert_eq!(Ok(Unit::Adc2), Unit::try_from(Unit::Adc2 as u8));
    }

    #[test]
    fn ordinal_ranges() {
        for ordinal in 0..=u8::MAX {
            let valid = matches!(ordinal, 1..=8 | 11..=20);
            assert_eq!(valid, Channel::new(ordinal).is_ok(), "ordinal {ordinal}");
        }

        assert_eq!(Err(Error::InvalidChannel), Channel::try_from(9u8));
        assert_eq!(Err(Error::InvalidChannel), Channel::try_from(10u8));
        assert_eq!(Err(Error::InvalidChannel), Channel::try_from(21u8));
    }

    #[test]
    fn ordinal_encodes_unit_and_index() {
        let channel = Channel::new(3).unwrap();
        assert_eq!(Unit::Adc1, channel.unit());
        assert_eq!(2, channel.index());
        assert_eq!(38, channel.gpio());

        let channel = Channel::new(15).unwrap();
        assert_eq!(Unit::Adc2, channel.unit());
        assert_eq!(4, channel.index());
        assert_eq!(13, channel.gpio());

        assert_eq!(Ok(channel), Channel::from_unit_index(Unit::Adc2, 4));
        assert_eq!(Err(Error::OutOfRange), Channel::from_unit_index(Unit::Adc1, 8));
    }

    #[test]
    fn attenuation_slots_do_not_overlap() {
        for unit in [Unit::Adc1, Unit::Adc2] {
            let mut used = 0u32;
            for channel in Channel::all(unit) {
                let field = channel.attenuation_field();
                assert_eq!(unit.attenuation_register(), field.register);
                assert_eq!(0, used & field.mask());
                used |= field.mask();
            }
            assert_eq!(used.count_ones(), unit.channel_count() as u32 * 2);
        }
    }

    #[test]
    fn all_matches_channel_count() {
        assert_eq!(8, Channel::all(Unit::Adc1).count());
        assert_eq!(10, Channel::all(Unit::Adc2).count());
        assert_eq!(Some(20), Channel::all(Unit::Adc2).last().map(Channel::ordinal));
    }
}
