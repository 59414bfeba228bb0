//! # SENS register access
//!
//! ## Overview
//!
//! The SAR ADC units are configured through a handful of registers in the
//! SENS peripheral. This module names those registers, describes the
//! bit-fields this crate touches, and provides the read-modify-write
//! primitive every configuration operation is built on.
//!
//! The actual load/store is performed by a [`RegisterAccess`]
//! implementation: [`Mmio`](crate::Mmio) on the chip, or
//! [`Emulated`](crate::Emulated) on the host.
//!
//! A read-modify-write is not atomic in hardware. Two contexts updating
//! different fields of the same register can lose each other's update, so
//! every call that modifies a register requires exclusive (`&mut`) access to
//! the backend. See [`SharedSarAdc`](crate::SharedSarAdc) for sharing one
//! backend between contexts.

use crate::fmt::Hex;

/// Base address of the SENS peripheral on the ESP32.
pub const DR_REG_SENS_BASE: u32 = 0x3FF4_8800;

/// A SENS register used for ADC configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// `SENS_SAR_READ_CTRL_REG`, read control of SAR ADC1.
    SarReadCtrl,
    /// `SENS_SAR_START_FORCE_REG`, shared by both units.
    SarStartForce,
    /// `SENS_SAR_ATTEN1_REG`, per-channel attenuation of SAR ADC1.
    SarAtten1,
    /// `SENS_SAR_ATTEN2_REG`, per-channel attenuation of SAR ADC2.
    SarAtten2,
    /// `SENS_SAR_READ_CTRL2_REG`, read control of SAR ADC2.
    SarReadCtrl2,
}

impl Register {
    /// Every register this crate touches.
    pub const ALL: [Register; 5] = [
        Register::SarReadCtrl,
        Register::SarStartForce,
        Register::SarAtten1,
        Register::SarAtten2,
        Register::SarReadCtrl2,
    ];

    /// Offset of the register from [`DR_REG_SENS_BASE`].
    pub const fn offset(self) -> u32 {
        match self {
            Register::SarReadCtrl => 0x0000,
            Register::SarStartForce => 0x002c,
            Register::SarAtten1 => 0x0034,
            Register::SarAtten2 => 0x0038,
            Register::SarReadCtrl2 => 0x0090,
        }
    }

    /// Absolute address of the register.
    pub const fn address(self) -> u32 {
        DR_REG_SENS_BASE + self.offset()
    }
}

/// Raw 32-bit load/store of SENS registers.
pub trait RegisterAccess {
    /// Reads the current contents of `register`.
    fn read(&self, register: Register) -> u32;

    /// Overwrites `register` with `value`.
    fn write(&mut self, register: Register, value: u32);

    /// Reads `register`, passes its value to `f` and writes the result back.
    fn modify(&mut self, register: Register, f: impl FnOnce(u32) -> u32) {
        let value = f(self.read(register));
        self.write(register, value);
    }
}

const fn field_mask(width: u8) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Replaces the `width`-bit field at `shift` in `register` with `value`.
///
/// The whole field is cleared before `value` is written, and every bit
/// outside the field keeps its previous contents. `value` is truncated to
/// `width` bits.
pub fn set_field<R>(regs: &mut R, register: Register, shift: u8, width: u8, value: u32)
where
    R: RegisterAccess + ?Sized,
{
    debug_assert!(shift as u32 + width as u32 <= 32);

    let mask = field_mask(width);
    let clear = mask << shift;
    let set = (value & mask) << shift;

    regs.modify(register, |bits| (bits & !clear) | set);

    trace!("{:?}: field {}+{} <- {}", register, shift, width, Hex(value & mask));
}

/// Extracts the `width`-bit field at `shift` from `register`.
pub fn get_field<R>(regs: &R, register: Register, shift: u8, width: u8) -> u32
where
    R: RegisterAccess + ?Sized,
{
    (regs.read(register) >> shift) & field_mask(width)
}

/// Location of a configuration value inside a SENS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterField {
    /// Register holding the field.
    pub register: Register,
    /// Position of the field's least significant bit.
    pub shift: u8,
    /// Width of the field in bits.
    pub width: u8,
}

impl RegisterField {
    /// Describes a field of `width` bits starting at bit `shift`.
    pub const fn new(register: Register, shift: u8, width: u8) -> Self {
        Self {
            register,
            shift,
            width,
        }
    }

    /// Bits of the register covered by this field.
    pub const fn mask(&self) -> u32 {
        field_mask(self.width) << self.shift
    }

    /// Writes `value` into this field.
    pub fn set<R: RegisterAccess + ?Sized>(&self, regs: &mut R, value: u32) {
        set_field(regs, self.register, self.shift, self.width, value)
    }

    /// Reads this field.
    pub fn get<R: RegisterAccess + ?Sized>(&self, regs: &R) -> u32 {
        get_field(regs, self.register, self.shift, self.width)
    }
}

/// `SENS_SAR1_BIT_WIDTH`
pub const SAR1_BIT_WIDTH: RegisterField = RegisterField::new(Register::SarStartForce, 0, 2);
/// `SENS_SAR2_BIT_WIDTH`
pub const SAR2_BIT_WIDTH: RegisterField = RegisterField::new(Register::SarStartForce, 2, 2);
/// `SENS_SAR1_SAMPLE_BIT`
pub const SAR1_SAMPLE_BIT: RegisterField = RegisterField::new(Register::SarReadCtrl, 16, 2);
/// `SENS_SAR2_SAMPLE_BIT`
pub const SAR2_SAMPLE_BIT: RegisterField = RegisterField::new(Register::SarReadCtrl2, 16, 2);
