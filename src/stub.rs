use heapless::Vec;

use crate::register::{Register, RegisterAccess};

const HISTORY_LEN: usize = 32;

/// In-memory SENS register file.
///
/// Every register starts out with the same fill value. Writes are recorded
/// (up to a fixed number) so callers can check which registers an operation
/// touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emulated {
    regs: [u32; Register::ALL.len()],
    writes: Vec<(Register, u32), HISTORY_LEN>,
}

impl Emulated {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self::filled(0)
    }

    /// Creates a register file with every register set to `value`.
    pub const fn filled(value: u32) -> Self {
        Self {
            regs: [value; Register::ALL.len()],
            writes: Vec::new(),
        }
    }

    /// Writes performed since creation or the last [`Self::clear_history`],
    /// oldest first.
    ///
    /// Writes beyond the history capacity are not recorded.
    pub fn writes(&self) -> &[(Register, u32)] {
        &self.writes
    }

    /// Forgets recorded writes. Register contents are kept.
    pub fn clear_history(&mut self) {
        self.writes.clear();
    }

    fn index(register: Register) -> usize {
        match register {
            Register::SarReadCtrl => 0,
            Register::SarStartForce => 1,
            Register::SarAtten1 => 2,
            Register::SarAtten2 => 3,
            Register::SarReadCtrl2 => 4,
        }
    }
}

impl Default for Emulated {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterAccess for Emulated {
    fn read(&self, register: Register) -> u32 {
        self.regs[Self::index(register)]
    }

    fn write(&mut self, register: Register, value: u32) {
        self.regs[Self::index(register)] = value;
        // A full history only loses bookkeeping, not register state.
        let _ = self.writes.push((register, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_are_independent() {
        let mut regs = Emulated::new();
        regs.write(Register::SarAtten2, 0xdead_beef);

        for register in Register::ALL {
            let expected = if register == Register::SarAtten2 {
                0xdead_beef
            } else {
                0
            };
            assert_eq!(expected, regs.read(register));
        }
    }

    #[test]
    fn history_records_writes_in_order() {
        let mut regs = Emulated::filled(u32::MAX);
        regs.modify(Register::SarStartForce, |bits| bits & !0b11);
        regs.write(Register::SarReadCtrl, 1);

        assert_eq!(
            &[(Register::SarStartForce, !0b11), (Register::SarReadCtrl, 1)],
            regs.writes()
        );

        regs.clear_history();
        assert!(regs.writes().is_empty());
        assert_eq!(1, regs.read(Register::SarReadCtrl));
    }

    #[test]
    fn history_overflow_keeps_register_state() {
        let mut regs = Emulated::new();
        for value in 0..(HISTORY_LEN as u32 + 8) {
            regs.write(Register::SarAtten1, value);
        }

        assert_eq!(HISTORY_LEN, regs.writes().len());
        assert_eq!(HISTORY_LEN as u32 + 7, regs.read(Register::SarAtten1));
    }
}
