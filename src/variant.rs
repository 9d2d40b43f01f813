//! Chip-variant descriptor table.
//!
//! The three GPIO-capable CP210x families differ in latch register width and
//! in how the "write latch" request is addressed. This module is the single
//! place those differences live; the codec and sequencer are parameterized by
//! [`ChipVariant`] instead of branching on product IDs themselves.

use std::fmt;

use crate::consts;
use crate::error::{Error, Result};
use crate::gpio::GpioPin;

/// How the latch request is addressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Host-to-interface request; wIndex carries the interface number.
    Interface,
    /// Host-to-device request; wIndex carries the packed {state, mask} bytes.
    Device,
}

/// Width of the GPIO latch register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchWidth {
    /// 8-bit latch (CP2102N/3/4, CP2105).
    Byte,
    /// 16-bit latch (CP2108).
    Word,
}

impl LatchWidth {
    /// Size of one latch field (mask or state) on the wire, in bytes.
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            LatchWidth::Byte => 1,
            LatchWidth::Word => 2,
        }
    }

    /// All-ones value across the register width.
    #[inline]
    pub fn full_mask(self) -> u16 {
        match self {
            LatchWidth::Byte => 0x00FF,
            LatchWidth::Word => 0xFFFF,
        }
    }

    /// Highest pin number the register can address.
    #[inline]
    pub fn max_pin(self) -> u8 {
        match self {
            LatchWidth::Byte => 7,
            LatchWidth::Word => 15,
        }
    }
}

/// One of the three GPIO-capable CP210x families, resolved once per run from
/// the product ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipVariant {
    /// CP2102N, CP2103 or CP2104 (PID 0xEA60): 8-bit latch, no payload —
    /// mask and state are folded into wIndex, device-addressed. This is a
    /// real protocol quirk of the family, not an oversight.
    Cp2102n,
    /// CP2105 (PID 0xEA70): 8-bit latch per interface, interface-addressed.
    /// The interface number selects the port (ECI = 0, SCI = 1).
    Cp2105,
    /// CP2108 (PID 0xEA71): 16-bit latch, interface-addressed, interface
    /// number ignored (forced to 0).
    Cp2108,
}

impl ChipVariant {
    /// Looks up the variant for a product ID.
    ///
    /// The locator only surfaces known PIDs, so an `UnsupportedVariant` here
    /// indicates an internal inconsistency between the filter and this table.
    pub fn from_pid(pid: u16) -> Result<Self> {
        match pid {
            consts::CP2102N_PID => Ok(ChipVariant::Cp2102n),
            consts::CP2105_PID => Ok(ChipVariant::Cp2105),
            consts::CP2108_PID => Ok(ChipVariant::Cp2108),
            _ => Err(Error::UnsupportedVariant { pid }),
        }
    }

    /// The product ID this variant was resolved from.
    pub fn pid(self) -> u16 {
        match self {
            ChipVariant::Cp2102n => consts::CP2102N_PID,
            ChipVariant::Cp2105 => consts::CP2105_PID,
            ChipVariant::Cp2108 => consts::CP2108_PID,
        }
    }

    /// Human-readable family name for messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            ChipVariant::Cp2102n => "CP2102N/CP2103/CP2104",
            ChipVariant::Cp2105 => "CP2105",
            ChipVariant::Cp2108 => "CP2108",
        }
    }

    /// Width of this variant's latch register.
    pub fn latch_width(self) -> LatchWidth {
        match self {
            ChipVariant::Cp2102n | ChipVariant::Cp2105 => LatchWidth::Byte,
            ChipVariant::Cp2108 => LatchWidth::Word,
        }
    }

    /// How this variant's latch request is addressed.
    pub fn addressing(self) -> Addressing {
        match self {
            ChipVariant::Cp2102n => Addressing::Device,
            ChipVariant::Cp2105 | ChipVariant::Cp2108 => Addressing::Interface,
        }
    }

    /// Whether the caller-supplied interface index is meaningful.
    /// Only the CP2105 has per-interface GPIO banks.
    pub fn supports_interface_index(self) -> bool {
        matches!(self, ChipVariant::Cp2105)
    }

    /// The interface number actually used on the wire: the requested one for
    /// CP2105, 0 for everything else.
    pub fn effective_interface(self, requested: u8) -> u8 {
        if self.supports_interface_index() {
            requested
        } else {
            0
        }
    }

    /// Checks that a pin fits this variant's latch register, up front —
    /// rather than deferring to a mask-overflow check after shifting.
    pub fn check_pin(self, pin: GpioPin) -> Result<()> {
        let max = self.latch_width().max_pin();
        if pin.number() > max {
            Err(Error::PinOutOfRange {
                pin: pin.number(),
                message: format!("{} latch register only addresses pins 0-{}", self.name(), max),
            })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ChipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
