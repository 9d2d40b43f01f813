use crate::consts;
use crate::error::{Error, Result};

/// Represents a valid CP210x GPIO number (0-15).
/// Use `GpioPin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpioPin(pub(crate) u8);

impl GpioPin {
    /// Creates a new GpioPin, returning an error if the number is out of range (0-15).
    ///
    /// Whether the pin fits a particular chip's latch register (0-7 on the
    /// 8-bit variants) is checked later against the resolved [`ChipVariant`](crate::ChipVariant).
    pub fn new(pin_num: u8) -> Result<Self> {
        if pin_num <= consts::MAX_GPIO_PIN {
            Ok(GpioPin(pin_num))
        } else {
            Err(Error::PinOutOfRange {
                pin: pin_num,
                message: "pin number must be 0-15".to_string(),
            })
        }
    }

    /// Returns the underlying pin number (0-15).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the single-bit latch mask (1 << number) for this pin.
    #[inline]
    pub fn mask(&self) -> u16 {
        1u16 << self.0
    }
}

/// The pin pair driven by the activation sequence: a reset pin and an
/// optional active-low bootloader-activation pin.
///
/// "No bootload pin" is a valid mode (plain target reset), not a degraded
/// path. Use `BootPins::new` to create; it rejects colliding pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootPins {
    reset: GpioPin,
    bootload: Option<GpioPin>,
}

impl BootPins {
    /// Creates the pin pair, rejecting `reset == bootload`.
    pub fn new(reset: GpioPin, bootload: Option<GpioPin>) -> Result<Self> {
        if let Some(bootload_pin) = bootload {
            if bootload_pin == reset {
                return Err(Error::PinConflict {
                    pin: reset.number(),
                });
            }
        }
        Ok(BootPins { reset, bootload })
    }

    /// The pin wired to the target's nRESET line.
    #[inline]
    pub fn reset(&self) -> GpioPin {
        self.reset
    }

    /// The pin wired to the target's active-low bootloader-activation line,
    /// if one was supplied.
    #[inline]
    pub fn bootload(&self) -> Option<GpioPin> {
        self.bootload
    }

    /// Mask covering both pins (or just reset when no bootload pin is set).
    #[inline]
    pub fn combined_mask(&self) -> u16 {
        self.reset.mask() | self.bootload.map_or(0, |pin| pin.mask())
    }
}
