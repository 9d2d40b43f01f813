//! # cp210x-gpio
//!
//! A Rust crate for driving a target microcontroller into bootloader mode
//! through the GPIO latch of Silicon Labs CP2102N/CP2103/CP2104, CP2105 and
//! CP2108 USB-to-UART bridges.
//!
//! This crate uses the `nusb` crate for cross-platform USB control transfers.
//!
//! ## Features
//!
//! *   Device discovery ([`find_all`], [`find_first`]).
//! *   Variant resolution from the product ID ([`ChipVariant`]) — latch
//!     width, addressing mode and interface handling differ per family.
//! *   Pure, unit-testable latch codec ([`latch`]) producing the exact
//!     vendor control-transfer fields for each chip.
//! *   The timed reset / bootloader-activation sequence
//!     ([`ActivationPlan`], [`Cp210x::enter_bootloader`]): assert nRESET
//!     (and the active-low bootload pin, if wired) low together, hold 5 ms,
//!     release reset, hold the bootload pin through the 30 ms boot-ROM
//!     sampling window, release it.
//! *   Raw latch access ([`Cp210x::write_latch`], [`Cp210x::read_latch`]).
//!
//! Omitting the bootload pin performs a plain target reset — a valid mode,
//! not a degraded one.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use cp210x_gpio::{BootPins, Cp210x, GpioPin, Result};
//!
//! fn main() -> Result<()> {
//!     // GPIO0 wired to nRESET, GPIO1 to the active-low bootload pin.
//!     let pins = BootPins::new(GpioPin::new(0)?, Some(GpioPin::new(1)?))?;
//!
//!     // Interface 0 selects the ECI port on a CP2105; other models
//!     // ignore it.
//!     let device = Cp210x::open_first(0)?;
//!     println!("Found {}", device.variant());
//!
//!     device.enter_bootloader(&pins)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Hardware Setup Notes
//!
//! *   **Linux udev rules:** grant user permission to the USB device, e.g.
//!     in `/etc/udev/rules.d/99-cp210x.rules`:
//!     ```udev
//!     SUBSYSTEM=="usb", ATTRS{idVendor}=="10c4", ATTRS{idProduct}=="ea60", MODE="0666"
//!     SUBSYSTEM=="usb", ATTRS{idVendor}=="10c4", ATTRS{idProduct}=="ea70", MODE="0666"
//!     SUBSYSTEM=="usb", ATTRS{idVendor}=="10c4", ATTRS{idProduct}=="ea71", MODE="0666"
//!     ```
//! *   **Kernel driver:** the cp210x serial driver normally owns the
//!     interface; it is detached while the interface is claimed and
//!     re-attached when the handle is dropped.
//! *   The latch write only changes pins configured as GPIO outputs in the
//!     chip's one-time-programmable config; pins left on their UART modem
//!     functions are unaffected.

use std::thread;

use log::{debug, trace};
use nusb::transfer::{Control, ControlType, Recipient};

mod consts;
mod error;
pub mod device;
pub mod gpio;
pub mod latch;
pub mod sequence;
pub mod variant;

pub use consts::{CP2102N_PID, CP2105_PID, CP2108_PID, SILABS_VID};
pub use device::{find_all, find_first, CpDeviceInfo};
pub use error::{Error, Result};
pub use gpio::{BootPins, GpioPin};
pub use latch::ControlRequest;
pub use sequence::{ActivationPlan, LatchWrite, PlanStep};
pub use variant::{Addressing, ChipVariant, LatchWidth};

use consts::timing;
use latch::{decode_read, encode_read, encode_write};

/// A handle to an opened CP210x device with its interface claimed.
///
/// The handle is scoped to one invocation: open, claim, use, release, close.
/// Dropping it releases the claimed interface (re-attaching the kernel
/// serial driver where applicable) and closes the device, on success and
/// failure paths alike.
pub struct Cp210x {
    // Declared before `device` so the claim is released before close.
    interface: nusb::Interface,
    device: nusb::Device,
    variant: ChipVariant,
    interface_number: u8,
}

impl Cp210x {
    /// Opens a discovered device and claims the interface the latch writes
    /// will address.
    ///
    /// `interface` selects the CP2105 port (ECI = 0, SCI = 1) and is
    /// ignored (forced to 0) for the other families.
    pub fn open(info: &CpDeviceInfo, interface: u8) -> Result<Self> {
        let variant = info.variant;
        let interface_number = variant.effective_interface(interface);
        let device = info.raw.open().map_err(|source| Error::DeviceOpenFailed {
            vid: info.vid,
            pid: info.pid,
            source,
        })?;
        debug!(
            "opened {} ({:04X}:{:04X}), claiming interface {}",
            variant, info.vid, info.pid, interface_number
        );
        let usb_interface = device
            .detach_and_claim_interface(interface_number)
            .map_err(|source| Error::ClaimFailed {
                interface: interface_number,
                source,
            })?;
        Ok(Self {
            interface: usb_interface,
            device,
            variant,
            interface_number,
        })
    }

    /// Opens the first discovered CP210x device.
    /// **Warning:** ambiguous if multiple bridges are attached.
    pub fn open_first(interface: u8) -> Result<Self> {
        let info = device::find_first()?;
        Self::open(&info, interface)
    }

    /// The chip family this handle talks to.
    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    /// The interface number latch accesses address (always 0 except CP2105).
    pub fn interface_number(&self) -> u8 {
        self.interface_number
    }

    /// Runs the full reset / bootloader-activation sequence for the given
    /// pins. Pin validation happens during plan construction, before any
    /// transfer is issued.
    pub fn enter_bootloader(&self, pins: &BootPins) -> Result<()> {
        let plan = ActivationPlan::build(self.variant, pins, self.interface_number)?;
        self.execute(plan)
    }

    /// Executes an activation plan, consuming it.
    ///
    /// Each write is a blocking control transfer; delays are blocking sleeps
    /// on the calling thread. The first failing transfer aborts the sequence
    /// — partial sequences are not rolled back, since the device's pin state
    /// is not recoverable once the transport has failed.
    pub fn execute(&self, plan: ActivationPlan) -> Result<()> {
        debug!(
            "running activation sequence on {} ({} writes)",
            self.variant,
            plan.write_count()
        );
        for step in plan.steps() {
            match step {
                PlanStep::Write(write) => {
                    let request = plan.encode(write);
                    self.submit(&request, write.step)?;
                }
                PlanStep::Settle(delay) => {
                    trace!("settling for {:?}", delay);
                    thread::sleep(*delay);
                }
            }
        }
        Ok(())
    }

    /// Writes the GPIO latch directly: bits in `mask` take the level given
    /// by `state`, other pins are untouched.
    pub fn write_latch(&self, mask: u16, state: u16) -> Result<()> {
        let limit = self.variant.latch_width().full_mask();
        if mask & !limit != 0 {
            return Err(Error::MaskOutOfRange {
                mask,
                variant: self.variant.name(),
                limit,
            });
        }
        let request = encode_write(self.variant, mask, state, self.interface_number);
        self.submit(&request, "write latch")
    }

    /// Reads the current GPIO latch state.
    pub fn read_latch(&self) -> Result<u16> {
        let request = encode_read(self.variant, self.interface_number);
        let mut buf = vec![0u8; self.variant.latch_width().bytes()];
        let transferred = match request.addressing {
            Addressing::Interface => self.interface.control_in_blocking(
                Self::control_fields(&request),
                &mut buf,
                timing::TRANSFER_TIMEOUT,
            ),
            Addressing::Device => self.device.control_in_blocking(
                Self::control_fields(&request),
                &mut buf,
                timing::TRANSFER_TIMEOUT,
            ),
        }
        .map_err(|source| Error::TransferFailed {
            step: "read latch",
            source,
        })?;
        trace!("read latch: {:02X?}", &buf[..transferred]);
        decode_read(self.variant, &buf[..transferred]).ok_or(Error::TransferTruncated {
            step: "read latch",
            transferred,
            expected: buf.len(),
        })
    }

    fn control_fields(request: &ControlRequest) -> Control {
        Control {
            control_type: ControlType::Vendor,
            recipient: match request.addressing {
                Addressing::Interface => Recipient::Interface,
                Addressing::Device => Recipient::Device,
            },
            request: request.request,
            value: request.value,
            index: request.index,
        }
    }

    // Issues one blocking OUT transfer, routed per the request's recipient.
    fn submit(&self, request: &ControlRequest, step: &'static str) -> Result<()> {
        trace!(
            "{}: bmRequestType=0x{:02X} wValue=0x{:04X} wIndex=0x{:04X} data={:02X?}",
            step,
            request.request_type(),
            request.value,
            request.index,
            request.data
        );
        let transferred = match request.addressing {
            Addressing::Interface => self.interface.control_out_blocking(
                Self::control_fields(request),
                &request.data,
                timing::TRANSFER_TIMEOUT,
            ),
            Addressing::Device => self.device.control_out_blocking(
                Self::control_fields(request),
                &request.data,
                timing::TRANSFER_TIMEOUT,
            ),
        }
        .map_err(|source| Error::TransferFailed { step, source })?;
        if transferred != request.data.len() {
            return Err(Error::TransferTruncated {
                step,
                transferred,
                expected: request.data.len(),
            });
        }
        Ok(())
    }
}
