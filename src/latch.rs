//! GPIO latch control-transfer codec.
//!
//! Pure encoding: given a resolved [`ChipVariant`], a pin mask, and desired
//! pin states, produce the exact control-transfer fields for one latch
//! access. No I/O happens here, which is what makes the wire format
//! unit-testable without hardware.
//!
//! The "write latch" request takes a {mask, state} pair: mask selects which
//! latch bits the device may change, state gives the new level for masked
//! bits (0 = drive low, 1 = drive high). Unmasked bits are left untouched.

use crate::consts::latch;
use crate::variant::{Addressing, ChipVariant, LatchWidth};

/// Direction of a control transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Host to device (latch write).
    Out,
    /// Device to host (latch read).
    In,
}

/// The fields of a single vendor control transfer, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRequest {
    /// Transfer direction.
    pub direction: TransferDirection,
    /// Recipient of the request (interface- or device-scoped).
    pub addressing: Addressing,
    /// bRequest field.
    pub request: u8,
    /// wValue field (operation selector).
    pub value: u16,
    /// wIndex field: interface number, or packed pin data for CP2102N/3/4.
    pub index: u16,
    /// Data stage payload; empty for requests without one.
    pub data: Vec<u8>,
}

impl ControlRequest {
    /// The bmRequestType byte this request encodes to on the wire.
    pub fn request_type(&self) -> u8 {
        let direction = match self.direction {
            TransferDirection::Out => latch::REQ_DIR_OUT,
            TransferDirection::In => latch::REQ_DIR_IN,
        };
        let recipient = match self.addressing {
            Addressing::Interface => latch::REQ_RCPT_INTERFACE,
            Addressing::Device => latch::REQ_RCPT_DEVICE,
        };
        direction | latch::REQ_TYPE_VENDOR | recipient
    }
}

/// Encodes one latch write for the given variant.
///
/// `mask` and `state` are taken at the variant's latch width; the caller is
/// expected to have validated pin positions against that width already.
/// `interface` is only meaningful for interface-addressed variants and is
/// normalized through [`ChipVariant::effective_interface`].
pub fn encode_write(variant: ChipVariant, mask: u16, state: u16, interface: u8) -> ControlRequest {
    match variant.addressing() {
        Addressing::Interface => {
            // Payload layout mirrors the device register: {mask, state},
            // each field sized to the latch width, little-endian.
            let data = match variant.latch_width() {
                LatchWidth::Byte => vec![mask as u8, state as u8],
                LatchWidth::Word => {
                    let mut buf = Vec::with_capacity(4);
                    buf.extend_from_slice(&mask.to_le_bytes());
                    buf.extend_from_slice(&state.to_le_bytes());
                    buf
                }
            };
            ControlRequest {
                direction: TransferDirection::Out,
                addressing: Addressing::Interface,
                request: latch::REQ_VENDOR_SPECIFIC,
                value: latch::WVALUE_WRITE_LATCH,
                index: u16::from(variant.effective_interface(interface)),
                data,
            }
        }
        Addressing::Device => {
            // CP2102N/3/4 carry the pin data in wIndex instead of a payload:
            // high byte = state, low byte = mask. Both are 8-bit by
            // construction since the variant's latch is a byte wide.
            ControlRequest {
                direction: TransferDirection::Out,
                addressing: Addressing::Device,
                request: latch::REQ_VENDOR_SPECIFIC,
                value: latch::WVALUE_WRITE_LATCH,
                index: (state & 0x00FF) << 8 | (mask & 0x00FF),
                data: Vec::new(),
            }
        }
    }
}

/// Encodes a latch read for the given variant.
///
/// The response payload is one byte for 8-bit variants and two little-endian
/// bytes for the CP2108; see [`decode_read`].
pub fn encode_read(variant: ChipVariant, interface: u8) -> ControlRequest {
    ControlRequest {
        direction: TransferDirection::In,
        addressing: variant.addressing(),
        request: latch::REQ_VENDOR_SPECIFIC,
        value: latch::WVALUE_READ_LATCH,
        index: match variant.addressing() {
            Addressing::Interface => u16::from(variant.effective_interface(interface)),
            Addressing::Device => 0,
        },
        data: Vec::new(),
    }
}

/// Decodes a latch-read response into the current latch state.
///
/// Returns `None` if the response is shorter than the variant's latch width.
pub fn decode_read(variant: ChipVariant, data: &[u8]) -> Option<u16> {
    match variant.latch_width() {
        LatchWidth::Byte => data.first().map(|&b| u16::from(b)),
        LatchWidth::Word => {
            if data.len() >= 2 {
                Some(u16::from_le_bytes([data[0], data[1]]))
            } else {
                None
            }
        }
    }
}
