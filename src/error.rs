use thiserror::Error;

/// Errors that can occur when locating, opening, or driving a CP210x device.
///
/// Every variant is terminal for the current invocation: the crate never
/// retries on its own, and a failed sequence is not rolled back (the target's
/// pin state is not recoverable by software once the transport has failed).
#[derive(Error, Debug)]
pub enum Error {
    /// USB enumeration itself failed before any device could be matched.
    #[error("USB enumeration failed: {0}")]
    Enumeration(#[source] std::io::Error),
    /// No CP210x device was found with the Silicon Labs VID and a known PID.
    #[error("no CP210x device found (VID 0x10C4, PID 0xEA60/0xEA70/0xEA71)")]
    DeviceNotFound,
    /// A matching device was found but could not be opened.
    #[error("failed to open CP210x device {vid:04X}:{pid:04X}: {source}")]
    DeviceOpenFailed {
        /// Vendor ID of the device that failed to open.
        vid: u16,
        /// Product ID of the device that failed to open.
        pid: u16,
        #[source]
        source: std::io::Error,
    },
    /// The USB interface could not be claimed (typically held by the
    /// cp210x kernel serial driver and detach was refused).
    #[error("failed to claim interface {interface}: {source}")]
    ClaimFailed {
        /// Interface number that could not be claimed.
        interface: u8,
        #[source]
        source: std::io::Error,
    },
    /// A control transfer was rejected or errored by the USB stack.
    #[error("control transfer failed while trying to {step}: {source}")]
    TransferFailed {
        /// The sequence step being performed, e.g. "assert reset".
        step: &'static str,
        #[source]
        source: nusb::transfer::TransferError,
    },
    /// A control transfer moved fewer bytes than requested.
    #[error("short control transfer while trying to {step} ({transferred} of {expected} bytes)")]
    TransferTruncated {
        /// The sequence step being performed.
        step: &'static str,
        /// Bytes actually transferred.
        transferred: usize,
        /// Bytes requested.
        expected: usize,
    },
    /// GPIO pin number is outside the valid range for this device.
    #[error("GPIO pin {pin} out of range: {message}")]
    PinOutOfRange {
        /// The invalid pin number that was specified.
        pin: u8,
        /// Detailed message naming the constraint that was violated.
        message: String,
    },
    /// The same pin was given for both reset and bootloader activation.
    #[error("reset and bootloader-activation pins must differ (both set to {pin})")]
    PinConflict {
        /// The colliding pin number.
        pin: u8,
    },
    /// A raw latch mask does not fit the variant's register width.
    #[error("latch mask 0x{mask:04X} does not fit the {variant} register (max 0x{limit:04X})")]
    MaskOutOfRange {
        /// The rejected mask.
        mask: u16,
        /// Variant name, e.g. "CP2105".
        variant: &'static str,
        /// Widest mask the register accepts.
        limit: u16,
    },
    /// Product ID passed the locator's filter but has no variant descriptor.
    /// This is an internal-consistency error and should not occur.
    #[error("product ID 0x{pid:04X} is not a known CP210x GPIO variant")]
    UnsupportedVariant {
        /// The unrecognized product ID.
        pid: u16,
    },
}

/// Result type alias for CP210x operations.
pub type Result<T> = std::result::Result<T, Error>;
