//! Internal constants: USB IDs, control-request fields, and sequence timing.

// Default Vendor/Product IDs
/// Silicon Labs vendor ID for CP210x devices.
pub const SILABS_VID: u16 = 0x10C4;

// Product IDs for the three GPIO-capable CP210x families.
// Note: 0xEA60 is shared by CP2102N, CP2103 and CP2104.
/// Product ID for CP2102N/CP2103/CP2104 (single port, latch data in wIndex).
pub const CP2102N_PID: u16 = 0xEA60;
/// Product ID for CP2105 (dual port, 8-bit latch per interface).
pub const CP2105_PID: u16 = 0xEA70;
/// Product ID for CP2108 (quad port, 16-bit latch).
pub const CP2108_PID: u16 = 0xEA71;

/// Highest GPIO number addressable in any CP210x latch register.
pub const MAX_GPIO_PIN: u8 = 15;

// --- Vendor Control Requests (AN571) ---
pub mod latch {
    /// bRequest for all CP210x vendor-specific configuration requests.
    pub const REQ_VENDOR_SPECIFIC: u8 = 0xFF;
    /// wValue selecting the "write GPIO latch" operation.
    pub const WVALUE_WRITE_LATCH: u16 = 0x37E1;
    /// wValue selecting the "read GPIO latch" operation.
    pub const WVALUE_READ_LATCH: u16 = 0x00C2;

    // bmRequestType building blocks
    pub const REQ_DIR_OUT: u8 = 0x00;
    pub const REQ_DIR_IN: u8 = 0x80;
    pub const REQ_TYPE_VENDOR: u8 = 0x40;
    pub const REQ_RCPT_DEVICE: u8 = 0x00;
    pub const REQ_RCPT_INTERFACE: u8 = 0x01;
}

// --- Sequence Timing ---
pub mod timing {
    use std::time::Duration;

    /// Minimum reset pulse width held between assert and release.
    pub const RESET_HOLD: Duration = Duration::from_millis(5);
    /// Boot-ROM sampling window held after reset release, before the
    /// bootloader-activation pin is let go.
    pub const BOOT_SAMPLE_WINDOW: Duration = Duration::from_millis(30);
    /// Timeout for a single blocking control transfer.
    pub const TRANSFER_TIMEOUT: Duration = Duration::from_millis(500);
}
