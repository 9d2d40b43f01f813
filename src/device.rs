//! Device discovery for GPIO-capable CP210x bridges.

use log::{debug, trace};

use crate::consts;
use crate::error::{Error, Result};
use crate::variant::ChipVariant;

/// Information about a discovered CP210x device.
/// Can be used with [`Cp210x::open`](crate::Cp210x::open) to connect to it.
#[derive(Debug, Clone)]
pub struct CpDeviceInfo {
    /// USB vendor ID (0x10C4 for Silicon Labs).
    pub vid: u16,
    /// USB product ID (one of 0xEA60 / 0xEA70 / 0xEA71).
    pub pid: u16,
    /// The chip family resolved from the product ID.
    pub variant: ChipVariant,
    /// Device serial number string, if the platform exposes one.
    pub serial_number: Option<String>,
    /// Human-readable product name/description.
    pub product_string: Option<String>,
    /// USB bus the device sits on.
    pub bus_number: u8,
    /// Address of the device on its bus.
    pub device_address: u8,
    pub(crate) raw: nusb::DeviceInfo,
}

/// Finds all connected GPIO-capable CP210x devices.
///
/// Matches the Silicon Labs VID against the three known product IDs. The
/// returned order is whatever the platform's enumeration yields and is not
/// guaranteed stable across runs.
pub fn find_all() -> Result<Vec<CpDeviceInfo>> {
    let mut devices = Vec::new();
    for info in nusb::list_devices().map_err(Error::Enumeration)? {
        trace!(
            "enumerated device {:04X}:{:04X}",
            info.vendor_id(),
            info.product_id()
        );
        if info.vendor_id() != consts::SILABS_VID {
            continue;
        }
        let Ok(variant) = ChipVariant::from_pid(info.product_id()) else {
            continue;
        };
        debug!(
            "found {} at bus {:03} addr {:03} (PID {:04X})",
            variant,
            info.bus_number(),
            info.device_address(),
            info.product_id()
        );
        devices.push(CpDeviceInfo {
            vid: info.vendor_id(),
            pid: info.product_id(),
            variant,
            serial_number: info.serial_number().map(String::from),
            product_string: info.product_string().map(String::from),
            bus_number: info.bus_number(),
            device_address: info.device_address(),
            raw: info,
        });
    }
    Ok(devices)
}

/// Finds the first connected GPIO-capable CP210x device.
///
/// **Warning:** if multiple bridges are attached, which one is "first" is
/// platform-defined. Use [`find_all`] to see the ambiguity; selection by
/// serial number is deliberately not implemented.
pub fn find_first() -> Result<CpDeviceInfo> {
    find_all()?.into_iter().next().ok_or(Error::DeviceNotFound)
}
