//! USB channel capability checks
//!
//! USB printing needs two things from the host: device support, and a
//! process that owns its own context. A print service running embedded in a
//! host shell never gets device access, even when the platform has it.

use std::path::{Path, PathBuf};

use crate::core::Config;

/// Host capabilities relevant to the USB channel
pub trait CapabilityProvider: Send + Sync {
    /// The host exposes serial/USB device support
    fn has_serial_support(&self) -> bool;

    /// The process runs as its own top-level context (not embedded)
    fn is_top_level(&self) -> bool;
}

/// Why the USB channel is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelGap {
    /// Running inside another host; fix is to run standalone
    Embedded,
    /// Host has no device support; fix is another machine or channel
    Unsupported,
}

impl ChannelGap {
    /// Operator-facing explanation for a failed print
    pub fn print_message(&self) -> &'static str {
        match self {
            ChannelGap::Embedded => {
                "USB printing is not supported while running embedded in another app. \
                 Open the print service in its own window, or use PrintNode or A4 printing."
            }
            ChannelGap::Unsupported => {
                "USB printing is not supported on this device. \
                 Use PrintNode or A4 printing instead."
            }
        }
    }

    /// Operator-facing explanation for a failed connect
    pub fn connect_message(&self) -> &'static str {
        match self {
            ChannelGap::Embedded => {
                "Cannot connect the USB printer while running embedded in another app. \
                 Open the print service in its own window."
            }
            ChannelGap::Unsupported => {
                "USB printers are not supported on this device. \
                 Use a host with USB device support."
            }
        }
    }
}

/// Which capability is missing, if any (embedding is reported first)
pub fn channel_gap(caps: &dyn CapabilityProvider) -> Option<ChannelGap> {
    if !caps.is_top_level() {
        Some(ChannelGap::Embedded)
    } else if !caps.has_serial_support() {
        Some(ChannelGap::Unsupported)
    } else {
        None
    }
}

/// True only when the host supports devices AND the process is top-level
pub fn is_channel_available(caps: &dyn CapabilityProvider) -> bool {
    channel_gap(caps).is_none()
}

/// Capabilities of the machine this process runs on
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    device_path: PathBuf,
    embedded: bool,
}

impl HostCapabilities {
    pub fn new(device_path: impl Into<PathBuf>, embedded: bool) -> Self {
        Self {
            device_path: device_path.into(),
            embedded,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.usb_device_path.clone(), config.embedded)
    }

    fn device_dir(&self) -> Option<&Path> {
        self.device_path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl CapabilityProvider for HostCapabilities {
    fn has_serial_support(&self) -> bool {
        // Device nodes only exist on Unix; the directory appears once the
        // kernel has a driver for the bus (usblp, usbserial)
        cfg!(unix) && self.device_dir().is_some_and(Path::is_dir)
    }

    fn is_top_level(&self) -> bool {
        !self.embedded
    }
}

/// Fixed capabilities, for tests and command-line overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCapabilities {
    pub serial_support: bool,
    pub top_level: bool,
}

impl StaticCapabilities {
    pub const AVAILABLE: Self = Self {
        serial_support: true,
        top_level: true,
    };
    pub const UNSUPPORTED: Self = Self {
        serial_support: false,
        top_level: true,
    };
    pub const EMBEDDED: Self = Self {
        serial_support: true,
        top_level: false,
    };
}

impl CapabilityProvider for StaticCapabilities {
    fn has_serial_support(&self) -> bool {
        self.serial_support
    }

    fn is_top_level(&self) -> bool {
        self.top_level
    }
}
