// GKey Core - Device Event Codes
// Structured form of a single G-key / mouse button event

use std::fmt;

/// The device class an event originated from.
///
/// The keyboard is the primary class; mice (and other pointing devices)
/// are the secondary class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    #[default]
    Keyboard,
    Mouse,
}

impl DeviceClass {
    /// Build from the vendor SDK's `mouse` flag
    pub fn from_secondary(is_secondary_device: bool) -> Self {
        if is_secondary_device {
            DeviceClass::Mouse
        } else {
            DeviceClass::Keyboard
        }
    }

    /// Returns true for the secondary (pointing device) class
    pub fn is_secondary(self) -> bool {
        matches!(self, DeviceClass::Mouse)
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Keyboard => write!(f, "keyboard"),
            DeviceClass::Mouse => write!(f, "mouse"),
        }
    }
}

/// One physical input event as reported by the device SDK.
///
/// Only `device`, `key_index` and `modal_state` identify the key; `is_press`
/// is transient event state and never part of the persisted identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceEventCode {
    pub device: DeviceClass,
    /// Ordinal of the key/button within its device class
    pub key_index: u32,
    /// Active M-key layer (0 = base layer)
    pub modal_state: u32,
    /// true on key-down, false on key-up
    pub is_press: bool,
}

impl DeviceEventCode {
    /// Build a code from the raw SDK fields
    pub fn new(is_secondary_device: bool, key_index: u32, modal_state: u32, is_press: bool) -> Self {
        Self {
            device: DeviceClass::from_secondary(is_secondary_device),
            key_index,
            modal_state,
            is_press,
        }
    }

    /// A keyboard G-key in the given M-state (released)
    pub fn keyboard(key_index: u32, modal_state: u32) -> Self {
        Self::new(false, key_index, modal_state, false)
    }

    /// A mouse button (released)
    pub fn mouse(key_index: u32, modal_state: u32) -> Self {
        Self::new(true, key_index, modal_state, false)
    }

    /// Same key, marked as pressed
    pub fn pressed(mut self) -> Self {
        self.is_press = true;
        self
    }

    pub fn is_secondary_device(&self) -> bool {
        self.device.is_secondary()
    }

    /// The part of the code that identifies the physical key
    pub fn identity(&self) -> (DeviceClass, u32, u32) {
        (self.device, self.key_index, self.modal_state)
    }

    /// Returns true if both codes refer to the same physical key and layer
    pub fn same_key(&self, other: &DeviceEventCode) -> bool {
        self.identity() == other.identity()
    }
}
