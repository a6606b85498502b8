// GKey Core - Identifier Codec
// Converts device event codes to and from the hotkey identifiers the host persists

use std::convert::Infallible;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::code::{DeviceClass, DeviceEventCode};
use crate::lenient::parse_lenient;

/// Class tag for keyboard (primary device) identifiers
pub const KEYBOARD_TAG: &str = "keybd";

/// Class tag for mouse (secondary device) identifiers
pub const MOUSE_TAG: &str = "mouse";

/// Separator between identifier fields
pub const SEPARATOR: char = '-';

/// Prefix letter of the key index field
pub const KEY_FIELD_PREFIX: char = 'g';

/// Prefix letter of the modal state field
pub const MODAL_FIELD_PREFIX: char = 'm';

/// Capacity bound for an encoded identifier.
///
/// With `u32` key and modal fields the longest possible identifier is
/// `mouse-g4294967295-m4294967295` (29 bytes), so every code fits.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// The string token the host stores for one physical key in one M-state.
///
/// Grammar: `<tag>-g<key_index>-m<modal_state>` where `<tag>` is
/// [`KEYBOARD_TAG`] or [`MOUSE_TAG`]. Existing hotkey bindings depend on this
/// exact format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&DeviceEventCode> for Identifier {
    fn from(code: &DeviceEventCode) -> Self {
        encode(code)
    }
}

/// Encode a device event code into its identifier.
///
/// The press state is not part of the identifier: key-down and key-up of the
/// same key must map to the same hotkey binding.
///
/// # Examples
/// ```
/// use gkey_core::{encode, DeviceEventCode};
/// let id = encode(&DeviceEventCode::keyboard(3, 1));
/// assert_eq!(id.as_str(), "keybd-g3-m1");
/// ```
pub fn encode(code: &DeviceEventCode) -> Identifier {
    let tag = match code.device {
        DeviceClass::Mouse => MOUSE_TAG,
        DeviceClass::Keyboard => KEYBOARD_TAG,
    };

    let mut id = String::with_capacity(MAX_IDENTIFIER_LEN);
    // Writing into a String cannot fail
    let _ = write!(
        id,
        "{tag}{SEPARATOR}{KEY_FIELD_PREFIX}{}{SEPARATOR}{MODAL_FIELD_PREFIX}{}",
        code.key_index, code.modal_state
    );
    debug_assert!(id.len() <= MAX_IDENTIFIER_LEN);

    Identifier(id)
}

/// Decode an identifier back into a device event code.
///
/// Never fails. The identifier is split on [`SEPARATOR`] (empty fields are
/// skipped) into class tag, key field and modal field:
/// - the tag must equal [`MOUSE_TAG`] exactly to select the mouse class;
///   anything else, including identifiers from other formats, is a keyboard
/// - the first character of each numeric field (the `g`/`m` letter) is
///   skipped and the rest parsed leniently, so bad numbers become 0
/// - missing fields keep their default of 0
///
/// The returned code always has `is_press == false`.
pub fn decode(identifier: &str) -> DeviceEventCode {
    let mut fields = identifier.split(SEPARATOR).filter(|f| !f.is_empty());
    let mut code = DeviceEventCode::default();

    if let Some(tag) = fields.next() {
        code.device = DeviceClass::from_secondary(tag == MOUSE_TAG);
    }
    if let Some(key_field) = fields.next() {
        code.key_index = parse_field(key_field);
    }
    if let Some(modal_field) = fields.next() {
        code.modal_state = parse_field(modal_field);
    }

    code
}

/// Parse a numeric field after its one-character prefix
fn parse_field(field: &str) -> u32 {
    let mut chars = field.chars();
    chars.next();
    parse_lenient(chars.as_str())
}

impl FromStr for DeviceEventCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

/// Display names for the two device classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNames {
    pub primary: String,
    pub secondary: String,
}

impl Default for DeviceNames {
    fn default() -> Self {
        Self {
            primary: "Logitech Keyboard".to_string(),
            secondary: "Logitech Mouse".to_string(),
        }
    }
}

/// Name of the device family an identifier originates from.
///
/// This is a substring heuristic, not a decode: any identifier containing
/// [`MOUSE_TAG`] is attributed to the mouse, everything else (including
/// identifiers in foreign formats) to the keyboard.
pub fn device_name<'a>(identifier: &str, names: &'a DeviceNames) -> &'a str {
    if identifier.contains(MOUSE_TAG) {
        &names.secondary
    } else {
        &names.primary
    }
}
