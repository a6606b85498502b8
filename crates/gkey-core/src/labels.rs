// GKey Core - Key Labels
// Resolves identifiers to the friendly key names reported by the device SDK

use crate::code::DeviceClass;
use crate::identifier::decode;

/// Errors from a device label lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("No label for {device} key {index}")]
    Unavailable { device: DeviceClass, index: u32 },

    #[error("Label is not valid UTF-16")]
    InvalidUtf16,
}

/// Label lookups offered by the device SDK.
///
/// Implementations wrap the vendor library; the core never talks to it
/// directly. Labels are appended to `out`, which the caller has cleared.
pub trait DeviceLabels {
    /// Friendly name of a mouse button
    fn get_button_label(&self, index: u32, out: &mut String) -> Result<(), LabelError>;

    /// Friendly name of a keyboard G-key in the given M-state
    fn get_key_label(
        &self,
        index: u32,
        modal_state: u32,
        out: &mut String,
    ) -> Result<(), LabelError>;
}

/// Append a NUL-terminated UTF-16 label to `out` as UTF-8.
///
/// Conversion stops at the first NUL; unpaired surrogates are an error and
/// may leave a partial label in `out`.
pub fn push_utf16_label(wide: &[u16], out: &mut String) -> Result<(), LabelError> {
    let end = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    for c in char::decode_utf16(wide[..end].iter().copied()) {
        out.push(c.map_err(|_| LabelError::InvalidUtf16)?);
    }
    Ok(())
}

/// Turns identifiers into display text, reusing one label buffer.
///
/// The buffer is owned by this instance, so the labeler must not be shared
/// between threads without giving each caller its own instance.
#[derive(Debug, Default)]
pub struct KeyLabeler {
    buffer: String,
}

impl KeyLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Friendly label for an identifier.
    ///
    /// Decodes the identifier and asks the device for the matching label.
    /// If the lookup fails the identifier itself is returned unchanged.
    pub fn display_label<'a>(
        &'a mut self,
        labels: &dyn DeviceLabels,
        identifier: &'a str,
    ) -> &'a str {
        let code = decode(identifier);
        self.buffer.clear();
        let label = match code.device {
            DeviceClass::Mouse => labels.get_button_label(code.key_index, &mut self.buffer),
            DeviceClass::Keyboard => {
                labels.get_key_label(code.key_index, code.modal_state, &mut self.buffer)
            }
        };

        match label {
            Ok(()) => &self.buffer,
            Err(e) => {
                log::debug!("label lookup for '{}' failed: {}", identifier, e);
                identifier
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    struct FixedLabels;

    impl DeviceLabels for FixedLabels {
        fn get_button_label(&self, index: u32, out: &mut String) -> Result<(), LabelError> {
            match index {
                0..=8 => {
                    write!(out, "Button {}", index).map_err(|_| LabelError::InvalidUtf16)
                }
                _ => Err(LabelError::Unavailable {
                    device: DeviceClass::Mouse,
                    index,
                }),
            }
        }

        fn get_key_label(
            &self,
            index: u32,
            modal_state: u32,
            out: &mut String,
        ) -> Result<(), LabelError> {
            if modal_state == 0 || modal_state > 3 {
                return Err(LabelError::Unavailable {
                    device: DeviceClass::Keyboard,
                    index,
                });
            }
            write!(out, "G{}/M{}", index, modal_state).map_err(|_| LabelError::InvalidUtf16)
        }
    }

    /// Writes a broken prefix before failing
    struct PartialLabels;

    impl DeviceLabels for PartialLabels {
        fn get_button_label(&self, _index: u32, out: &mut String) -> Result<(), LabelError> {
            push_utf16_label(&[0x0042, 0xD800, 0x0041], out)
        }

        fn get_key_label(
            &self,
            _index: u32,
            _modal_state: u32,
            out: &mut String,
        ) -> Result<(), LabelError> {
            push_utf16_label(&[0x0047, 0x0031, 0], out)
        }
    }

    #[test]
    fn test_label_for_keyboard_key() {
        let mut labeler = KeyLabeler::new();
        assert_eq!(labeler.display_label(&FixedLabels, "keybd-g3-m1"), "G3/M1");
    }

    #[test]
    fn test_label_for_mouse_button() {
        let mut labeler = KeyLabeler::new();
        assert_eq!(labeler.display_label(&FixedLabels, "mouse-g6-m0"), "Button 6");
    }

    #[test]
    fn test_label_falls_back_to_identifier() {
        let mut labeler = KeyLabeler::new();
        assert_eq!(labeler.display_label(&FixedLabels, "mouse-g42-m0"), "mouse-g42-m0");
        assert_eq!(labeler.display_label(&FixedLabels, "keybd-g1-m9"), "keybd-g1-m9");
    }

    #[test]
    fn test_label_buffer_is_reused() {
        let mut labeler = KeyLabeler::new();
        let first = labeler.display_label(&FixedLabels, "keybd-g12-m1").to_string();
        let capacity = labeler.buffer.capacity();
        let second = labeler.display_label(&FixedLabels, "keybd-g2-m1").to_string();
        assert_eq!(first, "G12/M1");
        assert_eq!(second, "G2/M1");
        assert_eq!(labeler.buffer.capacity(), capacity);
    }

    #[test]
    fn test_partial_label_is_not_shown() {
        let mut labeler = KeyLabeler::new();
        assert_eq!(labeler.display_label(&PartialLabels, "keybd-g1-m1"), "G1");
        assert_eq!(labeler.display_label(&PartialLabels, "mouse-g1-m0"), "mouse-g1-m0");
        assert_eq!(labeler.display_label(&PartialLabels, "keybd-g1-m1"), "G1");
    }

    #[test]
    fn test_push_utf16_label() {
        let wide: Vec<u16> = "G1\u{e9}".encode_utf16().chain([0, 65]).collect();
        let mut out = String::new();
        assert_eq!(push_utf16_label(&wide, &mut out), Ok(()));
        assert_eq!(out, "G1\u{e9}");
    }

    #[test]
    fn test_push_utf16_label_without_terminator() {
        let wide: Vec<u16> = "Button 4".encode_utf16().collect();
        let mut out = String::new();
        assert_eq!(push_utf16_label(&wide, &mut out), Ok(()));
        assert_eq!(out, "Button 4");
    }

    #[test]
    fn test_push_utf16_label_invalid() {
        let mut out = String::new();
        assert_eq!(
            push_utf16_label(&[0xD800, 0x0041], &mut out),
            Err(LabelError::InvalidUtf16)
        );
    }

    #[test]
    fn test_label_error_display() {
        let err = LabelError::Unavailable {
            device: DeviceClass::Mouse,
            index: 3,
        };
        assert_eq!(err.to_string(), "No label for mouse key 3");
        assert_eq!(LabelError::InvalidUtf16.to_string(), "Label is not valid UTF-16");
    }
}
