// GKey Core - Lenient Number Parsing
// atoi-style integer conversion used by the identifier decoder and command arguments

use std::str::FromStr;

/// Parse the leading integer of `text`, falling back to the type's default.
///
/// Mirrors C `atoi`: leading whitespace is skipped, an optional sign and the
/// run of ASCII digits that follows are parsed, and everything after the digits
/// is ignored. Input without digits, a sign the target type cannot hold, or a
/// value that overflows the target type all yield `T::default()` (zero).
///
/// # Examples
/// ```
/// use gkey_core::parse_lenient;
/// assert_eq!(parse_lenient::<u32>("12abc"), 12);
/// assert_eq!(parse_lenient::<u32>("abc"), 0);
/// assert_eq!(parse_lenient::<i32>("  -7"), -7);
/// ```
pub fn parse_lenient<T>(text: &str) -> T
where
    T: FromStr + Default,
{
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let sign_len = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let digit_len = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digit_len == 0 {
        return T::default();
    }

    trimmed[..sign_len + digit_len].parse().unwrap_or_default()
}
