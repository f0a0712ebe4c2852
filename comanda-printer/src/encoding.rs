//! Windows-1252 encoding utilities for Western thermal printers
//!
//! Spanish receipts need `€`, `ñ` and accented vowels. Thermal printers
//! select WPC1252 with `ESC t 16`, where every character is a single byte,
//! so the printed width of a string is its character count.
//!
//! This module provides utilities for:
//! - Encoding UTF-8 text to Windows-1252 bytes
//! - Calculating, truncating and padding to printed widths

use encoding_rs::WINDOWS_1252;

/// Byte printed for characters the code page cannot represent
const REPLACEMENT: u8 = b'?';

/// Encode text to Windows-1252 bytes
///
/// Unmappable characters become `?`. Control characters other than `\n`
/// become spaces so user text can never inject printer commands.
pub fn encode_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut scratch = [0u8; 4];

    for c in s.chars() {
        if c == '\n' {
            out.push(b'\n');
        } else if c.is_control() {
            out.push(b' ');
        } else if c.is_ascii() {
            out.push(c as u8);
        } else {
            let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut scratch));
            if had_errors || bytes.len() != 1 {
                out.push(REPLACEMENT);
            } else {
                out.push(bytes[0]);
            }
        }
    }
    out
}

/// Printed width of a string (one column per character)
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a printed width
pub fn truncate_text(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific printed width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_text(s: &str, width: usize, align_right: bool) -> String {
    let current_width = text_width(s);
    if current_width >= width {
        return truncate_text(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}
