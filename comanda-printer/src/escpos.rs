//! ESC/POS byte stream builder
//!
//! Covers the commands receipt layouts use: init, code page, alignment,
//! emphasis, character size and feed-and-cut. Text goes through the
//! Windows-1252 encoder as it is appended.

use crate::encoding::{encode_text, pad_text, text_width};

mod cmd {
    /// ESC @
    pub const INIT: &[u8] = b"\x1b@";
    /// ESC t 16 (WPC1252)
    pub const CODE_PAGE_1252: &[u8] = b"\x1bt\x10";
    pub const ALIGN_LEFT: &[u8] = b"\x1ba\x00";
    pub const ALIGN_CENTER: &[u8] = b"\x1ba\x01";
    pub const EMPHASIS_ON: &[u8] = b"\x1bE\x01";
    pub const EMPHASIS_OFF: &[u8] = b"\x1bE\x00";
    /// GS ! n: high nibble width, low nibble height
    pub const SIZE_NORMAL: &[u8] = b"\x1d!\x00";
    pub const SIZE_TALL: &[u8] = b"\x1d!\x01";
    pub const SIZE_LARGE: &[u8] = b"\x1d!\x11";
    /// GS V 66, followed by the feed length
    pub const FEED_AND_CUT: &[u8] = b"\x1dVB";
}

/// Receipt byte stream for a paper width given in columns
pub struct EscPosBuilder {
    bytes: Vec<u8>,
    columns: usize,
}

impl EscPosBuilder {
    /// Start a stream: printer reset, then the Western code page
    pub fn new(columns: usize) -> Self {
        let mut bytes = Vec::with_capacity(2048);
        bytes.extend_from_slice(cmd::INIT);
        bytes.extend_from_slice(cmd::CODE_PAGE_1252);
        Self { bytes, columns }
    }

    /// Columns per line
    pub fn width(&self) -> usize {
        self.columns
    }

    fn command(&mut self, command: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(command);
        self
    }

    pub fn text(&mut self, s: &str) -> &mut Self {
        self.bytes.extend(encode_text(s));
        self
    }

    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s).command(b"\n")
    }

    pub fn center(&mut self) -> &mut Self {
        self.command(cmd::ALIGN_CENTER)
    }

    pub fn left(&mut self) -> &mut Self {
        self.command(cmd::ALIGN_LEFT)
    }

    pub fn bold(&mut self) -> &mut Self {
        self.command(cmd::EMPHASIS_ON)
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.command(cmd::EMPHASIS_OFF)
    }

    pub fn double_size(&mut self) -> &mut Self {
        self.command(cmd::SIZE_LARGE)
    }

    pub fn double_height(&mut self) -> &mut Self {
        self.command(cmd::SIZE_TALL)
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.command(cmd::SIZE_NORMAL)
    }

    fn rule(&mut self, ch: char) -> &mut Self {
        let rule: String = std::iter::repeat_n(ch, self.columns).collect();
        self.line(&rule)
    }

    /// Full-width `=` rule
    pub fn sep_double(&mut self) -> &mut Self {
        self.rule('=')
    }

    /// Full-width `-` rule
    pub fn sep_single(&mut self) -> &mut Self {
        self.rule('-')
    }

    /// `left` flush left and `right` flush right on one line
    ///
    /// When both do not fit, they are printed one space apart and the
    /// printer wraps.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let room = self.columns.saturating_sub(text_width(right));
        let row = if text_width(left) < room {
            format!("{}{}", pad_text(left, room, false), right)
        } else {
            format!("{} {}", left, right)
        };
        self.line(&row)
    }

    /// Feed `lines` past the cutter, then cut
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.command(cmd::FEED_AND_CUT);
        self.bytes.push(lines);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
