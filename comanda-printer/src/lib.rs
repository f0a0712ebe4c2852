//! # comanda-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Windows-1252 encoding for Western code page printers (€, ñ, á...)
//! - USB printing through a device node (e.g. `/dev/usb/lp0`)
//!
//! Business logic (WHAT to print) stays in `comanda-service`:
//! - Comanda and table bill rendering
//! - Channel selection (USB / PrintNode / A4)
//!
//! ## Example
//!
//! ```ignore
//! use comanda_printer::{EscPosBuilder, PrinterConnection, UsbPrinter};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("COMANDA #1234");
//! builder.reset_size();
//! builder.sep_double();
//! builder.left();
//! builder.line_lr("2 Pizza Margarita", "19,00 €");
//! builder.cut_feed(3);
//!
//! // Send to the USB printer
//! let mut printer = UsbPrinter::new("/dev/usb/lp0");
//! printer.connect().await?;
//! printer.write(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{encode_text, pad_text, text_width, truncate_text};
pub use error::{PrinterError, PrinterResult};
pub use escpos::EscPosBuilder;
pub use printer::{PrinterConnection, UsbPrinter};
