//! Printer connections for sending ESC/POS data
//!
//! Supports:
//! - USB printers exposed as a device node (`/dev/usb/lp0`, `/dev/ttyUSB0`)

use crate::error::{PrinterError, PrinterResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

/// A printer that holds an open connection between jobs
#[async_trait]
pub trait PrinterConnection: Send + Sync {
    /// Open the connection
    async fn connect(&mut self) -> PrinterResult<()>;

    /// Close the connection
    async fn disconnect(&mut self) -> PrinterResult<()>;

    /// Whether a connection is currently open
    fn is_connected(&self) -> bool;

    /// Send raw ESC/POS data to the printer
    async fn write(&mut self, data: &[u8]) -> PrinterResult<()>;
}

/// USB thermal printer reached through its device node
///
/// The kernel `usblp` driver exposes receipt printers as `/dev/usb/lp*`;
/// serial adapters show up as `/dev/ttyUSB*`. Both accept raw ESC/POS.
#[derive(Debug)]
pub struct UsbPrinter {
    path: PathBuf,
    timeout: Duration,
    device: Option<File>,
}

impl UsbPrinter {
    /// Create a printer for a device path (not opened yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: Duration::from_secs(5),
            device: None,
        }
    }

    /// Set open/write timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the device path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn open_device(&self) -> PrinterResult<File> {
        let mut options = OpenOptions::new();
        options.write(true);

        match tokio::time::timeout(self.timeout, options.open(&self.path)).await {
            Err(_) => Err(PrinterError::Timeout(format!(
                "Opening {}",
                self.path.display()
            ))),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => Err(PrinterError::Connection(
                format!("Device not found: {}", self.path.display()),
            )),
            Ok(Err(e)) if e.kind() == ErrorKind::PermissionDenied => {
                Err(PrinterError::Connection(format!(
                    "Permission denied: {}",
                    self.path.display()
                )))
            }
            Ok(Err(e)) => Err(PrinterError::Connection(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
            Ok(Ok(file)) => Ok(file),
        }
    }
}

#[async_trait]
impl PrinterConnection for UsbPrinter {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn connect(&mut self) -> PrinterResult<()> {
        if !cfg!(unix) {
            return Err(PrinterError::Unsupported(
                "USB device printing requires a Unix host".to_string(),
            ));
        }

        if self.device.is_some() {
            return Ok(());
        }

        let file = self.open_device().await?;
        self.device = Some(file);

        info!("USB printer connected");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn disconnect(&mut self) -> PrinterResult<()> {
        if let Some(mut file) = self.device.take() {
            file.flush().await?;
            info!("USB printer disconnected");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.device.is_some()
    }

    #[instrument(skip(self, data), fields(path = %self.path.display(), data_len = data.len()))]
    async fn write(&mut self, data: &[u8]) -> PrinterResult<()> {
        let file = self.device.as_mut().ok_or(PrinterError::NotConnected)?;

        let result = tokio::time::timeout(self.timeout, async {
            file.write_all(data).await?;
            file.flush().await
        })
        .await;

        match result {
            Ok(Ok(())) => {
                info!("Print job sent successfully");
                Ok(())
            }
            Ok(Err(e)) => {
                // Unplugged or powered off: drop the stale handle
                warn!(error = %e, "Write failed, closing device");
                self.device = None;
                Err(PrinterError::Io(e))
            }
            Err(_) => {
                warn!("Write timeout, closing device");
                self.device = None;
                Err(PrinterError::Timeout(format!(
                    "Writing to {}",
                    self.path.display()
                )))
            }
        }
    }
}
