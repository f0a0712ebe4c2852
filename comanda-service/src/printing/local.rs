//! Local USB channel
//!
//! Wraps the one USB printer handle the process owns. The handle sits
//! behind an async mutex; a dispatch keeps the guard from the connection
//! check through the write, so concurrent prints go out one at a time.

use std::sync::Arc;

use comanda_printer::{PrinterConnection, PrinterError, UsbPrinter};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument, warn};

use super::capability::{CapabilityProvider, channel_gap};
use super::types::ConnectOutcome;
use crate::core::Config;

pub type SharedConnection = Arc<Mutex<Box<dyn PrinterConnection>>>;

/// Shared handle to the local USB printer
#[derive(Clone)]
pub struct LocalChannel {
    connection: SharedConnection,
    capabilities: Arc<dyn CapabilityProvider>,
}

impl LocalChannel {
    pub fn new(
        connection: Box<dyn PrinterConnection>,
        capabilities: Arc<dyn CapabilityProvider>,
    ) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
            capabilities,
        }
    }

    /// USB device printer from the configured device path
    pub fn from_config(config: &Config, capabilities: Arc<dyn CapabilityProvider>) -> Self {
        let printer = UsbPrinter::new(config.usb_device_path.clone())
            .with_timeout(config.usb_write_timeout());
        Self::new(Box::new(printer), capabilities)
    }

    pub fn capabilities(&self) -> &dyn CapabilityProvider {
        self.capabilities.as_ref()
    }

    /// Exclusive access to the handle
    pub async fn lock(&self) -> MutexGuard<'_, Box<dyn PrinterConnection>> {
        self.connection.lock().await
    }

    /// Open the USB printer
    #[instrument(skip(self))]
    pub async fn connect(&self) -> ConnectOutcome {
        if let Some(gap) = channel_gap(self.capabilities.as_ref()) {
            warn!(?gap, "USB channel unavailable");
            return ConnectOutcome::failed(gap.connect_message());
        }

        let mut connection = self.connection.lock().await;
        if connection.is_connected() {
            return ConnectOutcome::connected();
        }

        match connection.connect().await {
            Ok(()) => {
                info!("USB printer connected");
                ConnectOutcome::connected()
            }
            Err(e) => {
                warn!(error = %e, "USB printer connection failed");
                ConnectOutcome::failed(connect_failure_message(&e))
            }
        }
    }

    /// Close the USB printer; failures are logged only
    #[instrument(skip(self))]
    pub async fn disconnect(&self) {
        let mut connection = self.connection.lock().await;
        if !connection.is_connected() {
            return;
        }
        match connection.disconnect().await {
            Ok(()) => info!("USB printer disconnected"),
            Err(e) => warn!(error = %e, "USB printer disconnect failed"),
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_connected()
    }
}

fn connect_failure_message(error: &PrinterError) -> String {
    match error {
        PrinterError::Unsupported(_) => {
            "USB printers are not supported on this device. Use a host with USB device support."
                .to_string()
        }
        other => format!("Could not connect to the USB printer: {}", other),
    }
}
