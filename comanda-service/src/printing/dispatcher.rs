//! Print dispatcher
//!
//! Entry point for printing order tickets and table bills. Channel choice
//! is fixed:
//!
//! 1. Full page profile: markup goes to the page renderer, nothing else runs
//! 2. PrintNode printer configured: the job goes to the cloud, with no
//!    USB fallback on failure
//! 3. Otherwise the local USB printer, if the host supports it and it is
//!    connected
//!
//! Every path ends in a [`PrintResult`]; nothing here returns an error.

use std::sync::Arc;

use shared::models::{
    OrderReceipt, PaperProfile, PrintConfig, PrintMethod, PrintResult, TableBill,
};
use tracing::{info, instrument, warn};

use super::capability::{HostCapabilities, channel_gap};
use super::formatter::{EscPosReceiptFormatter, ReceiptFormatter};
use super::local::LocalChannel;
use super::page::{PageRenderer, SpoolPageRenderer};
use super::printnode::{CloudPrintChannel, PrintNodeClient};
use super::resolver::resolve_available_methods;
use super::types::{ConnectOutcome, JobMeta};
use crate::core::{Config, ServiceResult};

const USB_NOT_CONNECTED: &str =
    "USB printer not connected. Connect the printer before printing.";
const USB_WRITE_FAILED: &str = "Failed to send data to the USB printer";
const PRINTNODE_FAILED: &str = "PrintNode print job failed";

/// Document being printed
#[derive(Clone, Copy)]
enum PrintJob<'a> {
    Comanda(&'a OrderReceipt),
    TableBill(&'a TableBill),
}

impl PrintJob<'_> {
    fn label(&self) -> String {
        match self {
            PrintJob::Comanda(order) => format!("Comanda #{}", order.order_number),
            PrintJob::TableBill(bill) => format!("Mesa {}", bill.table_label),
        }
    }

    fn meta(&self, config: &PrintConfig) -> JobMeta {
        let (order_id, order_number) = match self {
            PrintJob::Comanda(order) => (
                config.order_id.clone().or_else(|| Some(order.order_id.clone())),
                Some(order.order_number),
            ),
            PrintJob::TableBill(_) => (config.order_id.clone(), None),
        };

        JobMeta {
            store_id: config.store_id.clone(),
            order_id,
            order_number,
            printer_name: config.printer_name.clone(),
            max_retries: config.retry_budget(),
        }
    }

    fn thermal_bytes(&self, formatter: &dyn ReceiptFormatter, profile: PaperProfile) -> Vec<u8> {
        match self {
            PrintJob::Comanda(order) => formatter.build_thermal_bytes(order, profile),
            PrintJob::TableBill(bill) => formatter.build_table_bill_thermal_bytes(bill, profile),
        }
    }

    fn markup(&self, formatter: &dyn ReceiptFormatter, config: &PrintConfig) -> String {
        let logo = config.logo_url.as_deref();
        let store = config.store_info.as_ref();
        match self {
            PrintJob::Comanda(order) => formatter.build_full_page_markup(order, logo, store),
            PrintJob::TableBill(bill) => formatter.build_table_bill_markup(bill, logo, store),
        }
    }
}

/// Routes print jobs to the A4, PrintNode or USB channel
pub struct PrintDispatcher {
    formatter: Arc<dyn ReceiptFormatter>,
    pages: Arc<dyn PageRenderer>,
    cloud: Arc<dyn CloudPrintChannel>,
    local: LocalChannel,
}

impl PrintDispatcher {
    pub fn new(
        formatter: Arc<dyn ReceiptFormatter>,
        pages: Arc<dyn PageRenderer>,
        cloud: Arc<dyn CloudPrintChannel>,
        local: LocalChannel,
    ) -> Self {
        Self {
            formatter,
            pages,
            cloud,
            local,
        }
    }

    /// Dispatcher wired to the real channels
    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        let capabilities = Arc::new(HostCapabilities::from_config(config));
        Ok(Self::new(
            Arc::new(EscPosReceiptFormatter::new(config.timezone)),
            Arc::new(SpoolPageRenderer::new(config.spool_dir.clone())),
            Arc::new(PrintNodeClient::from_config(config)?),
            LocalChannel::from_config(config, capabilities),
        ))
    }

    pub fn local_channel(&self) -> &LocalChannel {
        &self.local
    }

    /// Print an order ticket
    pub async fn print_comanda(&self, order: &OrderReceipt, config: &PrintConfig) -> PrintResult {
        self.dispatch(PrintJob::Comanda(order), config).await
    }

    /// Print a table bill
    pub async fn print_table_bill(&self, bill: &TableBill, config: &PrintConfig) -> PrintResult {
        self.dispatch(PrintJob::TableBill(bill), config).await
    }

    /// Methods a picker should offer for this configuration
    pub async fn available_methods(&self, config: &PrintConfig) -> Vec<PrintMethod> {
        let has_local = self.local.is_connected().await;
        resolve_available_methods(
            config.printer_width,
            has_local,
            config.has_cloud_channel(),
            self.local.capabilities(),
        )
    }

    pub async fn connect_local_channel(&self) -> ConnectOutcome {
        self.local.connect().await
    }

    pub async fn disconnect_local_channel(&self) {
        self.local.disconnect().await
    }

    pub async fn is_local_channel_connected(&self) -> bool {
        self.local.is_connected().await
    }

    #[instrument(
        skip_all,
        fields(
            dispatch_id = %uuid::Uuid::new_v4(),
            job = %job.label(),
            profile = %config.printer_width,
        )
    )]
    async fn dispatch(&self, job: PrintJob<'_>, config: &PrintConfig) -> PrintResult {
        if config.printer_width.is_full_page() {
            return self.print_full_page(job, config);
        }

        if let Some(printer_id) = config.cloud_printer_id() {
            return self.print_cloud(job, config, printer_id).await;
        }

        self.print_usb(job, config).await
    }

    fn print_full_page(&self, job: PrintJob<'_>, config: &PrintConfig) -> PrintResult {
        let markup = job.markup(self.formatter.as_ref(), config);
        match self.pages.render_markup(&markup) {
            Ok(()) => info!("Full page document rendered"),
            // The document was produced; the renderer's own trouble is not a print failure
            Err(e) => warn!(error = %e, "Page renderer failed"),
        }
        PrintResult::succeeded(PrintMethod::A4)
    }

    async fn print_cloud(
        &self,
        job: PrintJob<'_>,
        config: &PrintConfig,
        printer_id: &str,
    ) -> PrintResult {
        let Ok(printer_id) = printer_id.parse::<i64>() else {
            warn!(printer_id, "Invalid PrintNode printer id");
            return PrintResult::failed(
                PrintMethod::PrintNode,
                format!("Invalid PrintNode printer id: {}", printer_id),
            );
        };

        let data = job.thermal_bytes(self.formatter.as_ref(), config.printer_width);
        let meta = job.meta(config);
        let submission = self
            .cloud
            .submit_job(printer_id, &data, &job.label(), &meta)
            .await;

        if submission.success {
            info!(job_id = ?submission.job_id, "Printed via PrintNode");
            PrintResult::succeeded(PrintMethod::PrintNode).with_job_id(submission.job_id)
        } else {
            let error = submission
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| PRINTNODE_FAILED.to_string());
            warn!(%error, "PrintNode print failed");
            PrintResult::failed(PrintMethod::PrintNode, error)
        }
    }

    async fn print_usb(&self, job: PrintJob<'_>, config: &PrintConfig) -> PrintResult {
        if let Some(gap) = channel_gap(self.local.capabilities()) {
            warn!(?gap, "USB channel unavailable");
            return PrintResult::failed(PrintMethod::Usb, gap.print_message());
        }

        // Held until the write completes
        let mut connection = self.local.lock().await;
        if !connection.is_connected() {
            warn!("USB printer not connected");
            return PrintResult::failed(PrintMethod::Usb, USB_NOT_CONNECTED);
        }

        let data = job.thermal_bytes(self.formatter.as_ref(), config.printer_width);
        match connection.write(&data).await {
            Ok(()) => {
                info!(bytes = data.len(), "Printed via USB");
                PrintResult::succeeded(PrintMethod::Usb)
            }
            Err(e) => {
                warn!(error = %e, "USB write failed");
                PrintResult::failed(PrintMethod::Usb, USB_WRITE_FAILED)
            }
        }
    }
}
