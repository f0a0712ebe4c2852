#![allow(dead_code)]

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use comanda_printer::{PrinterConnection, PrinterError, PrinterResult};
use comanda_service::printing::{
    CapabilityProvider, CloudPrintChannel, CloudSubmission, JobMeta, LocalChannel, PageRenderer,
    PrintDispatcher, ReceiptFormatter, StaticCapabilities,
};
use parking_lot::Mutex;
use shared::models::{
    LineItem, OrderReceipt, PaperProfile, ServiceType, StoreInfo, TableBill,
};

pub fn dec(s: &str) -> rust_decimal::Decimal {
    s.parse().unwrap()
}

pub fn order(number: u64) -> OrderReceipt {
    OrderReceipt {
        order_id: format!("ord-{}", number),
        order_number: number,
        service_type: ServiceType::Pickup,
        customer_name: Some("Lucía".to_string()),
        customer_phone: None,
        delivery_address: None,
        table_label: None,
        items: vec![LineItem {
            name: "Bocadillo de calamares".to_string(),
            quantity: 2,
            unit_price: dec("6.50"),
            total: dec("13.00"),
            extras: vec![],
            note: None,
        }],
        subtotal: dec("13.00"),
        delivery_fee: None,
        discount: None,
        total: dec("13.00"),
        payment_method: Some("Efectivo".to_string()),
        change_for: None,
        notes: None,
        created_at: 1705912335000,
    }
}

pub fn bill(label: &str) -> TableBill {
    TableBill {
        table_label: label.to_string(),
        table_id: None,
        opened_at: 1705912335000,
        closed_at: None,
        guest_count: Some(2),
        items: vec![],
        subtotal: dec("20"),
        service_charge: None,
        discount: None,
        total: dec("20"),
        payments: vec![],
    }
}

/// Formatter returning recognisable bytes and recording each call
#[derive(Default)]
pub struct RecordingFormatter {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingFormatter {
    pub fn comanda_bytes(number: u64, profile: PaperProfile) -> Vec<u8> {
        format!("comanda:{}:{}", number, profile).into_bytes()
    }

    pub fn bill_bytes(label: &str, profile: PaperProfile) -> Vec<u8> {
        format!("bill:{}:{}", label, profile).into_bytes()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl ReceiptFormatter for RecordingFormatter {
    fn build_thermal_bytes(&self, order: &OrderReceipt, profile: PaperProfile) -> Vec<u8> {
        self.calls.lock().push(format!("thermal:{}", profile));
        Self::comanda_bytes(order.order_number, profile)
    }

    fn build_full_page_markup(
        &self,
        order: &OrderReceipt,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String {
        self.calls.lock().push("markup".to_string());
        format!(
            "<html>{}|{}|{}</html>",
            order.order_number,
            logo_url.unwrap_or_default(),
            store.map(|s| s.name.as_str()).unwrap_or_default()
        )
    }

    fn build_table_bill_thermal_bytes(&self, bill: &TableBill, profile: PaperProfile) -> Vec<u8> {
        self.calls.lock().push(format!("bill_thermal:{}", profile));
        Self::bill_bytes(&bill.table_label, profile)
    }

    fn build_table_bill_markup(
        &self,
        bill: &TableBill,
        _logo_url: Option<&str>,
        _store: Option<&StoreInfo>,
    ) -> String {
        self.calls.lock().push("bill_markup".to_string());
        format!("<html>mesa {}</html>", bill.table_label)
    }
}

/// Page renderer keeping what it was given
#[derive(Default)]
pub struct CapturingPages {
    pub pages: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl PageRenderer for CapturingPages {
    fn render_markup(&self, markup: &str) -> io::Result<()> {
        self.pages.lock().push(markup.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(io::Error::other("renderer crashed"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CloudCall {
    pub printer_id: i64,
    pub data: Vec<u8>,
    pub label: String,
    pub meta: JobMeta,
}

/// Cloud channel answering with a fixed submission
pub struct FakeCloud {
    pub calls: Mutex<Vec<CloudCall>>,
    pub response: CloudSubmission,
}

impl FakeCloud {
    pub fn answering(response: CloudSubmission) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response,
        }
    }

    pub fn calls(&self) -> Vec<CloudCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CloudPrintChannel for FakeCloud {
    async fn submit_job(
        &self,
        printer_id: i64,
        data: &[u8],
        label: &str,
        meta: &JobMeta,
    ) -> CloudSubmission {
        self.calls.lock().push(CloudCall {
            printer_id,
            data: data.to_vec(),
            label: label.to_string(),
            meta: meta.clone(),
        });
        self.response.clone()
    }
}

/// Observations of the fake USB printer, shared with the test body
#[derive(Default)]
pub struct PrinterState {
    pub connected: AtomicBool,
    pub fail_writes: AtomicBool,
    pub is_connected_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
    pub written: Mutex<Vec<Vec<u8>>>,
    /// Concurrent writes in flight, and the highest value seen
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl PrinterState {
    pub fn untouched(&self) -> bool {
        self.is_connected_calls.load(Ordering::SeqCst) == 0
            && self.write_calls.load(Ordering::SeqCst) == 0
    }
}

pub struct FakePrinter {
    state: Arc<PrinterState>,
}

impl FakePrinter {
    pub fn new(state: Arc<PrinterState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PrinterConnection for FakePrinter {
    async fn connect(&mut self) -> PrinterResult<()> {
        self.state.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&mut self) -> PrinterResult<()> {
        self.state.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state.is_connected_calls.fetch_add(1, Ordering::SeqCst);
        self.state.connected.load(Ordering::SeqCst)
    }

    async fn write(&mut self, data: &[u8]) -> PrinterResult<()> {
        self.state.write_calls.fetch_add(1, Ordering::SeqCst);

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.state.fail_writes.load(Ordering::SeqCst) {
            return Err(PrinterError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "cable pulled",
            )));
        }
        self.state.written.lock().push(data.to_vec());
        Ok(())
    }
}

/// A dispatcher wired to fakes, with handles on each fake
pub struct Harness {
    pub dispatcher: PrintDispatcher,
    pub formatter: Arc<RecordingFormatter>,
    pub pages: Arc<CapturingPages>,
    pub cloud: Arc<FakeCloud>,
    pub printer: Arc<PrinterState>,
}

impl Harness {
    pub fn new(caps: StaticCapabilities, usb_connected: bool, cloud: CloudSubmission) -> Self {
        Self::with_capabilities(Arc::new(caps), usb_connected, cloud)
    }

    pub fn with_capabilities(
        caps: Arc<dyn CapabilityProvider>,
        usb_connected: bool,
        cloud: CloudSubmission,
    ) -> Self {
        let formatter = Arc::new(RecordingFormatter::default());
        let pages = Arc::new(CapturingPages::default());
        let cloud = Arc::new(FakeCloud::answering(cloud));
        let printer = Arc::new(PrinterState::default());
        printer.connected.store(usb_connected, Ordering::SeqCst);

        let local = LocalChannel::new(Box::new(FakePrinter::new(printer.clone())), caps);
        let dispatcher =
            PrintDispatcher::new(formatter.clone(), pages.clone(), cloud.clone(), local);

        Self {
            dispatcher,
            formatter,
            pages,
            cloud,
            printer,
        }
    }
}
