//! Print result notifications
//!
//! Turns a [`PrintResult`] into a short-lived toast for the operator.

use std::sync::Arc;
use std::time::Duration;

use shared::models::{PrintMethod, PrintResult};
use tracing::{error, info};

const SUCCESS_DURATION: Duration = Duration::from_secs(3);
const ERROR_DURATION: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient operator notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub icon: Option<&'static str>,
    pub message: String,
    pub duration: Duration,
}

/// Where toasts end up
pub trait NotificationSink: Send + Sync {
    fn show(&self, toast: Toast);
}

/// Emits toasts as log events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn show(&self, toast: Toast) {
        let icon = toast.icon.unwrap_or_default();
        let secs = toast.duration.as_secs();
        match toast.kind {
            ToastKind::Success => info!(icon, duration_secs = secs, "{}", toast.message),
            ToastKind::Error => error!(duration_secs = secs, "{}", toast.message),
        }
    }
}

/// Reports print results through a sink
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn notify(
        &self,
        result: &PrintResult,
        order_number: Option<u64>,
        table_label: Option<&str>,
    ) {
        self.sink.show(toast_for(result, order_number, table_label));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

/// `#<n>` for orders, `Mesa <label>` for tables, empty otherwise
pub fn print_identifier(order_number: Option<u64>, table_label: Option<&str>) -> String {
    match (order_number, table_label.filter(|l| !l.is_empty())) {
        (Some(number), _) => format!("#{}", number),
        (None, Some(label)) => format!("Mesa {}", label),
        (None, None) => String::new(),
    }
}

/// Build the toast for a result without showing it
pub fn toast_for(
    result: &PrintResult,
    order_number: Option<u64>,
    table_label: Option<&str>,
) -> Toast {
    let identifier = print_identifier(order_number, table_label);

    if result.success {
        let (icon, channel) = match result.method {
            PrintMethod::PrintNode => ("☁️", "PrintNode"),
            PrintMethod::Usb => ("🖨️", "USB printer"),
            PrintMethod::A4 => ("📄", "A4"),
        };
        let message = if identifier.is_empty() {
            format!("Printed via {}", channel)
        } else {
            format!("{} printed via {}", identifier, channel)
        };
        Toast {
            kind: ToastKind::Success,
            icon: Some(icon),
            message,
            duration: SUCCESS_DURATION,
        }
    } else {
        let reason = result.error.as_deref().unwrap_or("Unknown error");
        let message = if identifier.is_empty() {
            format!("Print failed: {}", reason)
        } else {
            format!("Print failed {}: {}", identifier, reason)
        };
        Toast {
            kind: ToastKind::Error,
            icon: None,
            message,
            duration: ERROR_DURATION,
        }
    }
}
