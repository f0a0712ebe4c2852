mod support;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use comanda_service::printing::{
    CloudSubmission, Notifier, NotificationSink, StaticCapabilities, Toast, ToastKind,
};
use parking_lot::Mutex;
use shared::models::{PaperProfile, PrintConfig, PrintMethod, StoreInfo};
use support::{Harness, RecordingFormatter, bill, order};

fn cloud_ok() -> CloudSubmission {
    CloudSubmission::accepted(12345)
}

fn cloud_config(profile: PaperProfile, printer_id: &str) -> PrintConfig {
    PrintConfig {
        print_node_printer_id: Some(printer_id.to_string()),
        ..PrintConfig::new(profile)
    }
}

// ========== Full page ==========

#[tokio::test]
async fn full_page_never_touches_thermal_channels() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());
    let config = PrintConfig {
        logo_url: Some("https://cdn.example.com/logo.png".to_string()),
        store_info: Some(StoreInfo {
            name: "Casa Pepe".to_string(),
            ..Default::default()
        }),
        ..cloud_config(PaperProfile::A4, "999")
    };

    let result = h.dispatcher.print_comanda(&order(1234), &config).await;

    assert!(result.success);
    assert_eq!(result.method, PrintMethod::A4);
    assert!(result.error.is_none());
    assert!(h.cloud.calls().is_empty());
    assert!(h.printer.untouched());
    assert_eq!(h.formatter.calls(), vec!["markup"]);
    assert_eq!(
        *h.pages.pages.lock(),
        vec!["<html>1234|https://cdn.example.com/logo.png|Casa Pepe</html>".to_string()]
    );
}

#[tokio::test]
async fn full_page_renderer_failure_still_succeeds() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());
    h.pages.fail.store(true, Ordering::SeqCst);

    let result = h
        .dispatcher
        .print_table_bill(&bill("05"), &PrintConfig::new(PaperProfile::A4))
        .await;

    assert!(result.success);
    assert_eq!(result.method, PrintMethod::A4);
    assert_eq!(h.formatter.calls(), vec!["bill_markup"]);
    assert_eq!(h.pages.pages.lock().len(), 1);
}

// ========== PrintNode ==========

#[tokio::test]
async fn cloud_success_carries_job_id_and_meta() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());
    let config = PrintConfig {
        store_id: Some("store-7".to_string()),
        printer_name: Some("Cocina".to_string()),
        ..cloud_config(PaperProfile::Mm80, "999")
    };

    let result = h.dispatcher.print_comanda(&order(1234), &config).await;

    assert!(result.success);
    assert_eq!(result.method, PrintMethod::PrintNode);
    assert_eq!(result.job_id, Some(12345));

    let calls = h.cloud.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.printer_id, 999);
    assert!(call.label.contains("1234"));
    assert_eq!(call.label, "Comanda #1234");
    assert_eq!(call.data, RecordingFormatter::comanda_bytes(1234, PaperProfile::Mm80));
    assert_eq!(call.meta.max_retries, 2);
    assert_eq!(call.meta.store_id.as_deref(), Some("store-7"));
    assert_eq!(call.meta.order_id.as_deref(), Some("ord-1234"));
    assert_eq!(call.meta.order_number, Some(1234));
    assert_eq!(call.meta.printer_name.as_deref(), Some("Cocina"));

    assert!(h.printer.untouched());
}

#[tokio::test]
async fn cloud_failure_does_not_fall_back_to_usb() {
    let h = Harness::new(
        StaticCapabilities::AVAILABLE,
        true,
        CloudSubmission::rejected("Printer 999 is offline"),
    );

    let result = h
        .dispatcher
        .print_comanda(&order(8), &cloud_config(PaperProfile::Mm58, "999"))
        .await;

    assert!(!result.success);
    assert_eq!(result.method, PrintMethod::PrintNode);
    assert_eq!(result.error.as_deref(), Some("Printer 999 is offline"));
    assert!(h.printer.untouched());
}

#[tokio::test]
async fn cloud_failure_without_text_gets_generic_message() {
    let h = Harness::new(
        StaticCapabilities::AVAILABLE,
        false,
        CloudSubmission {
            success: false,
            job_id: None,
            error: None,
        },
    );

    let result = h
        .dispatcher
        .print_comanda(&order(8), &cloud_config(PaperProfile::Mm80, "999"))
        .await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("PrintNode print job failed"));
}

#[tokio::test]
async fn unparsable_printer_id_fails_on_cloud_channel() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());

    let result = h
        .dispatcher
        .print_comanda(&order(8), &cloud_config(PaperProfile::Mm80, "kitchen"))
        .await;

    assert!(!result.success);
    assert_eq!(result.method, PrintMethod::PrintNode);
    assert_eq!(
        result.error.as_deref(),
        Some("Invalid PrintNode printer id: kitchen")
    );
    assert!(h.cloud.calls().is_empty());
    assert!(h.printer.untouched());
}

#[tokio::test]
async fn blank_printer_id_routes_to_usb() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());

    let result = h
        .dispatcher
        .print_comanda(&order(8), &cloud_config(PaperProfile::Mm80, "  "))
        .await;

    assert!(result.success);
    assert_eq!(result.method, PrintMethod::Usb);
    assert!(h.cloud.calls().is_empty());
}

#[tokio::test]
async fn table_bill_goes_to_cloud_with_table_label() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());
    let config = PrintConfig {
        max_retries: Some(0),
        ..cloud_config(PaperProfile::Mm58, "42")
    };

    let result = h.dispatcher.print_table_bill(&bill("05"), &config).await;

    assert!(result.success);
    assert_eq!(result.job_id, Some(12345));
    let calls = h.cloud.calls();
    assert_eq!(calls[0].label, "Mesa 05");
    assert_eq!(calls[0].meta.order_number, None);
    assert_eq!(calls[0].meta.max_retries, 0);
    assert_eq!(calls[0].data, RecordingFormatter::bill_bytes("05", PaperProfile::Mm58));
}

// ========== USB ==========

#[tokio::test]
async fn usb_unsupported_host_is_reported() {
    for caps in [StaticCapabilities::UNSUPPORTED, StaticCapabilities::EMBEDDED] {
        let h = Harness::new(caps, true, cloud_ok());

        let result = h
            .dispatcher
            .print_comanda(&order(3), &PrintConfig::new(PaperProfile::Mm80))
            .await;

        assert!(!result.success);
        assert_eq!(result.method, PrintMethod::Usb);
        assert!(result.error.as_deref().unwrap().contains("not supported"));
        assert!(h.printer.untouched());
    }
}

#[tokio::test]
async fn usb_not_connected_is_reported() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());

    let result = h
        .dispatcher
        .print_comanda(&order(3), &PrintConfig::new(PaperProfile::Mm80))
        .await;

    assert!(!result.success);
    assert_eq!(result.method, PrintMethod::Usb);
    assert!(result.error.as_deref().unwrap().contains("not connected"));
    assert_eq!(h.printer.write_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn usb_writes_formatter_output() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());

    let result = h
        .dispatcher
        .print_comanda(&order(77), &PrintConfig::new(PaperProfile::Mm58))
        .await;

    assert!(result.success);
    assert_eq!(result.method, PrintMethod::Usb);
    assert!(result.error.is_none());
    assert_eq!(
        *h.printer.written.lock(),
        vec![RecordingFormatter::comanda_bytes(77, PaperProfile::Mm58)]
    );
    assert_eq!(h.formatter.calls(), vec!["thermal:58mm"]);
}

#[tokio::test]
async fn usb_prints_table_bill_at_configured_width() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());

    let result = h
        .dispatcher
        .print_table_bill(&bill("05"), &PrintConfig::new(PaperProfile::Mm80))
        .await;

    assert!(result.success);
    assert_eq!(result.method, PrintMethod::Usb);
    assert!(result.error.is_none());
    assert_eq!(h.formatter.calls(), vec!["bill_thermal:80mm"]);
    assert_eq!(
        *h.printer.written.lock(),
        vec![RecordingFormatter::bill_bytes("05", PaperProfile::Mm80)]
    );
    assert!(h.cloud.calls().is_empty());
}

#[tokio::test]
async fn usb_write_error_is_generic() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());
    h.printer.fail_writes.store(true, Ordering::SeqCst);

    let result = h
        .dispatcher
        .print_table_bill(&bill("12"), &PrintConfig::new(PaperProfile::Mm80))
        .await;

    assert!(!result.success);
    assert_eq!(result.method, PrintMethod::Usb);
    assert_eq!(
        result.error.as_deref(),
        Some("Failed to send data to the USB printer")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_usb_prints_are_serialized() {
    let h = Arc::new(Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok()));

    let mut tasks = Vec::new();
    for n in 0..8u64 {
        let h = h.clone();
        tasks.push(tokio::spawn(async move {
            h.dispatcher
                .print_comanda(&order(n), &PrintConfig::new(PaperProfile::Mm80))
                .await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().success);
    }

    assert_eq!(h.printer.written.lock().len(), 8);
    assert_eq!(h.printer.max_in_flight.load(Ordering::SeqCst), 1);
}

// ========== Lifecycle ==========

#[tokio::test]
async fn lifecycle_helpers_drive_the_handle() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());
    assert!(!h.dispatcher.is_local_channel_connected().await);

    let outcome = h.dispatcher.connect_local_channel().await;
    assert!(outcome.success);
    assert!(h.dispatcher.is_local_channel_connected().await);

    let result = h
        .dispatcher
        .print_comanda(&order(5), &PrintConfig::new(PaperProfile::Mm80))
        .await;
    assert!(result.success);

    h.dispatcher.disconnect_local_channel().await;
    assert!(!h.dispatcher.is_local_channel_connected().await);
}

#[tokio::test]
async fn connect_is_refused_when_embedded() {
    let h = Harness::new(StaticCapabilities::EMBEDDED, false, cloud_ok());
    let outcome = h.dispatcher.connect_local_channel().await;
    assert!(!outcome.success);
    assert!(outcome.error.is_some());
    assert!(!h.dispatcher.is_local_channel_connected().await);
}

#[tokio::test]
async fn available_methods_reflect_channels() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, true, cloud_ok());
    assert_eq!(
        h.dispatcher
            .available_methods(&cloud_config(PaperProfile::Mm80, "999"))
            .await,
        vec![PrintMethod::PrintNode, PrintMethod::Usb]
    );
    assert_eq!(
        h.dispatcher
            .available_methods(&PrintConfig::new(PaperProfile::A4))
            .await,
        vec![PrintMethod::A4]
    );

    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());
    assert_eq!(
        h.dispatcher
            .available_methods(&PrintConfig::new(PaperProfile::Mm58))
            .await,
        vec![PrintMethod::A4]
    );
}

// ========== End to end with the notifier ==========

#[derive(Default)]
struct Recorder(Mutex<Vec<Toast>>);

impl NotificationSink for Recorder {
    fn show(&self, toast: Toast) {
        self.0.lock().push(toast);
    }
}

#[tokio::test]
async fn scenario_cloud_print_then_toast() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());
    let recorder = Arc::new(Recorder::default());
    let notifier = Notifier::new(recorder.clone());

    let result = h
        .dispatcher
        .print_comanda(&order(1234), &cloud_config(PaperProfile::Mm80, "999"))
        .await;
    notifier.notify(&result, Some(1234), Some("05"));

    let toasts = recorder.0.lock();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Success);
    assert_eq!(toasts[0].icon, Some("☁️"));
    assert!(toasts[0].message.contains("#1234"));
    assert!(!toasts[0].message.contains("Mesa"));
}

#[tokio::test]
async fn scenario_usb_disconnected_then_error_toast() {
    let h = Harness::new(StaticCapabilities::AVAILABLE, false, cloud_ok());
    let recorder = Arc::new(Recorder::default());
    let notifier = Notifier::new(recorder.clone());

    let result = h
        .dispatcher
        .print_table_bill(&bill("05"), &PrintConfig::new(PaperProfile::Mm80))
        .await;
    notifier.notify(&result, None, Some("05"));

    let toasts = recorder.0.lock();
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert!(toasts[0].message.contains("Mesa 05"));
    assert!(toasts[0].message.contains(result.error.as_deref().unwrap()));
}
