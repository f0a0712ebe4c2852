//! Full page (A4) receipt markup
//!
//! Self-contained HTML documents with inline styles, ready for a print
//! dialog or a browser.

use std::fmt::Write;

use chrono_tz::Tz;
use shared::models::{LineItem, OrderReceipt, ServiceType, StoreInfo, TableBill};

use crate::utils::{format_eur, format_time, format_timestamp};

const PAGE_STYLE: &str = r#"
@page { size: A4; margin: 15mm; }
* { box-sizing: border-box; }
body { font-family: "Helvetica Neue", Arial, sans-serif; font-size: 11pt; color: #111; margin: 0; }
header {
  display: flex; justify-content: space-between; align-items: flex-start;
  border-bottom: 2px solid #111; padding-bottom: 8mm; margin-bottom: 8mm;
}
header img { max-height: 25mm; max-width: 60mm; }
.store { text-align: right; font-size: 10pt; line-height: 1.4; }
.store .name { font-size: 14pt; font-weight: bold; }
h1 { font-size: 20pt; margin: 0 0 2mm 0; }
.meta { color: #444; margin-bottom: 6mm; }
table { width: 100%; border-collapse: collapse; }
th {
  text-align: left; border-bottom: 1px solid #111; padding: 2mm 1mm;
  font-size: 9pt; text-transform: uppercase;
}
td { padding: 2mm 1mm; border-bottom: 1px solid #ddd; vertical-align: top; }
.num { text-align: right; white-space: nowrap; }
.sub { color: #555; font-size: 9pt; }
.totals { margin-top: 6mm; margin-left: auto; width: 45%; }
.totals td { border: none; }
.totals .grand td { font-size: 14pt; font-weight: bold; border-top: 2px solid #111; }
.notes { margin-top: 8mm; padding: 3mm; border: 1px dashed #999; }
footer { margin-top: 12mm; text-align: center; color: #444; font-size: 9pt; }
"#;

/// A4 document renderer
pub struct MarkupRenderer {
    timezone: Tz,
}

impl MarkupRenderer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Render an order ticket as a full page document
    pub fn render_order(
        &self,
        order: &OrderReceipt,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String {
        let mut body = String::new();

        let service = match (order.service_type, order.table_label.as_deref()) {
            (ServiceType::DineIn, Some(table)) if !table.is_empty() => {
                format!("{} {}", order.service_type.label(), table)
            }
            (service_type, _) => service_type.label().to_string(),
        };

        let _ = writeln!(body, "<h1>Pedido #{}</h1>", order.order_number);
        let _ = writeln!(
            body,
            "<div class=\"meta\">{} · {}</div>",
            escape(&service),
            format_timestamp(order.created_at, self.timezone)
        );

        let customer: Vec<String> = [
            order.customer_name.as_deref().map(|v| format!("Cliente: {}", escape(v))),
            order.customer_phone.as_deref().map(|v| format!("Tel: {}", escape(v))),
            order.delivery_address.as_deref().map(|v| format!("Dirección: {}", escape(v))),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !customer.is_empty() {
            let _ = writeln!(body, "<div class=\"meta\">{}</div>", customer.join("<br>"));
        }

        render_items(&mut body, &order.items);

        let mut totals = vec![("Subtotal".to_string(), format_eur(order.subtotal))];
        if let Some(fee) = order.delivery_fee.filter(|f| !f.is_zero()) {
            totals.push(("Envío".to_string(), format_eur(fee)));
        }
        if let Some(discount) = order.discount.filter(|d| !d.is_zero()) {
            totals.push(("Descuento".to_string(), format_eur(-discount.abs())));
        }
        if let Some(method) = order.payment_method.as_deref().filter(|m| !m.is_empty()) {
            totals.push(("Pago".to_string(), escape(method)));
        }
        render_totals(&mut body, &totals, &format_eur(order.total));

        if let Some(notes) = order.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            let _ = writeln!(
                body,
                "<div class=\"notes\"><strong>Notas:</strong> {}</div>",
                escape(notes)
            );
        }

        page(
            &format!("Pedido #{}", order.order_number),
            logo_url,
            store,
            &body,
        )
    }

    /// Render a table bill as a full page document
    pub fn render_table_bill(
        &self,
        bill: &TableBill,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String {
        let mut body = String::new();

        let _ = writeln!(body, "<h1>Mesa {}</h1>", escape(&bill.table_label));

        let mut meta = format!(
            "{} · Apertura {}",
            format_timestamp(bill.opened_at, self.timezone),
            format_time(bill.opened_at, self.timezone)
        );
        if let Some(closed) = bill.closed_at {
            let _ = write!(meta, " · Cierre {}", format_time(closed, self.timezone));
        }
        if let Some(guests) = bill.guest_count {
            let _ = write!(meta, " · {} comensales", guests);
        }
        let _ = writeln!(body, "<div class=\"meta\">{}</div>", meta);

        render_items(&mut body, &bill.items);

        let mut totals = vec![("Subtotal".to_string(), format_eur(bill.subtotal))];
        if let Some(service) = bill.service_charge.filter(|s| !s.is_zero()) {
            totals.push(("Servicio".to_string(), format_eur(service)));
        }
        if let Some(discount) = bill.discount.filter(|d| !d.is_zero()) {
            totals.push(("Descuento".to_string(), format_eur(-discount.abs())));
        }
        for payment in &bill.payments {
            totals.push((escape(&payment.method), format_eur(payment.amount)));
        }
        if !bill.payments.is_empty() && !bill.outstanding().is_zero() {
            let outstanding = bill.outstanding();
            if outstanding.is_sign_positive() {
                totals.push(("Pendiente".to_string(), format_eur(outstanding)));
            } else {
                totals.push(("Cambio".to_string(), format_eur(-outstanding)));
            }
        }
        render_totals(&mut body, &totals, &format_eur(bill.total));

        let _ = writeln!(body, "<p class=\"sub\">IVA incluido</p>");

        page(&format!("Mesa {}", bill.table_label), logo_url, store, &body)
    }
}

fn render_items(body: &mut String, items: &[LineItem]) {
    body.push_str(concat!(
        "<table>\n<thead><tr>",
        "<th>Uds</th><th>Descripción</th>",
        "<th class=\"num\">PVP</th><th class=\"num\">Importe</th>",
        "</tr></thead>\n<tbody>\n",
    ));

    for item in items {
        let mut description = escape(&item.name);
        for extra in &item.extras {
            if extra.price.is_zero() {
                let _ = write!(description, "<div class=\"sub\">+ {}</div>", escape(&extra.name));
            } else {
                let _ = write!(
                    description,
                    "<div class=\"sub\">+ {} (+{})</div>",
                    escape(&extra.name),
                    format_eur(extra.price)
                );
            }
        }
        if let Some(note) = item.note.as_deref().filter(|n| !n.trim().is_empty()) {
            let _ = write!(description, "<div class=\"sub\"><em>{}</em></div>", escape(note));
        }

        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            item.quantity,
            description,
            format_eur(item.unit_price),
            format_eur(item.total)
        );
    }

    body.push_str("</tbody>\n</table>\n");
}

fn render_totals(body: &mut String, rows: &[(String, String)], total: &str) {
    body.push_str("<table class=\"totals\">\n");
    for (label, value) in rows {
        let _ = writeln!(body, "<tr><td>{}</td><td class=\"num\">{}</td></tr>", label, value);
    }
    let _ = writeln!(
        body,
        "<tr class=\"grand\"><td>Total</td><td class=\"num\">{}</td></tr>",
        total
    );
    body.push_str("</table>\n");
}

fn page(title: &str, logo_url: Option<&str>, store: Option<&StoreInfo>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + PAGE_STYLE.len() + 1024);

    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", PAGE_STYLE);

    html.push_str("<header>\n");
    match logo_url.filter(|u| !u.trim().is_empty()) {
        Some(url) => {
            let _ = writeln!(html, "<img src=\"{}\" alt=\"logo\">", escape(url));
        }
        None => html.push_str("<div></div>\n"),
    }
    if let Some(store) = store {
        html.push_str("<div class=\"store\">\n");
        let _ = writeln!(html, "<div class=\"name\">{}</div>", escape(&store.name));
        if !store.address.is_empty() {
            let _ = writeln!(html, "<div>{}</div>", escape(&store.address));
        }
        for (label, value) in [
            ("NIF", &store.nif),
            ("Tel", &store.phone),
            ("Email", &store.email),
            ("Web", &store.website),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                let _ = writeln!(html, "<div>{}: {}</div>", label, escape(value));
            }
        }
        html.push_str("</div>\n");
    }
    html.push_str("</header>\n");

    html.push_str(body);

    if let Some(store) = store {
        let footer: Vec<&str> = [store.footer_message.as_deref(), store.footer_note.as_deref()]
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .collect();
        if !footer.is_empty() {
            html.push_str("<footer>\n");
            for line in footer {
                let _ = writeln!(html, "<div>{}</div>", escape(line));
            }
            html.push_str("</footer>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for HTML element and attribute content
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
