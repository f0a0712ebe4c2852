//! Thermal receipt renderers
//!
//! Renders comandas and table bills into ESC/POS bytes.

use chrono_tz::Tz;
use comanda_printer::{EscPosBuilder, pad_text, text_width};
use rust_decimal::Decimal;
use shared::models::{LineItem, OrderReceipt, ServiceType, TableBill};

use crate::utils::{format_eur, format_time, format_timestamp};

/// Width of the quantity column
const QTY_COL: usize = 3;
/// Width of the line total column
const TOTAL_COL: usize = 10;
/// Width of the unit price column (wide paper only)
const PRICE_COL: usize = 9;
/// Narrowest paper that still gets a unit price column
const PRICE_COL_MIN_WIDTH: usize = 42;

/// Order ticket (comanda) renderer
pub struct ComandaRenderer {
    width: usize,
    timezone: Tz,
}

impl ComandaRenderer {
    pub fn new(width: usize, timezone: Tz) -> Self {
        Self { width, timezone }
    }

    /// Render an order ticket to ESC/POS bytes
    pub fn render(&self, order: &OrderReceipt) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, order);
        self.render_customer(&mut b, order);
        render_items(&mut b, &order.items, false);
        self.render_totals(&mut b, order);
        self.render_notes(&mut b, order);

        b.cut_feed(4);
        b.build()
    }

    fn render_header(&self, b: &mut EscPosBuilder, order: &OrderReceipt) {
        b.center();
        b.double_size();
        b.bold();
        b.line(&format!("COMANDA #{}", order.order_number));
        b.bold_off();
        b.reset_size();

        let service = match (order.service_type, order.table_label.as_deref()) {
            (ServiceType::DineIn, Some(table)) if !table.is_empty() => {
                format!("{} {}", order.service_type.label(), table)
            }
            (service_type, _) => service_type.label().to_string(),
        };
        b.bold();
        b.line(&service);
        b.bold_off();
        b.line(&format_timestamp(order.created_at, self.timezone));

        b.left();
        b.sep_double();
    }

    fn render_customer(&self, b: &mut EscPosBuilder, order: &OrderReceipt) {
        let mut printed = false;

        if let Some(name) = non_empty(&order.customer_name) {
            b.line(&format!("Cliente: {}", name));
            printed = true;
        }
        if let Some(phone) = non_empty(&order.customer_phone) {
            b.line(&format!("Tel: {}", phone));
            printed = true;
        }
        if let Some(address) = non_empty(&order.delivery_address) {
            b.bold();
            b.line(&format!("Dir: {}", address));
            b.bold_off();
            printed = true;
        }

        if printed {
            b.sep_single();
        }
    }

    fn render_totals(&self, b: &mut EscPosBuilder, order: &OrderReceipt) {
        b.line_lr("SUBTOTAL", &format_eur(order.subtotal));

        if let Some(fee) = order.delivery_fee.filter(|f| !f.is_zero()) {
            b.line_lr("ENVIO", &format_eur(fee));
        }
        if let Some(discount) = order.discount.filter(|d| !d.is_zero()) {
            b.line_lr("DESCUENTO", &format_eur(-discount.abs()));
        }

        b.bold();
        b.double_height();
        b.line_lr("TOTAL", &format_eur(order.total));
        b.reset_size();
        b.bold_off();

        if let Some(method) = non_empty(&order.payment_method) {
            b.line(&format!("Pago: {}", method));
        }
        if let Some(cash) = order.change_for {
            b.line_lr("Paga con", &format_eur(cash));
            let change = cash - order.total;
            if change > Decimal::ZERO {
                b.line_lr("Cambio", &format_eur(change));
            }
        }
    }

    fn render_notes(&self, b: &mut EscPosBuilder, order: &OrderReceipt) {
        if let Some(notes) = non_empty(&order.notes) {
            b.sep_single();
            b.bold();
            b.line("NOTAS:");
            b.bold_off();
            b.line(notes);
        }
    }
}

/// Table bill renderer
///
/// Wide paper gets a unit price column; payments are listed one per split.
pub struct TableBillRenderer {
    width: usize,
    timezone: Tz,
}

impl TableBillRenderer {
    pub fn new(width: usize, timezone: Tz) -> Self {
        Self { width, timezone }
    }

    /// Render a table bill to ESC/POS bytes
    pub fn render(&self, bill: &TableBill) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, bill);
        render_items(&mut b, &bill.items, self.width >= PRICE_COL_MIN_WIDTH);
        self.render_totals(&mut b, bill);
        self.render_payments(&mut b, bill);

        b.center();
        b.line("IVA incluido");
        b.line("¡Gracias por su visita!");
        b.left();
        b.cut_feed(4);
        b.build()
    }

    fn render_header(&self, b: &mut EscPosBuilder, bill: &TableBill) {
        b.center();
        b.double_size();
        b.bold();
        b.line(&format!("MESA {}", bill.table_label));
        b.bold_off();
        b.reset_size();
        b.line("CUENTA");
        b.line(&format_timestamp(bill.opened_at, self.timezone));
        b.left();
        b.sep_double();

        let opened = format!("Apertura: {}", format_time(bill.opened_at, self.timezone));
        let closed = bill
            .closed_at
            .map(|ts| format!("Cierre: {}", format_time(ts, self.timezone)))
            .unwrap_or_default();
        b.line_lr(&opened, &closed);

        if let Some(guests) = bill.guest_count {
            b.line(&format!("Comensales: {}", guests));
        }
        b.sep_single();
    }

    fn render_totals(&self, b: &mut EscPosBuilder, bill: &TableBill) {
        b.line_lr("SUBTOTAL", &format_eur(bill.subtotal));

        if let Some(service) = bill.service_charge.filter(|s| !s.is_zero()) {
            b.line_lr("SERVICIO", &format_eur(service));
        }
        if let Some(discount) = bill.discount.filter(|d| !d.is_zero()) {
            b.line_lr("DESCUENTO", &format_eur(-discount.abs()));
        }

        b.bold();
        b.double_height();
        b.line_lr("TOTAL", &format_eur(bill.total));
        b.reset_size();
        b.bold_off();
    }

    fn render_payments(&self, b: &mut EscPosBuilder, bill: &TableBill) {
        if bill.payments.is_empty() {
            return;
        }

        b.sep_single();
        b.bold();
        b.line("PAGOS");
        b.bold_off();

        for (idx, payment) in bill.payments.iter().enumerate() {
            b.line_lr(
                &format!("{}. {}", idx + 1, payment.method),
                &format_eur(payment.amount),
            );
        }

        let outstanding = bill.outstanding();
        if outstanding > Decimal::ZERO {
            b.bold();
            b.line_lr("PENDIENTE", &format_eur(outstanding));
            b.bold_off();
        } else if outstanding < Decimal::ZERO {
            b.line_lr("CAMBIO", &format_eur(-outstanding));
        }
        b.sep_single();
    }
}

/// Render the item table
///
/// Layout: `UDS DESCRIPCION [PVP] IMPORTE`, long names wrap under the
/// description column.
fn render_items(b: &mut EscPosBuilder, items: &[LineItem], with_unit_price: bool) {
    let width = b.width();
    let price_col = if with_unit_price { PRICE_COL + 1 } else { 0 };
    let name_col = width.saturating_sub(QTY_COL + TOTAL_COL + 2 + price_col).max(8);

    let mut header = format!(
        "{} {}",
        pad_text("UDS", QTY_COL, false),
        pad_text("DESCRIPCION", name_col, false)
    );
    if with_unit_price {
        header.push(' ');
        header.push_str(&pad_text("PVP", PRICE_COL, true));
    }
    header.push(' ');
    header.push_str(&pad_text("IMPORTE", TOTAL_COL, true));
    b.line(&header);
    b.sep_double();

    for item in items {
        let mut name_lines = wrap_text(&item.name, name_col).into_iter();
        let first = name_lines.next().unwrap_or_default();

        let mut row = format!(
            "{} {}",
            pad_text(&item.quantity.to_string(), QTY_COL, true),
            pad_text(&first, name_col, false)
        );
        if with_unit_price {
            row.push(' ');
            row.push_str(&pad_text(&format_eur(item.unit_price), PRICE_COL, true));
        }
        row.push(' ');
        row.push_str(&pad_text(&format_eur(item.total), TOTAL_COL, true));
        b.line(&row);

        let indent = " ".repeat(QTY_COL + 1);
        for rest in name_lines {
            b.line(&format!("{}{}", indent, rest));
        }

        for extra in &item.extras {
            let label = format!("{} + {}", indent, extra.name);
            if extra.price.is_zero() {
                b.line(&label);
            } else {
                b.line_lr(&label, &format!("+{}", format_eur(extra.price)));
            }
        }

        if let Some(note) = non_empty(&item.note) {
            b.bold();
            b.line(&format!("{} * {}", indent, note));
            b.bold_off();
        }
    }

    b.sep_double();
}

/// Split text into chunks of at most `width` printed columns, preferring
/// word boundaries
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let sep = usize::from(!current.is_empty());
            if text_width(&current) + sep + text_width(&word) <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // Single word wider than the column: hard split
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
            if word.is_empty() {
                break;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
