use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use comanda_printer::EscPosBuilder;
use comanda_service::printing::{
    CapabilityProvider, HostCapabilities, Notifier, PrintDispatcher, TracingSink, channel_gap,
    resolve_available_methods,
};
use comanda_service::setup_environment;
use shared::models::{PaperProfile, PrintConfig, PrintMethod, ReceiptPayload, StoreInfo};

#[derive(Parser, Debug)]
#[command(name = "comanda-print", author, version, about = "Print order tickets and table bills")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an order or table bill from a JSON payload
    Print {
        /// Payload file (`{"kind": "order" | "table_bill", ...}`)
        #[arg(long)]
        payload: PathBuf,
        #[arg(long, default_value = "80mm")]
        width: PaperProfile,
        /// PrintNode printer id; routes the job through the cloud
        #[arg(long, env = "PRINTNODE_PRINTER_ID")]
        printnode_printer: Option<String>,
        #[arg(long)]
        max_retries: Option<u32>,
        /// Store details for full page documents (JSON file)
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(long)]
        logo_url: Option<String>,
        #[arg(long, env = "STORE_ID")]
        store_id: Option<String>,
        /// Open the USB printer before printing
        #[arg(long)]
        connect: bool,
    },
    /// List the print methods offered for a paper width
    Methods {
        #[arg(long, default_value = "80mm")]
        width: PaperProfile,
        /// A local printer is set up
        #[arg(long)]
        local: bool,
        /// A PrintNode printer is set up
        #[arg(long)]
        cloud: bool,
    },
    /// Show whether this host can use the USB channel
    Capabilities,
    /// Print a test page on the USB printer
    UsbTest,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = setup_environment()?;

    match cli.command {
        Command::Print {
            payload,
            width,
            printnode_printer,
            max_retries,
            store,
            logo_url,
            store_id,
            connect,
        } => {
            let raw = std::fs::read_to_string(&payload)
                .with_context(|| format!("Reading {}", payload.display()))?;
            let payload: ReceiptPayload = serde_json::from_str(&raw).context("Parsing payload")?;

            let store_info = match store {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("Reading {}", path.display()))?;
                    Some(serde_json::from_str::<StoreInfo>(&raw).context("Parsing store info")?)
                }
                None => None,
            };

            let print_config = PrintConfig {
                printer_width: width,
                print_node_printer_id: printnode_printer,
                store_id,
                max_retries,
                logo_url,
                store_info,
                ..Default::default()
            };

            let dispatcher = PrintDispatcher::from_config(&config)?;
            if connect {
                let outcome = dispatcher.connect_local_channel().await;
                if let Some(error) = outcome.error {
                    tracing::warn!(%error, "USB printer not connected");
                }
            }

            let notifier = Notifier::new(Arc::new(TracingSink));
            let result = match &payload {
                ReceiptPayload::Order(order) => {
                    let result = dispatcher.print_comanda(order, &print_config).await;
                    let table = order.table_label.as_deref();
                    notifier.notify(&result, Some(order.order_number), table);
                    result
                }
                ReceiptPayload::TableBill(bill) => {
                    let result = dispatcher.print_table_bill(bill, &print_config).await;
                    notifier.notify(&result, None, Some(&bill.table_label));
                    result
                }
            };

            if dispatcher.is_local_channel_connected().await {
                dispatcher.disconnect_local_channel().await;
            }

            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                bail!(
                    "Print via {} failed: {}",
                    result.method,
                    result.error.unwrap_or_default()
                );
            }
        }
        Command::Methods { width, local, cloud } => {
            let caps = HostCapabilities::from_config(&config);
            let methods = resolve_available_methods(width, local, cloud, &caps);
            let names: Vec<&str> = methods.iter().map(PrintMethod::as_str).collect();
            println!("{}", names.join(", "));
        }
        Command::Capabilities => {
            let caps = HostCapabilities::from_config(&config);
            println!("device:         {}", config.usb_device_path.display());
            println!("serial support: {}", caps.has_serial_support());
            println!("top level:      {}", caps.is_top_level());
            match channel_gap(&caps) {
                None => println!("usb channel:    available"),
                Some(gap) => println!("usb channel:    {}", gap.print_message()),
            }
        }
        Command::UsbTest => {
            let dispatcher = PrintDispatcher::from_config(&config)?;
            let outcome = dispatcher.connect_local_channel().await;
            if !outcome.success {
                bail!("{}", outcome.error.unwrap_or_default());
            }

            let columns = PaperProfile::Mm80.columns().unwrap_or(48);
            let mut b = EscPosBuilder::new(columns);
            b.center();
            b.double_size();
            b.line("PRUEBA");
            b.reset_size();
            b.sep_double();
            b.left();
            b.line_lr("Dispositivo", &config.usb_device_path.display().to_string());
            b.line_lr("Ñandú €", "12,50 €");
            b.sep_single();
            b.cut_feed(4);

            let write = {
                let mut connection = dispatcher.local_channel().lock().await;
                connection.write(&b.build()).await
            };
            dispatcher.disconnect_local_channel().await;
            write.context("Writing test page")?;
            println!("Test page sent to {}", config.usb_device_path.display());
        }
    }

    Ok(())
}
