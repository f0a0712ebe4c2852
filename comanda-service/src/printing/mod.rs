//! Receipt printing
//!
//! Chooses between the three output channels and drives them:
//! - A4: HTML document handed to a page renderer
//! - PrintNode: raw ESC/POS job submitted to the cloud API
//! - USB: raw ESC/POS written to the local thermal printer

pub mod capability;
pub mod dispatcher;
pub mod formatter;
pub mod local;
pub mod markup;
pub mod notifier;
pub mod page;
pub mod printnode;
pub mod renderer;
pub mod resolver;
pub mod types;

pub use capability::{
    CapabilityProvider, ChannelGap, HostCapabilities, StaticCapabilities, channel_gap,
    is_channel_available,
};
pub use dispatcher::PrintDispatcher;
pub use formatter::{EscPosReceiptFormatter, ReceiptFormatter};
pub use local::{LocalChannel, SharedConnection};
pub use markup::MarkupRenderer;
pub use notifier::{NotificationSink, Notifier, Toast, ToastKind, TracingSink, print_identifier};
pub use page::{PageRenderer, SpoolPageRenderer};
pub use printnode::{CloudPrintChannel, PrintNodeClient};
pub use renderer::{ComandaRenderer, TableBillRenderer};
pub use resolver::resolve_available_methods;
pub use types::*;
