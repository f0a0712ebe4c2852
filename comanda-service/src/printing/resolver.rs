//! Print method resolver
//!
//! Computes which channels to offer for a paper profile. The list order is
//! the order pickers show; the dispatcher keeps its own fixed precedence.

use shared::models::{PaperProfile, PrintMethod};

use super::capability::{CapabilityProvider, is_channel_available};

/// Ordered list of print methods that could serve a request
///
/// Never empty: A4 is the fallback when no thermal channel applies.
pub fn resolve_available_methods(
    profile: PaperProfile,
    has_local: bool,
    has_cloud: bool,
    caps: &dyn CapabilityProvider,
) -> Vec<PrintMethod> {
    // Thermal channels are never offered next to a full page profile
    if profile.is_full_page() {
        return vec![PrintMethod::A4];
    }

    let mut methods = Vec::with_capacity(2);

    if has_cloud {
        methods.push(PrintMethod::PrintNode);
    }

    if has_local && is_channel_available(caps) {
        methods.push(PrintMethod::Usb);
    }

    if methods.is_empty() {
        methods.push(PrintMethod::A4);
    }

    methods
}
