//! Address binding over `window.location.hash`

use std::collections::VecDeque;
use tracing::debug;

use crate::address::{Address, AddressBinding};

/// Binds the engine to the page's URL fragment
///
/// The page forwards `hashchange` events through
/// [`WasmPresentationPlayer::on_hash_change`](super::WasmPresentationPlayer::on_hash_change).
/// The echo of the engine's own writes is dropped.
#[derive(Debug, Default)]
pub struct HashBinding {
    pending: VecDeque<String>,
    last_written: Option<String>,
}

impl HashBinding {
    /// Create a binding for the current window
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fragment observed by a `hashchange` listener
    pub fn push_external(&mut self, raw: String) {
        if self.last_written.as_deref() == Some(raw.as_str()) {
            self.last_written = None;
            return;
        }
        self.pending.push_back(raw);
    }
}

impl AddressBinding for HashBinding {
    fn read(&self) -> Option<String> {
        let hash = web_sys::window()?.location().hash().ok()?;
        (!hash.is_empty()).then_some(hash)
    }

    fn write(&mut self, address: Address) {
        let fragment = address.to_fragment();
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_hash(&fragment) {
            debug!(error = ?e, "Failed to write location hash");
            return;
        }
        self.last_written = Some(fragment);
    }

    fn poll_external_change(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}
