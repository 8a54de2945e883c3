//! Deep-link addresses
//!
//! An address names a slide by its 1-based position: `slide/3` is the third
//! slide. Browser hosts carry it in the URL fragment as `#/slide/3`.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

const SLIDE_PREFIX: &str = "slide/";

/// Parsed slide address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    index: usize,
}

impl Address {
    /// Address of the slide at 0-based `index`
    pub fn from_index(index: usize) -> Self {
        Self { index }
    }

    /// Parse `slide/N`, `/slide/N`, `#/slide/N` or `#slide/N`
    ///
    /// `N` must be ASCII digits only and at least 1. Range against a deck is
    /// checked by the engine, not here.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix('#').unwrap_or(raw);
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        let digits = rest.strip_prefix(SLIDE_PREFIX)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let number: usize = digits.parse().ok()?;
        number.checked_sub(1).map(Self::from_index)
    }

    /// 0-based slide index
    pub fn index(self) -> usize {
        self.index
    }

    /// 1-based slide number
    pub fn number(self) -> usize {
        self.index.saturating_add(1)
    }

    /// URL fragment form, `#/slide/N`
    pub fn to_fragment(self) -> String {
        format!("#/{}", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SLIDE_PREFIX, self.number())
    }
}

/// Two-way link between the engine and wherever the address lives
///
/// The engine writes every accepted slide change through [`write`] and polls
/// [`poll_external_change`] for edits made outside it (back button, pasted
/// link). Writes made through the binding must not come back as external
/// changes.
///
/// [`write`]: AddressBinding::write
/// [`poll_external_change`]: AddressBinding::poll_external_change
pub trait AddressBinding {
    /// Current raw address, if any
    fn read(&self) -> Option<String>;

    /// Replace the address
    fn write(&mut self, address: Address);

    /// Next raw address set from outside since the last poll
    fn poll_external_change(&mut self) -> Option<String>;
}

#[derive(Debug, Default)]
struct MemoryAddressInner {
    current: Option<String>,
    external: VecDeque<String>,
    history: Vec<Address>,
}

/// In-memory address binding
///
/// Clones share state, so a host (or test) can keep one handle to push
/// external edits while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryAddressBinding {
    inner: Rc<RefCell<MemoryAddressInner>>,
}

impl MemoryAddressBinding {
    /// Empty binding
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding that starts at `raw`, as if the page was opened on that link
    pub fn starting_at(raw: impl Into<String>) -> Self {
        let binding = Self::default();
        binding.inner.borrow_mut().current = Some(raw.into());
        binding
    }

    /// Simulate an edit made outside the engine
    pub fn push_external(&self, raw: impl Into<String>) {
        let raw = raw.into();
        let mut inner = self.inner.borrow_mut();
        inner.current = Some(raw.clone());
        inner.external.push_back(raw);
    }

    /// Current raw address
    pub fn current(&self) -> Option<String> {
        self.inner.borrow().current.clone()
    }

    /// Every address written by the engine, oldest first
    pub fn history(&self) -> Vec<Address> {
        self.inner.borrow().history.clone()
    }
}

impl AddressBinding for MemoryAddressBinding {
    fn read(&self) -> Option<String> {
        self.current()
    }

    fn write(&mut self, address: Address) {
        let mut inner = self.inner.borrow_mut();
        inner.current = Some(address.to_string());
        inner.history.push(address);
    }

    fn poll_external_change(&mut self) -> Option<String> {
        self.inner.borrow_mut().external.pop_front()
    }
}
