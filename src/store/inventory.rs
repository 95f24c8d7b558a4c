//! Products visible in the current and previous frames

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::types::entities::Product;

/// Product codes that appeared or disappeared between two frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDiff {
    pub added: BTreeSet<String>,
    pub gone: BTreeSet<String>,
}

impl ProductDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.gone.is_empty()
    }
}

/// Keeps the last two frames' products.
#[derive(Debug, Clone, Default)]
pub struct ProductInventory {
    current: Vec<Product>,
    previous: Vec<Product>,
}

impl ProductInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts the current products into `previous`, stores the new frame's
    /// products and returns the code difference between the two.
    pub fn update(&mut self, products: Vec<Product>) -> ProductDiff {
        self.previous = core::mem::replace(&mut self.current, products);
        let diff = self.diff();
        if !diff.is_empty() {
            log::info!(
                "Products added: {}, gone: {}",
                diff.added.len(),
                diff.gone.len()
            );
        }
        diff
    }

    /// Codes added and gone between the previous and current frame.
    pub fn diff(&self) -> ProductDiff {
        let current = codes(&self.current);
        let previous = codes(&self.previous);
        ProductDiff {
            added: current.difference(&previous).cloned().collect(),
            gone: previous.difference(&current).cloned().collect(),
        }
    }

    pub fn current(&self) -> &[Product] {
        &self.current
    }

    pub fn previous(&self) -> &[Product] {
        &self.previous
    }
}

fn codes(products: &[Product]) -> BTreeSet<String> {
    products.iter().map(|p| p.code.clone()).collect()
}
