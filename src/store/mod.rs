//! Product bookkeeping and hand-to-product proximity

mod inventory;
mod proximity;

pub use inventory::*;
pub use proximity::*;
