//! Organisation-tree visibility pruning
//!
//! Restricts an organisation tree to the subtree a caller's maximum
//! scope permits. Shares the scope ordering with the permission reducer.

mod pruner;


pub use pruner::prune;
