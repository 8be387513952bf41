//! Organisation hierarchy data model
//!
//! Nodes form a strict 3-level tree per account (super-circle → circle →
//! team). Ancestry is flattened into [`AncestorChain`] values looked up
//! once, so resolution never walks the tree.

mod types;


pub use types::{
    AccountId, AncestorChain, CallerDescriptor, CallerKind, OrgLevel, OrgNode, OrgNodeId, OrgTree,
    OrgTreeNode, Restriction,
};
