//! Value module - In-memory representation of YAML documents.
//!
//! This module provides an order-preserving node tree.

mod value;

pub use value::*;
