//! CSV persistence for attribute tables.

pub mod attrs;
