//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `state.rs`: State containers with update methods
//! - `client.rs`: Sub-client with HTTP methods

pub mod history;
pub mod price;
pub mod status;
