//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer.
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: Holdings store implementations

pub mod persistence;
