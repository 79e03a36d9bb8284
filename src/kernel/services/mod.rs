//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the kernel.
//! - `adapters`: concrete implementations (settings files, in-process asset store).

pub mod adapters;
pub mod ports;
