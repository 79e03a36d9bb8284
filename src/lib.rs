//! skill-workbench - session core for a hierarchical skill asset editor
//!
//! Module layout:
//! - kernel: session store (tabs, tree expansion, drafts, context menu), workspace
//!   lifecycle binding, bulk folder upload
//! - kernel::services: ports (asset backend contracts, settings) + adapters
//! - models: asset tree index
//! - logging: tracing setup for hosts

pub mod kernel;
pub mod logging;
pub mod models;
