pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod operations;

pub use config::RoutingConfig;
pub use engine::{RoutingEngine, RoutingStats};
pub use error::{RouteError, Result};
pub use layout::{ConnectionId, Layout, NodeId, WallId};
pub use operations::route::{Route, RouteStrategy, UnroutableReason};
