pub mod explain;
pub mod export;
pub mod notes;
pub mod ping_route;
