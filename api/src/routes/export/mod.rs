pub mod export_query;
pub mod export_route;
