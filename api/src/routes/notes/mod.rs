pub mod notes_request;
pub mod notes_route;
