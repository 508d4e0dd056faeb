pub mod error;
pub mod messages;
pub mod routes;
pub mod state;
pub mod visitors;
