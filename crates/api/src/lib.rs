//! HTTP surface for HostelHerald: broadcast, inbox, and read-state routes.

pub mod middleware;
pub mod routes;
pub mod state;
