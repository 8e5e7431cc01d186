pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod page;
pub mod routes;
