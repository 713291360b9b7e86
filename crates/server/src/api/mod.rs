pub mod handlers;
pub mod middleware;
pub mod naming;
pub mod parser;
pub mod results;
pub mod routes;

pub use routes::create_router;
