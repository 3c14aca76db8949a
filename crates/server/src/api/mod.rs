pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod streams;
pub mod torrent;

pub use routes::create_router;
