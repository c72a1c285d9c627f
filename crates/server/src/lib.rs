pub mod state;
pub mod errors;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod openapi;

pub use startup::run;
pub use state::ServerState;
