pub mod errors;
pub mod extract;
pub mod messages;
pub mod routes;
pub mod startup;

pub use routes::AppState;
pub use startup::run;
