pub mod error;
pub mod routes;
pub mod state;
pub mod templates;
pub mod views;

pub use error::AppError;
pub use routes::{router, serve};
pub use state::AppState;
