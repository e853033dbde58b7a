pub mod env;
pub mod form;
pub mod handlers;
pub mod pages;
pub mod server;

pub use env::AppEnv;
pub use handlers::WebResponse;
pub use server::{routes, serve, ServeError};
