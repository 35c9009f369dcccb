pub mod client;
pub mod error;
pub mod payload;
pub mod pdf;
pub mod probe;

pub use client::RemoteApi;
pub use error::ApiError;
