pub mod export;
mod summary;
pub mod views;

pub use summary::AccountReport;
