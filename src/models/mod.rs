pub mod dashboard;
pub mod event;
pub mod service;

pub use dashboard::*;
pub use event::*;
pub use service::*;
