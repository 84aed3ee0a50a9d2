mod client;
mod credentials;
mod doctor;
mod in_memory;
mod repository;
mod time_of_day;

pub use client::*;
pub use credentials::*;
pub use doctor::*;
pub use in_memory::*;
pub use repository::*;
pub use time_of_day::*;
