pub mod booking;
pub mod clock;
pub mod command;
pub mod config;
pub mod layout;
pub mod library;
pub mod limits;
pub mod map;
pub mod model;
pub mod observability;
pub mod session;
