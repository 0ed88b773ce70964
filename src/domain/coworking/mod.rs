//! Coworking aggregate

pub mod model;
pub mod repository;

pub use model::{Coworking, NewCoworking};
pub use repository::CoworkingRepository;
