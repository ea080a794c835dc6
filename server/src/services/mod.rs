//! Business logic services
//!
//! Services coordinate between the repository and the blob store.

pub mod computers;
pub mod images;

pub use computers::ComputersService;
pub use images::ImagesService;
