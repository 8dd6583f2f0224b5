mod client;
mod coordinates;
mod fetcher;

pub use client::new_client;
pub use coordinates::{Coordinates, CoordinatesFile};
pub use fetcher::{HttpIncidentSource, IncidentSource};
