pub mod domain;
pub mod persistence;
pub mod repository;

pub use domain::{NewPlaceDetail, PlaceDetail};
pub use persistence::PlaceDetailRepositoryImpl;
pub use repository::PlaceDetailRepository;
