pub mod csv_source;
pub mod domain;
pub mod import_service;
pub mod persistence;
pub mod repository;

pub use csv_source::CsvRegistrySource;
pub use domain::{MasterPlace, NewMasterPlace, PlaceStatus, RegistryRow};
pub use import_service::{ImportStats, MasterImportService};
pub use persistence::MasterPlaceRepositoryImpl;
pub use repository::{BatchOutcome, MasterPlaceRepository};
