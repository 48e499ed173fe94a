//! Storage and queue abstraction traits.

mod batch_change_repository;
mod batch_converter;
mod record_set_repository;
mod zone_repository;

pub use batch_change_repository::BatchChangeRepository;
pub use batch_converter::BatchChangeConverter;
pub use record_set_repository::RecordSetRepository;
pub use zone_repository::ZoneRepository;
