pub mod config;
pub mod error;
pub mod extraction;
pub mod orchestrate;
pub mod seed;
pub mod store;

pub use error::{ExtractionError, TransformError, ValidationError};
pub use orchestrate::{seed_module, SeedProgress, SeedStage, Seeder};
pub use seed::{transform_extraction, ModuleSeed};
