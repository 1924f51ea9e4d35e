pub mod minimax;
mod models;
mod normalize;

pub use models::{ModelCatalog, ModelInfo};
pub use normalize::{normalize_api_configuration, NormalizedSelection};
