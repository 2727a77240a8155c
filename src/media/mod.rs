pub mod generator;
pub mod prompt;
pub mod resolver;
pub mod storage;
pub mod types;

pub use generator::{ImageGenerator, ImagenGenerator};
pub use prompt::build_prompt;
pub use resolver::ImageResolver;
pub use storage::GeneratedImageStore;
pub use types::{ImageConfig, ImageResolution, ImageSourceKind};
