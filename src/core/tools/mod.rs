pub mod serper;
pub mod traits;

pub use serper::SerperSearch;
pub use traits::{SearchHit, SearchTool, format_hits};
