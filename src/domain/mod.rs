pub mod flatten;
pub mod listing;
pub mod transform;

pub use flatten::flatten_all;
pub use listing::{StoredListing, TransformError};
pub use transform::{normalize, NormalizeOptions};
