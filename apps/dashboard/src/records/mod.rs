pub mod models;
pub mod normalize;
pub use models::{CanonicalRecord, DisplayPoint, Position, RawRecord, RecordId};
pub use normalize::{normalize, normalize_batch};
