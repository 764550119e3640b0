// Export our modules for use in binaries and tests
pub mod config;
pub mod domain;
pub mod headless;
pub mod records;
pub mod source;
pub mod stats;

pub use domain::{Field, Region};
pub use records::{normalize, normalize_batch, CanonicalRecord, DisplayPoint, RawRecord};
pub use source::fetch_all_regions;
pub use stats::{aggregate_by_field, bucket_by_month, select_dominant};
