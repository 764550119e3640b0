//! Pure derived views over canonical records.

pub mod aggregate;
pub mod dominant;
pub mod filters;
pub mod summary;
pub mod timeline;

pub use aggregate::{aggregate_by_field, count_by, distinct_values, rank_counts};
pub use dominant::{select_dominant, Dominant};
pub use filters::{map_points, FilterOptions, RecordFilter};
pub use summary::{StatsView, Summary, DEFAULT_TOP_N};
pub use timeline::{bucket_by_month, month_key, UNKNOWN_MONTH};
