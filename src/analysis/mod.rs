pub mod cutoff;
pub mod monthly;
pub mod pipeline;

pub use cutoff::{parse_timestamp, Cutoff};
pub use monthly::MonthlyAggregator;
pub use pipeline::{BackfillReport, ExportPipeline};
