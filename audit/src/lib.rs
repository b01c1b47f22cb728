pub mod pipeline;
pub mod report;
pub mod size;

pub use pipeline::{
    collect_candidates, fill_sizes, filter_large_blobs, find_large_blobs, run, AuditError,
    AuditOptions, AuditResult, DEFAULT_MIN_SIZE,
};
pub use report::{render_report, sort_by_size_desc, NO_BLOBS_MESSAGE};
pub use size::{human_size, parse_min_size, SizeParseError};
