pub mod config;
pub mod git;
pub mod source;
pub mod types;

pub use config::GitConfig;
pub use git::GitCli;
pub use source::{ObjectSource, ObjectSourceError, ObjectSourceResult};
pub use types::{parse_rev_list_line, Candidate, ObjectHeader, ObjectKind};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::git::*;
    pub use crate::source::*;
    pub use crate::types::*;
}
