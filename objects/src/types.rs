use serde::{Deserialize, Serialize};
use std::fmt;

/// An object reachable from some ref, together with the path it was seen at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub oid: String,
    pub size: u64,
    pub path: Option<String>,
}

impl Candidate {
    pub fn new(oid: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            size: 0,
            path: None,
        }
    }

    pub fn with_path(oid: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            size: 0,
            path: Some(path.into()),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
    Tag,
    Other(String),
}

impl From<&str> for ObjectKind {
    fn from(token: &str) -> Self {
        match token {
            "blob" => ObjectKind::Blob,
            "tree" => ObjectKind::Tree,
            "commit" => ObjectKind::Commit,
            "tag" => ObjectKind::Tag,
            other => ObjectKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Blob => write!(f, "blob"),
            ObjectKind::Tree => write!(f, "tree"),
            ObjectKind::Commit => write!(f, "commit"),
            ObjectKind::Tag => write!(f, "tag"),
            ObjectKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// One `<oid> <kind> <size>` reply from a batch inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectHeader {
    pub oid: String,
    pub kind: ObjectKind,
    pub size: u64,
}

impl ObjectHeader {
    /// Parse a batch-check reply line.
    ///
    /// Returns `None` for anything that is not three whitespace separated
    /// tokens with an unsigned size, which covers git's `<oid> missing` reply.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let oid = tokens.next()?;
        let kind = tokens.next()?;
        let size = tokens.next()?.parse::<u64>().ok()?;

        Some(Self {
            oid: oid.to_string(),
            kind: ObjectKind::from(kind),
            size,
        })
    }

    /// Size that counts towards the report. Only blobs have one.
    pub fn blob_size(&self) -> u64 {
        match self.kind {
            ObjectKind::Blob => self.size,
            _ => 0,
        }
    }
}

/// Parse one `git rev-list --objects` output line.
///
/// The oid is the first token; everything after the first whitespace run is
/// the path, which may itself contain spaces.
pub fn parse_rev_list_line(line: &str) -> Option<Candidate> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.split_once(char::is_whitespace) {
        Some((oid, rest)) => {
            let path = rest.trim_start();
            if path.is_empty() {
                Some(Candidate::new(oid))
            } else {
                Some(Candidate::with_path(oid, path))
            }
        }
        None => Some(Candidate::new(trimmed)),
    }
}
