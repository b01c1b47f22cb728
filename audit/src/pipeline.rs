//! Enumerate, resolve, filter and report.
//!
//! Every stage talks to the repository through [`ObjectSource`], so the whole
//! pipeline runs against a scripted source in tests.

use crate::report::render_report;
use crate::size::{parse_min_size, SizeParseError};
use objects::{Candidate, ObjectSource, ObjectSourceError};
use std::io::Write;
use thiserror::Error;
use tracing::debug;

/// Threshold used when `--min-size` is not given.
pub const DEFAULT_MIN_SIZE: &str = "5MiB";

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Object source error: {0}")]
    Source(#[from] ObjectSourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOptions {
    /// Smallest blob size, in bytes, that makes it into the report
    pub min_size: u64,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            min_size: 5 * 1024 * 1024,
        }
    }
}

impl AuditOptions {
    pub fn new(min_size: u64) -> Self {
        Self { min_size }
    }

    /// Build options from a user supplied threshold such as `"10MiB"`.
    pub fn from_threshold(raw: &str) -> Result<Self, SizeParseError> {
        Ok(Self::new(parse_min_size(raw)?))
    }
}

pub async fn collect_candidates<S>(source: &S) -> AuditResult<Vec<Candidate>>
where
    S: ObjectSource + ?Sized,
{
    let candidates = source.enumerate().await?;
    debug!(
        "{} enumerated {} object(s)",
        source.source_name(),
        candidates.len()
    );
    Ok(candidates)
}

/// Resolve blob sizes, pairing replies with candidates by position.
///
/// Candidates without a usable reply keep a size of zero.
pub async fn fill_sizes<S>(source: &S, candidates: &mut [Candidate]) -> AuditResult<()>
where
    S: ObjectSource + ?Sized,
{
    if candidates.is_empty() {
        return Ok(());
    }

    let oids: Vec<String> = candidates.iter().map(|c| c.oid.clone()).collect();
    let headers = source.batch_inspect(&oids).await?;

    if headers.len() < candidates.len() {
        debug!(
            "Only {} of {} object(s) were answered",
            headers.len(),
            candidates.len()
        );
    }

    for (candidate, header) in candidates.iter_mut().zip(headers) {
        match header {
            Some(header) => candidate.size = header.blob_size(),
            None => debug!("Skipping unparsable reply for {}", candidate.oid),
        }
    }

    Ok(())
}

pub fn filter_large_blobs<I>(candidates: I, min_size: u64) -> Vec<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .filter(|c| c.size >= min_size)
        .collect()
}

/// Enumerate, resolve and filter. The result is in enumeration order.
pub async fn find_large_blobs<S>(
    source: &S,
    options: &AuditOptions,
) -> AuditResult<Vec<Candidate>>
where
    S: ObjectSource + ?Sized,
{
    let mut candidates = collect_candidates(source).await?;
    fill_sizes(source, &mut candidates).await?;

    let blobs = filter_large_blobs(candidates, options.min_size);
    debug!(
        "{} blob(s) at or above {} byte(s)",
        blobs.len(),
        options.min_size
    );
    Ok(blobs)
}

/// Run the full audit and write the report to `out`.
///
/// Returns the number of reported blobs.
pub async fn run<S, W>(source: &S, options: &AuditOptions, out: &mut W) -> AuditResult<usize>
where
    S: ObjectSource + ?Sized,
    W: Write,
{
    let mut blobs = find_large_blobs(source, options).await?;
    render_report(out, &mut blobs)?;
    Ok(blobs.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(oid: &str, size: u64) -> Candidate {
        Candidate::new(oid).with_size(size)
    }

    #[test]
    fn test_default_options() {
        let options = AuditOptions::default();
        assert_eq!(options.min_size, 5 * 1024 * 1024);
        assert_eq!(
            AuditOptions::from_threshold(DEFAULT_MIN_SIZE).unwrap(),
            options
        );
    }

    #[test]
    fn test_options_from_invalid_threshold() {
        assert!(AuditOptions::from_threshold("huge").is_err());
    }

    #[test]
    fn test_filter_keeps_threshold_and_above() {
        let candidates = vec![
            sized("a", 10),
            sized("b", 5000),
            sized("c", 5000),
            sized("d", 1),
        ];
        let kept = filter_large_blobs(candidates, 5000);

        let oids: Vec<&str> = kept.iter().map(|c| c.oid.as_str()).collect();
        assert_eq!(oids, vec!["b", "c"]);
    }

    #[test]
    fn test_filter_zero_threshold_keeps_everything() {
        let candidates = vec![sized("a", 0), sized("b", 1)];
        assert_eq!(filter_large_blobs(candidates, 0).len(), 2);
    }

    #[test]
    fn test_filter_is_monotonic() {
        let candidates: Vec<Candidate> = (0..200u64)
            .map(|i| sized(&format!("{:040x}", i), (i * 7919) % 1000))
            .collect();

        for low in (0..1000).step_by(50) {
            for high in (low..1000).step_by(75) {
                let loose = filter_large_blobs(candidates.clone(), low);
                let strict = filter_large_blobs(candidates.clone(), high);
                assert!(strict.iter().all(|c| loose.contains(c)));
            }
        }
    }
}
