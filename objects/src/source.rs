use crate::types::{Candidate, ObjectHeader};
use async_trait::async_trait;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectSourceError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ObjectSourceResult<T> = Result<T, ObjectSourceError>;

/// Read-only access to the objects of one repository.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// Every object reachable from any ref, in backend order.
    async fn enumerate(&self) -> ObjectSourceResult<Vec<Candidate>>;

    /// Look up headers for `oids`.
    ///
    /// Entry `i` answers `oids[i]`; `None` marks a reply that could not be
    /// parsed. The result is shorter than `oids` when the backend stopped
    /// answering early.
    async fn batch_inspect(
        &self,
        oids: &[String],
    ) -> ObjectSourceResult<Vec<Option<ObjectHeader>>>;

    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectKind;

    struct MockSource;

    #[async_trait]
    impl ObjectSource for MockSource {
        async fn enumerate(&self) -> ObjectSourceResult<Vec<Candidate>> {
            Ok(vec![
                Candidate::new("c0ffee"),
                Candidate::with_path("b10b", "big.bin"),
            ])
        }

        async fn batch_inspect(
            &self,
            oids: &[String],
        ) -> ObjectSourceResult<Vec<Option<ObjectHeader>>> {
            Ok(oids
                .iter()
                .map(|oid| {
                    Some(ObjectHeader {
                        oid: oid.clone(),
                        kind: ObjectKind::Blob,
                        size: 1,
                    })
                })
                .collect())
        }

        fn source_name(&self) -> &'static str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_source() {
        let source = MockSource;
        assert_eq!(source.source_name(), "mock");

        let candidates = source.enumerate().await.unwrap();
        assert_eq!(candidates.len(), 2);

        let oids: Vec<String> = candidates.iter().map(|c| c.oid.clone()).collect();
        let headers = source.batch_inspect(&oids).await.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].as_ref().unwrap().oid, "b10b");
    }

    #[test]
    fn test_error_display() {
        let err = ObjectSourceError::InvalidConfig {
            message: "Git program cannot be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Git program cannot be empty"
        );

        let err = ObjectSourceError::Spawn {
            command: "git rev-list --objects --all".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Failed to spawn `git rev-list"));
    }
}
