use crate::config::GitConfig;
use crate::source::{ObjectSource, ObjectSourceError, ObjectSourceResult};
use crate::types::{parse_rev_list_line, Candidate, ObjectHeader};
use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::Command;
use tracing::{debug, warn};

const REV_LIST_ARGS: [&str; 3] = ["rev-list", "--objects", "--all"];
const BATCH_CHECK_ARGS: [&str; 2] = ["cat-file", "--batch-check"];

/// [`ObjectSource`] backed by the `git` executable.
pub struct GitCli {
    config: GitConfig,
}

impl GitCli {
    pub fn new(config: GitConfig) -> ObjectSourceResult<Self> {
        config
            .validate()
            .map_err(|message| ObjectSourceError::InvalidConfig { message })?;

        Ok(Self { config })
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(args);
        if let Some(dir) = &self.config.work_dir {
            cmd.current_dir(dir);
        }
        cmd.kill_on_drop(true);
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.config.program, args.join(" "))
    }
}

#[async_trait]
impl ObjectSource for GitCli {
    async fn enumerate(&self) -> ObjectSourceResult<Vec<Candidate>> {
        let command = self.describe(&REV_LIST_ARGS);
        debug!("Running {}", command);

        let output = self
            .command(&REV_LIST_ARGS)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ObjectSourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ObjectSourceError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter_map(parse_rev_list_line).collect())
    }

    async fn batch_inspect(
        &self,
        oids: &[String],
    ) -> ObjectSourceResult<Vec<Option<ObjectHeader>>> {
        if oids.is_empty() {
            return Ok(Vec::new());
        }

        let command = self.describe(&BATCH_CHECK_ARGS);
        debug!("Running {} for {} object(s)", command, oids.len());

        let mut child = self
            .command(&BATCH_CHECK_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ObjectSourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "batch-check stdin not captured")
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "batch-check stdout not captured")
        })?;

        // Requests are fed from their own task so a full stdout pipe can never
        // stall the writer while we are not reading yet.
        let requests = oids.to_vec();
        let writer = tokio::spawn(async move {
            let mut stdin = BufWriter::new(stdin);
            for oid in &requests {
                stdin.write_all(oid.as_bytes()).await?;
                stdin.write_all(b"\n").await?;
            }
            stdin.flush().await?;
            // Dropping stdin closes the pipe, which ends the batch
            Ok::<(), io::Error>(())
        });

        let mut reader = BufReader::new(stdout);
        let mut headers = Vec::with_capacity(oids.len());
        let mut line = Vec::new();
        while headers.len() < oids.len() {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                debug!(
                    "batch-check output ended after {} of {} replies",
                    headers.len(),
                    oids.len()
                );
                break;
            }
            headers.push(ObjectHeader::parse(&String::from_utf8_lossy(&line)));
        }
        drop(reader);

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Failed to write batch-check requests: {}", e),
            Err(e) => warn!("batch-check writer task failed: {}", e),
        }

        let status = child.wait().await?;
        if !status.success() {
            warn!("`{}` exited with {}", command, status);
        }

        Ok(headers)
    }

    fn source_name(&self) -> &'static str {
        "git"
    }
}
