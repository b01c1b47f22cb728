use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Executable used for every git invocation
    pub program: String,
    /// Repository to inspect; `None` means the process working directory
    pub work_dir: Option<PathBuf>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            work_dir: None,
        }
    }
}

impl GitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("Git program cannot be empty".to_string());
        }

        if let Some(dir) = &self.work_dir {
            if dir.as_os_str().is_empty() {
                return Err("Working directory cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
