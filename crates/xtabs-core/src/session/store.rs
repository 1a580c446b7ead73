use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::session::errors::SessionError;

/// Plain-text session file at `<dir>/<name>`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
    name: String,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Read the stored command lines in order.
    ///
    /// A missing file is an empty session. Blank lines are skipped.
    pub fn load(&self) -> Result<Vec<String>, SessionError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    event = "core.session.load_missing",
                    path = %path.display()
                );
                return Ok(Vec::new());
            }
            Err(source) => return Err(SessionError::ReadFailed { path, source }),
        };

        let commands: Vec<String> = content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        info!(
            event = "core.session.load_completed",
            path = %path.display(),
            count = commands.len()
        );

        Ok(commands)
    }

    /// Overwrite the session file with one line per command.
    ///
    /// The directory is created if needed and the file is replaced through a
    /// temporary sibling so a crash never leaves a half-written session.
    pub fn save<'a, I>(&self, commands: I) -> Result<usize, SessionError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        fs::create_dir_all(&self.dir).map_err(|source| SessionError::DirectoryFailed {
            path: self.dir.clone(),
            source,
        })?;

        let mut content = String::new();
        let mut count = 0;
        for command in commands {
            if command.trim().is_empty() {
                continue;
            }
            content.push_str(command);
            content.push('\n');
            count += 1;
        }

        let path = self.path();
        let temp_file = self.dir.join(format!(".{}.tmp", self.name));

        if let Err(source) = fs::write(&temp_file, &content) {
            cleanup_temp_file(&temp_file, &source);
            return Err(SessionError::WriteFailed { path, source });
        }
        if let Err(source) = fs::rename(&temp_file, &path) {
            cleanup_temp_file(&temp_file, &source);
            return Err(SessionError::WriteFailed { path, source });
        }

        debug!(
            event = "core.session.save_completed",
            path = %path.display(),
            count
        );

        Ok(count)
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        warn!(
            event = "core.session.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err
        );
    }
}
