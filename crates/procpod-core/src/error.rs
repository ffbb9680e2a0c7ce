use thiserror::Error;

/// Errors surfaced by process group operations.
#[derive(Error, Debug)]
pub enum GroupError {
    /// The OS refused to start the process: missing executable, bad
    /// working directory, exhausted resources. Launch failures surface
    /// immediately and are never retried.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Delivering the graceful interrupt to a live process failed.
    #[error("failed to interrupt process {pid}: {source}")]
    Signal {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    /// Installing the caller-interrupt listener failed.
    #[error("failed to install interrupt listener: {0}")]
    InterruptListener(#[source] std::io::Error),

    /// Escape hatch for custom launcher and interrupt-source
    /// implementations.
    #[error("process group error: {0}")]
    Other(#[from] anyhow::Error),
}

impl GroupError {
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        GroupError::Launch {
            program: program.into(),
            source,
        }
    }

    pub fn signal(pid: u32, source: std::io::Error) -> Self {
        GroupError::Signal { pid, source }
    }

    pub fn interrupt_listener(source: std::io::Error) -> Self {
        GroupError::InterruptListener(source)
    }

    /// Check if this error came from the launch path.
    pub fn is_launch(&self) -> bool {
        matches!(self, GroupError::Launch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_error_display() {
        let error = GroupError::launch("missing-bin", IoError::new(ErrorKind::NotFound, "no such file"));
        let display = format!("{error}");
        assert!(display.contains("failed to launch"));
        assert!(display.contains("missing-bin"));

        let error = GroupError::signal(42, IoError::new(ErrorKind::PermissionDenied, "denied"));
        let display = format!("{error}");
        assert!(display.contains("interrupt process 42"));
    }

    #[test]
    fn test_error_categorization() {
        let launch = GroupError::launch("a", IoError::new(ErrorKind::NotFound, "gone"));
        assert!(launch.is_launch());

        let signal = GroupError::signal(1, IoError::new(ErrorKind::PermissionDenied, "denied"));
        assert!(!signal.is_launch());

        let other = GroupError::from(anyhow::anyhow!("backend failure"));
        assert!(!other.is_launch());
    }

    #[test]
    fn test_error_source_chain() {
        let error = GroupError::launch("a", IoError::new(ErrorKind::NotFound, "gone"));
        let source = std::error::Error::source(&error).unwrap();
        assert!(source.to_string().contains("gone"));
    }
}
