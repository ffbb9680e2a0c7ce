use async_trait::async_trait;
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use procpod_core::{CommandSpec, ExitStatus, GroupError, ProcessHandle, ProcessLauncher};
use tokio::process::{Child, Command};
use tracing::debug;

/// Launches children with `tokio::process`.
///
/// Children stay in the caller's process group on purpose: a Ctrl-C in the
/// controlling terminal then reaches parent and children alike, which is
/// what the group's interrupt handling is built around.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixProcessLauncher;

impl UnixProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessLauncher for UnixProcessLauncher {
    type Handle = UnixProcessHandle;

    async fn launch(&self, spec: &CommandSpec) -> Result<UnixProcessHandle, GroupError> {
        debug!("spawning `{}` with args {:?}", spec.program, spec.args);

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if spec.clear_env {
            command.env_clear();
        }
        command.envs(&spec.env);
        if let Some(dir) = &spec.working_directory {
            command.current_dir(dir);
        }
        command
            .stdin(spec.stdin)
            .stdout(spec.stdout)
            .stderr(spec.stderr);

        let child = command
            .spawn()
            .map_err(|source| GroupError::launch(&spec.program, source))?;

        Ok(UnixProcessHandle {
            child,
            program: spec.program.clone(),
        })
    }
}

/// Handle to a child spawned by [`UnixProcessLauncher`].
#[derive(Debug)]
pub struct UnixProcessHandle {
    child: Child,
    program: String,
}

#[async_trait]
impl ProcessHandle for UnixProcessHandle {
    fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    fn program(&self) -> &str {
        &self.program
    }

    fn interrupt(&self) -> Result<(), GroupError> {
        // id() is None once the child has been reaped; nothing left to
        // signal.
        let Some(pid) = self.child.id() else {
            return Ok(());
        };
        match signal::kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
            Ok(()) => Ok(()),
            // Exited but not yet reaped still counts as delivered.
            Err(Errno::ESRCH) => Ok(()),
            Err(errno) => Err(GroupError::signal(pid, errno.into())),
        }
    }

    async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        // tokio's Child::wait is cancel safe, which the group relies on
        // when a caller interrupt wins the race.
        self.child.wait().await.map(ExitStatus::from)
    }
}
