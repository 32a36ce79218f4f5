//! The command builder/runner.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::context::GitContext;
use crate::errors::GitError;
use crate::launcher::Launcher;
use crate::streams::StreamTarget;

/// A git invocation under construction.
///
/// Configure with chained calls, then consume with exactly one execution
/// method. [`run`](Self::run) may replace the current process image, in
/// which case nothing after it executes.
#[derive(Debug)]
pub struct GitCommand {
    ctx: GitContext,
    args: Vec<String>,
    work_dir: Option<PathBuf>,
    stdin: StreamTarget,
    stdout: StreamTarget,
    stderr: StreamTarget,
    git_dir: OnceCell<String>,
}

impl GitCommand {
    /// New command with the default context and the given initial
    /// arguments.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_context(GitContext::default(), args)
    }

    /// New command with explicit configuration.
    pub fn with_context<I, S>(ctx: GitContext, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ctx,
            args: args.into_iter().map(Into::into).collect(),
            work_dir: None,
            stdin: StreamTarget::Inherit,
            stdout: StreamTarget::Inherit,
            stderr: StreamTarget::Inherit,
            git_dir: OnceCell::new(),
        }
    }

    // =====================================================================
    // Configuration
    // =====================================================================

    /// Set the working directory for spawned children.
    pub fn current_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Replace the input stream.
    pub fn stdin(&mut self, target: StreamTarget) -> &mut Self {
        self.stdin = target;
        self
    }

    /// Replace the output stream and, when `err` is given, the error
    /// stream as well.
    pub fn output_to(&mut self, out: StreamTarget, err: Option<StreamTarget>) -> &mut Self {
        self.stdout = out;
        if let Some(err) = err {
            self.stderr = err;
        }
        self
    }

    /// Append a sub-command token.
    pub fn subcommand(&mut self, name: impl Into<String>) -> &mut Self {
        self.args.push(name.into());
        self
    }

    /// Append one argument token.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append several argument tokens.
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    // =====================================================================
    // Inspection
    // =====================================================================

    /// Whether a directory named by the metadata-dir name exists directly
    /// under the working directory. A plain file of that name does not
    /// count.
    pub fn is_git_repo(&self) -> bool {
        self.work_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join(&self.ctx.git_dir_name)
            .is_dir()
    }

    /// Path of the repo metadata directory, computed once and cached.
    ///
    /// Reflects the working directory at first access; later changes to
    /// the working directory do not recompute it.
    pub fn git_dir(&self) -> &str {
        self.git_dir.get_or_init(|| match &self.work_dir {
            Some(dir) => format!("{}/{}", dir.display(), self.ctx.git_dir_name),
            None => self.ctx.git_dir_name.clone(),
        })
    }

    /// Name of the checked-out branch.
    ///
    /// Never implemented in the tool this wraps around; kept as a stub
    /// that always returns the empty string. Use
    /// [`head_branch`](Self::head_branch) for a working variant.
    pub fn current_branch(&self) -> String {
        String::new()
    }

    /// Branch name read from the repo's HEAD reference file.
    ///
    /// Returns `None` when HEAD is detached, missing, or unreadable.
    pub fn head_branch(&self) -> Option<String> {
        let head = std::fs::read_to_string(Path::new(self.git_dir()).join("HEAD")).ok()?;
        head.lines()
            .next()?
            .trim()
            .strip_prefix("ref: refs/heads/")
            .map(ToString::to_string)
    }

    /// Bare `std::process::Command` with executable and arguments set,
    /// for callers needing finer control.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.ctx.bin);
        cmd.args(&self.args);
        cmd
    }

    // =====================================================================
    // Execution
    // =====================================================================

    /// Run and capture stdout as a string. Stderr goes to the configured
    /// error stream, not the capture buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be started or exits non-zero.
    pub fn output(&mut self) -> Result<String, GitError> {
        self.trace();
        let mut cmd = self.to_command();
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(self.stdin.to_stdio()?);
        cmd.stdout(Stdio::piped());
        cmd.stderr(self.stderr.to_stdio()?);

        let out = cmd.output()?;
        if !out.status.success() {
            let captured = String::from_utf8_lossy(&out.stdout);
            return Err(self.command_failed(out.status.code(), &captured));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }

    /// Run and capture stdout and stderr interleaved into one string,
    /// through a single shared pipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be started or exits non-zero.
    /// On a non-zero exit the captured text is carried in the error's
    /// message so the child's diagnostics are not lost.
    pub fn combined_output(&mut self) -> Result<String, GitError> {
        self.trace();
        let (mut reader, writer) = std::io::pipe()?;

        let mut cmd = self.to_command();
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(self.stdin.to_stdio()?);
        cmd.stdout(writer.try_clone()?);
        cmd.stderr(writer);

        let mut child = cmd.spawn()?;
        // The Command still holds the write ends; drop it so the pipe
        // closes once the child exits.
        drop(cmd);

        let mut combined = Vec::new();
        reader.read_to_end(&mut combined)?;
        let status = child.wait()?;

        if !status.success() {
            let captured = String::from_utf8_lossy(&combined);
            return Err(self.command_failed(status.code(), &captured));
        }
        Ok(String::from_utf8_lossy(&combined).into_owned())
    }

    /// Run, discard all output, report whether the exit status was zero.
    pub fn success(&mut self) -> bool {
        self.trace();
        let mut cmd = self.to_command();
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd.status().is_ok_and(|s| s.success())
    }

    /// Execute via the strategy the platform supports: process-image
    /// replacement where available, spawn-and-wait on Windows and WSL.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be started, exits non-zero,
    /// or (on the replacement path) the executable cannot be resolved.
    pub fn run(&mut self) -> Result<(), GitError> {
        match Launcher::detect() {
            #[cfg(unix)]
            Launcher::ReplaceImage => self.exec(),
            #[cfg(not(unix))]
            Launcher::ReplaceImage => self.spawn(),
            Launcher::SpawnWait => self.spawn(),
        }
    }

    /// Spawn a child with the configured working directory and streams
    /// attached directly, then wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the child cannot be started or exits non-zero.
    pub fn spawn(&mut self) -> Result<(), GitError> {
        self.trace();
        let mut cmd = self.to_command();
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(self.stdin.to_stdio()?);
        cmd.stdout(self.stdout.to_stdio()?);
        cmd.stderr(self.stderr.to_stdio()?);

        let status = cmd.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(self.command_failed(status.code(), ""))
        }
    }

    /// Replace the current process image with the resolved binary,
    /// passing the full argument list and the current environment.
    ///
    /// Does not return on success. The caller's working directory is
    /// inherited unconditionally; the configured working directory is not
    /// applied here.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotFound`] if PATH resolution fails, or the
    /// I/O error if the replacement itself fails.
    #[cfg(unix)]
    pub fn exec(&mut self) -> Result<(), GitError> {
        use std::os::unix::process::CommandExt;

        self.trace();
        let binary = which::which(&self.ctx.bin).map_err(|_| GitError::NotFound {
            name: self.ctx.bin.clone(),
        })?;

        let err = Command::new(binary).args(&self.args).exec();
        Err(err.into())
    }

    fn trace(&self) {
        debug!(command = %self, "running git");
        if self.ctx.verbose {
            eprintln!("{} {}", console::style(">").dim(), console::style(self).dim());
        }
    }

    fn command_failed(&self, exit_code: Option<i32>, captured: &str) -> GitError {
        GitError::CommandFailed {
            command: self.args.first().cloned().unwrap_or_default(),
            message: captured.trim().to_string(),
            exit_code,
        }
    }
}

impl fmt::Display for GitCommand {
    /// Render the executable followed by space-joined, quoted arguments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ctx.bin)?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

/// Quote one argument for trace rendering: a double quote anywhere wins
/// single-quote wrapping; otherwise empty args and args with single
/// quotes or spaces get double quotes; everything else passes through.
fn quote_arg(arg: &str) -> Cow<'_, str> {
    if arg.contains('"') {
        Cow::Owned(format!("'{arg}'"))
    } else if arg.is_empty() || arg.contains('\'') || arg.contains(' ') {
        Cow::Owned(format!("\"{arg}\""))
    } else {
        Cow::Borrowed(arg)
    }
}
