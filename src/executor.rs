use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 一次子进程调用的描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// None 表示继承调用方的工作目录
    pub current_dir: Option<PathBuf>,
    /// 为 false 时不输出 "Running ..." 之类的调用信息
    pub print_metadata: bool,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            print_metadata: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn print_metadata(mut self, enabled: bool) -> Self {
        self.print_metadata = enabled;
        self
    }

    /// 便于日志输出的命令行文本
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// 子进程执行结果；输出直接流向终端，不做捕获
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub exit_code: i32,
}

impl ExecOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

pub trait ProcessExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<ExecOutcome>;
}

/// 基于 std::process::Command 的同步执行器，输出直接继承到当前终端
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessExecutor for SystemExecutor {
    fn execute(&self, invocation: &Invocation) -> Result<ExecOutcome> {
        if invocation.print_metadata {
            match &invocation.current_dir {
                Some(dir) => tracing::info!(
                    "Running {} in {}",
                    invocation.command_line(),
                    dir.display()
                ),
                None => tracing::info!("Running {}", invocation.command_line()),
            }
        } else {
            tracing::debug!("Running {}", invocation.command_line());
        }

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        command.stdin(Stdio::inherit());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());

        let status = command
            .status()
            .map_err(|err| spawn_error(&invocation.program, err))?;

        // 被信号终止时没有退出码
        let exit_code = status.code().ok_or_else(|| {
            Error::Execution(format!(
                "{} was terminated by a signal",
                invocation.program.display()
            ))
        })?;

        tracing::debug!("{} exited with code {}", invocation.program.display(), exit_code);

        Ok(ExecOutcome { exit_code })
    }
}

fn spawn_error(program: &Path, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::ToolNotFound(program.display().to_string())
    } else {
        Error::Execution(format!("Failed to start {}: {}", program.display(), err))
    }
}
