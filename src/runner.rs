use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::{Invocation, ProcessExecutor, SystemExecutor};
use crate::fileset;
use crate::fixer::{AutoFixer, Phpcbf};
use crate::prompt::{self, Prompter};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

pub const FIX_PROMPT: &str = "Attempt to fix violations automatically via PHPCBF?";
pub const FIX_HINT: &str =
    "Try running `phpcs-runner fix:phpcbf` to automatically fix standards violations.";
pub const RESTAGE_WARNING: &str = "You must stage any new changes to files before committing.";

/// 临时文件名前缀，实际文件名带随机后缀，避免并发调用互相覆盖
const FILESET_PREFIX: &str = "phpcs-fileset-";

pub struct Runner {
    config: Config,
    executor: Box<dyn ProcessExecutor>,
    prompter: Box<dyn Prompter>,
    fixer: Box<dyn AutoFixer>,
}

impl Runner {
    /// 使用系统执行器；是否交互由 --no-interaction 和 stdin 是否为终端决定
    pub fn new(config: Config, no_interaction: bool) -> Self {
        let fixer = Phpcbf::new(config.clone(), Box::new(SystemExecutor::new()));
        Self::with_parts(
            config,
            Box::new(SystemExecutor::new()),
            prompt::detect(no_interaction),
            Box::new(fixer),
        )
    }

    pub fn with_parts(
        config: Config,
        executor: Box<dyn ProcessExecutor>,
        prompter: Box<dyn Prompter>,
        fixer: Box<dyn AutoFixer>,
    ) -> Self {
        Self {
            config,
            executor,
            prompter,
            fixer,
        }
    }

    /// 在仓库根目录对全部已配置的 fileset 运行 phpcs；失败时总是返回错误
    pub fn run_all(&self) -> Result<()> {
        let invocation =
            Invocation::new(self.config.checker_path()).current_dir(&self.config.repo_root);
        let outcome = self.executor.execute(&invocation)?;

        if outcome.success() {
            return Ok(());
        }

        tracing::debug!("phpcs exited with code {}", outcome.exit_code);

        if self.prompter.is_interactive() {
            self.fix_violations_interactively()?;
            // 即使已修复，也要求重新运行检查
            Err(Error::RerunRequired)
        } else {
            self.prompter.hint(FIX_HINT);
            Err(Error::ChecksFailed)
        }
    }

    fn fix_violations_interactively(&self) -> Result<()> {
        if self.prompter.confirm(FIX_PROMPT) {
            self.fixer.fix()?;
            self.prompter.warn(RESTAGE_WARNING);
        }
        Ok(())
    }

    /// 对变更文件所在目录运行 phpcs，返回原始退出码，由调用方决定成败
    pub fn run_on_files(&self, file_list: &str) -> Result<i32> {
        println!("Sniffing directories containing changed files...");
        let dirs = fileset::candidate_dirs(file_list);
        tracing::debug!("Candidate directories: {:?}", dirs);
        self.run_filtered(&dirs)
    }

    /// 通过 --file-list 传入目标；列表为空时直接返回 0，不启动进程也不写临时文件
    pub fn run_filtered(&self, paths: &[PathBuf]) -> Result<i32> {
        if paths.is_empty() {
            return Ok(0);
        }

        std::fs::create_dir_all(&self.config.tmp_dir)?;
        // NamedTempFile 在 drop 时删除，写入失败的路径同样会清理
        let mut list = tempfile::Builder::new()
            .prefix(FILESET_PREFIX)
            .tempfile_in(&self.config.tmp_dir)?;
        for path in paths {
            writeln!(list, "{}", path.display())?;
        }
        list.flush()?;

        let mut file_list_arg = OsString::from("--file-list=");
        file_list_arg.push(list.path());
        let invocation = Invocation::new(self.config.checker_path())
            .arg(file_list_arg)
            .arg("-l")
            .print_metadata(false);

        let outcome = self.executor.execute(&invocation);
        let closed = list.close();

        let outcome = outcome?;
        closed?;
        Ok(outcome.exit_code)
    }

    pub fn fix(&self) -> Result<()> {
        self.fixer.fix()?;
        Ok(())
    }
}
