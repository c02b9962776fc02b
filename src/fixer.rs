use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::{Invocation, ProcessExecutor};

/// 自动修复能力，由 Runner 在用户确认后触发
pub trait AutoFixer {
    fn fix(&self) -> Result<FixOutcome>;
}

/// phpcbf 的退出码含义：0 无需修复，1 已全部修复，2 仍有无法修复的问题，其余为错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    NothingToFix,
    Fixed,
    PartiallyFixed,
}

impl FixOutcome {
    pub fn from_exit_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(FixOutcome::NothingToFix),
            1 => Ok(FixOutcome::Fixed),
            2 => Ok(FixOutcome::PartiallyFixed),
            other => Err(Error::FixerFailed(other)),
        }
    }
}

/// 在仓库根目录运行 <bin>/phpcbf
pub struct Phpcbf {
    config: Config,
    executor: Box<dyn ProcessExecutor>,
}

impl Phpcbf {
    pub fn new(config: Config, executor: Box<dyn ProcessExecutor>) -> Self {
        Self { config, executor }
    }
}

impl AutoFixer for Phpcbf {
    fn fix(&self) -> Result<FixOutcome> {
        let invocation =
            Invocation::new(self.config.fixer_path()).current_dir(&self.config.repo_root);
        let outcome = self.executor.execute(&invocation)?;

        let fixed = FixOutcome::from_exit_code(outcome.exit_code)?;
        match fixed {
            FixOutcome::NothingToFix => tracing::info!("PHPCBF found nothing to fix"),
            FixOutcome::Fixed => tracing::info!("PHPCBF fixed all fixable violations"),
            FixOutcome::PartiallyFixed => {
                tracing::warn!("PHPCBF could not fix every violation; some remain")
            }
        }
        Ok(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use crate::executor::ExecOutcome;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Scripted {
        code: i32,
        calls: Rc<RefCell<Vec<Invocation>>>,
    }

    impl ProcessExecutor for Scripted {
        fn execute(&self, invocation: &Invocation) -> Result<ExecOutcome> {
            self.calls.borrow_mut().push(invocation.clone());
            Ok(ExecOutcome {
                exit_code: self.code,
            })
        }
    }

    fn fixer(code: i32) -> (Phpcbf, Rc<RefCell<Vec<Invocation>>>, tempfile::TempDir) {
        let root = tempfile::tempdir().unwrap();
        let config = Config::resolve(ConfigFile::default(), root.path()).unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let executor = Scripted {
            code,
            calls: Rc::clone(&calls),
        };
        (Phpcbf::new(config, Box::new(executor)), calls, root)
    }

    #[test]
    fn runs_phpcbf_in_repo_root() {
        let (fixer, calls, root) = fixer(1);

        assert_eq!(fixer.fix().unwrap(), FixOutcome::Fixed);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, root.path().join("vendor/bin/phpcbf"));
        assert!(calls[0].args.is_empty());
        assert_eq!(calls[0].current_dir.as_deref(), Some(root.path()));
    }

    #[test]
    fn remaining_violations_are_not_an_error() {
        let (fixer, _, _root) = fixer(2);

        assert_eq!(fixer.fix().unwrap(), FixOutcome::PartiallyFixed);
    }

    #[test]
    fn tool_error_code_fails() {
        let (fixer, _, _root) = fixer(3);

        assert!(matches!(fixer.fix(), Err(Error::FixerFailed(3))));
    }
}
