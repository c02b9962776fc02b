use std::io::{self, BufRead, IsTerminal, Write};

/// 与用户交互的能力：确认提示与修复建议
pub trait Prompter {
    fn is_interactive(&self) -> bool;

    /// 询问是/否；读取失败视为否
    fn confirm(&self, prompt: &str) -> bool;

    /// 非交互模式下给出的提示信息
    fn hint(&self, message: &str);

    /// 需要用户后续处理的提醒，如重新暂存修复过的文件
    fn warn(&self, message: &str);
}

/// 从 stdin 读取 [y/N] 回答
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    pub fn new() -> Self {
        Self
    }
}

/// 解析回答；空输入取默认值 "否"
pub fn parse_answer(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Prompter for ConsolePrompt {
    fn is_interactive(&self) -> bool {
        true
    }

    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if let Err(err) = io::stdout().flush() {
            tracing::debug!("Failed to flush stdout: {}", err);
        }

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => parse_answer(&input),
            Err(err) => {
                tracing::warn!("Failed to read answer: {}", err);
                false
            }
        }
    }

    fn hint(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// CI / 管道环境：从不询问，总是拒绝
#[derive(Debug, Default)]
pub struct NonInteractive;

impl NonInteractive {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }

    fn confirm(&self, _prompt: &str) -> bool {
        false
    }

    fn hint(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// 根据 --no-interaction 与 stdin 是否为终端选择实现
pub fn detect(no_interaction: bool) -> Box<dyn Prompter> {
    if !no_interaction && io::stdin().is_terminal() {
        Box::new(ConsolePrompt::new())
    } else {
        Box::new(NonInteractive::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("  YES "));
        assert!(!parse_answer("\n"));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("yep"));
    }

    #[test]
    fn non_interactive_always_declines() {
        let prompter = NonInteractive::new();

        assert!(!prompter.is_interactive());
        assert!(!prompter.confirm("Attempt to fix violations automatically via PHPCBF?"));
    }

    #[test]
    fn no_interaction_flag_wins_over_terminal() {
        assert!(!detect(true).is_interactive());
    }
}
