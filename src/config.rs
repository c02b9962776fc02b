use crate::error::{Error, Result};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 环境变量前缀，如 PHPCS_RUNNER_BIN_DIR
pub const ENV_PREFIX: &str = "PHPCS_RUNNER";

/// 项目内配置文件名（位于当前工作目录）
pub const PROJECT_CONFIG_FILE: &str = "phpcs-runner.toml";

/// 解析完成后的配置：所有路径均为绝对路径，由调用方解析一次后传给 Runner
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub repo_root: PathBuf,
    pub bin_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub checker: String,
    pub fixer: String,
}

/// 配置文件磁盘格式：路径为字符串，便于 TOML 中使用 ~ 和相对路径
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixer: Option<String>,
}

impl ConfigFile {
    /// `config init` 写出的模板；repo_root 省略，默认取当前目录
    pub fn template() -> Self {
        Self {
            repo_root: None,
            bin_dir: Some("vendor/bin".to_string()),
            tmp_dir: Some("tmp".to_string()),
            checker: Some("phpcs".to_string()),
            fixer: Some("phpcbf".to_string()),
        }
    }

    /// 用 other 中已设置的字段覆盖自身（命令行参数优先级最高）
    pub fn merge(&mut self, other: &ConfigFile) {
        if other.repo_root.is_some() {
            self.repo_root = other.repo_root.clone();
        }
        if other.bin_dir.is_some() {
            self.bin_dir = other.bin_dir.clone();
        }
        if other.tmp_dir.is_some() {
            self.tmp_dir = other.tmp_dir.clone();
        }
        if other.checker.is_some() {
            self.checker = other.checker.clone();
        }
        if other.fixer.is_some() {
            self.fixer = other.fixer.clone();
        }
    }

    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 将 "~" 或 "~/path" 展开为家目录路径
fn expand_tilde(path: &str) -> PathBuf {
    let path = path.trim();
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn absolute_from(path: &Path, base: &Path) -> Result<PathBuf> {
    Ok(path.absolutize_from(base)?.into_owned())
}

fn non_empty(value: Option<String>, key: &str, default: &str) -> Result<String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => {
            Err(Error::Config(format!("`{}` must not be empty", key)))
        }
        Some(v) => Ok(v.trim().to_string()),
    }
}

impl Config {
    /// 用户级配置文件路径：~/.config/phpcs-runner/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("phpcs-runner").join("config.toml"))
    }

    /// 未显式指定时的配置文件：先找项目内文件，再找用户级文件
    pub fn discover_config_path(cwd: &Path) -> Option<PathBuf> {
        let project = cwd.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Some(project);
        }
        Self::user_config_path().filter(|p| p.is_file())
    }

    /// 按 文件 < 环境变量 < 命令行 的优先级加载配置
    pub fn load(override_path: Option<&Path>, overrides: &ConfigFile) -> Result<Self> {
        let cwd = std::env::current_dir()?;

        let mut builder = config::Config::builder();
        match override_path {
            Some(path) => {
                builder = builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                if let Some(path) = Self::discover_config_path(&cwd) {
                    tracing::debug!("Using config file: {}", path.display());
                    builder = builder.add_source(
                        config::File::from(path.as_path())
                            .format(config::FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let mut file: ConfigFile = builder.build()?.try_deserialize()?;
        file.merge(overrides);

        Self::resolve(file, &cwd)
    }

    /// 把磁盘格式解析为绝对路径配置；相对的 bin_dir/tmp_dir 以 repo_root 为基准
    pub fn resolve(file: ConfigFile, cwd: &Path) -> Result<Self> {
        let repo_root = match file.repo_root.as_deref() {
            Some(root) if !root.trim().is_empty() => absolute_from(&expand_tilde(root), cwd)?,
            _ => absolute_from(cwd, cwd)?,
        };

        let bin_dir = match file.bin_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => absolute_from(&expand_tilde(dir), &repo_root)?,
            _ => repo_root.join("vendor").join("bin"),
        };

        let tmp_dir = match file.tmp_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => absolute_from(&expand_tilde(dir), &repo_root)?,
            _ => repo_root.join("tmp"),
        };

        Ok(Self {
            repo_root,
            bin_dir,
            tmp_dir,
            checker: non_empty(file.checker, "checker", "phpcs")?,
            fixer: non_empty(file.fixer, "fixer", "phpcbf")?,
        })
    }

    pub fn checker_path(&self) -> PathBuf {
        self.bin_dir.join(&self.checker)
    }

    pub fn fixer_path(&self) -> PathBuf {
        self.bin_dir.join(&self.fixer)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
