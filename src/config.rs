use std::time::Duration;

use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// CAS 服务地址（MaximaPool 风格的 HTTP 端点）
    pub cas_url: String,
    /// 单次 CAS 批量调用的超时（秒）
    pub cas_timeout_secs: u64,
    /// 题目 TOML 文件存放目录
    pub question_folder: String,
    /// 本地化字符串 TOML 文件（可选）
    pub strings_file: Option<String>,
    /// 洗牌随机种子（可选，用于复现选项顺序）
    pub shuffle_seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cas_url: "http://localhost:8080/MaximaPool/MaximaPool".to_string(),
            cas_timeout_secs: 10,
            question_folder: "questions".to_string(),
            strings_file: None,
            shuffle_seed: None,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量读取配置，缺失的项使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            cas_url: std::env::var("CAS_URL").unwrap_or(default.cas_url),
            cas_timeout_secs: std::env::var("CAS_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cas_timeout_secs),
            question_folder: std::env::var("QUESTION_FOLDER").unwrap_or(default.question_folder),
            strings_file: std::env::var("STRINGS_FILE").ok().or(default.strings_file),
            shuffle_seed: std::env::var("SHUFFLE_SEED").ok().and_then(|v| v.parse().ok()).or(default.shuffle_seed),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 严格模式：存在但无法解析的数值变量视为错误
    pub fn try_from_env() -> AppResult<Self> {
        let mut config = Self::from_env();
        if let Ok(value) = std::env::var("CAS_TIMEOUT_SECS") {
            config.cas_timeout_secs = parse_var("CAS_TIMEOUT_SECS", &value, "u64")?;
        }
        if let Ok(value) = std::env::var("SHUFFLE_SEED") {
            config.shuffle_seed = Some(parse_var("SHUFFLE_SEED", &value, "u64")?);
        }
        Ok(config)
    }

    pub fn cas_timeout(&self) -> Duration {
        Duration::from_secs(self.cas_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: &str,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}
