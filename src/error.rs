use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目输入（教师答案）错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// CAS 计算错误
    #[error("CAS错误: {0}")]
    Cas(#[from] CasError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 教师答案解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// 没有任何选项被标记为正确
    #[error("没有提供正确答案")]
    NoCorrectAnswer,
}

/// CAS 相关错误
///
/// 显示解析是整批原子的：任何一种错误都意味着没有任何选项的显示被更新。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CasError {
    /// CAS 会话报告了错误，消息即会话的错误文本
    #[error("{0}")]
    Engine(String),
    /// CAS 返回结果中缺少某个表达式
    #[error("CAS 结果中缺少 {name}")]
    MissingResult { name: String },
    /// 调用超时
    #[error("CAS 调用超时 ({millis} 毫秒)")]
    Timeout { millis: u64 },
    /// 网络请求失败
    #[error("CAS 请求失败 ({endpoint}): {message}")]
    Request { endpoint: String, message: String },
    /// 表达式在发送前即被拒绝
    #[error("表达式 {name} 无效: {expr}")]
    InvalidExpression { name: String, expr: String },
    /// 需要 CAS 但没有配置
    #[error("未配置 CAS 会话")]
    Unavailable,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for CasError {
    fn from(err: reqwest::Error) -> Self {
        CasError::Request {
            endpoint: err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_default(),
            message: err.to_string(),
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为 CAS 错误
    pub fn is_cas(&self) -> bool {
        matches!(self, AppError::Cas(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
