/// Maxima CAS 客户端
///
/// 通过 HTTP 调用 MaximaPool 风格的服务，实现 `CasSession`
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::CasError;
use crate::models::NamedExpression;
use crate::services::CasSession;

/// 输出行的标记前缀，用来区分结果行和 Maxima 的其他输出
const MARKER: &str = "@@";

/// Maxima 客户端
pub struct MaximaClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl MaximaClient {
    /// 创建新的 Maxima 客户端
    pub fn new(config: &Config) -> Self {
        Self::with_endpoint(&config.cas_url, config.cas_timeout())
    }

    /// 使用自定义端点创建
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

/// 把批次拼成一条 Maxima 命令
///
/// 先依次赋值，再逐个打印 `tex1` 排版结果，每行带 `@@name@@` 前缀。
pub fn build_command(batch: &[NamedExpression]) -> String {
    let mut command = String::from("display2d:false$\n");
    for expr in batch {
        command.push_str(&format!("{}$\n", expr));
    }
    for expr in batch {
        command.push_str(&format!(
            "print(\"{m}{name}{m}\", tex1({name}))$\n",
            m = MARKER,
            name = expr.name
        ));
    }
    command
}

/// 解析 Maxima 的输出
///
/// 结果行形如 `@@val0@@ x^2`。任何提到错误的非结果行都会让整批失败，
/// 错误消息即这些行的原文。
pub fn parse_response(output: &str) -> Result<HashMap<String, String>, CasError> {
    let result_line = Regex::new(r"^@@([A-Za-z_][A-Za-z0-9_]*)@@\s?(.*)$")
        .map_err(|e| CasError::Engine(e.to_string()))?;
    let error_line = Regex::new(r"(?i)(error|incorrect syntax|is not an infix operator|undefined variable)")
        .map_err(|e| CasError::Engine(e.to_string()))?;

    let mut results = HashMap::new();
    let mut errors = Vec::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(cap) = result_line.captures(line) {
            results.insert(cap[1].to_string(), cap[2].trim().to_string());
        } else if error_line.is_match(line) {
            errors.push(line.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(CasError::Engine(errors.join("\n")));
    }
    Ok(results)
}

#[async_trait]
impl CasSession for MaximaClient {
    async fn evaluate_batch(
        &self,
        batch: &[NamedExpression],
    ) -> Result<HashMap<String, String>, CasError> {
        let command = build_command(batch);
        debug!("正在调用 CAS: {}", self.endpoint);
        debug!("CAS 命令:\n{}", command);

        let timeout_ms = self.timeout.as_millis().to_string();
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .form(&[("input", command.as_str()), ("timeout", timeout_ms.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!("CAS 请求失败: {}", e);
                CasError::from(e)
            })?
            .error_for_status()?;

        let output = response.text().await?;
        debug!("CAS 返回 {} 字节", output.len());

        parse_response(&output)
    }
}
