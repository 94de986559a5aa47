//! 显示解析服务 - 业务能力层
//!
//! 按显示模式把每个选项的显示文本转换为最终形式：
//! - `casstring`：包裹在 `<code>` 中，不经过 CAS
//! - `LaTeX` / `LaTeXinline`：整批送往 CAS 生成排版形式，再加数学定界符
//!
//! CAS 调用是整批原子的：要么所有选项都得到新显示，要么一个都不变。

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::CasError;
use crate::models::{DdlDisplay, DropdownOption, NamedExpression};
use crate::utils::maxima_list;

/// 外部 CAS 会话
///
/// 接收一批命名表达式，一次性计算，返回 名称 → 排版形式。
/// 任何错误都意味着整批失败，不存在部分结果。
#[async_trait]
pub trait CasSession: Send + Sync {
    async fn evaluate_batch(
        &self,
        batch: &[NamedExpression],
    ) -> Result<HashMap<String, String>, CasError>;
}

/// 第 `index` 个选项在批次中的名称
pub fn batch_name(index: usize) -> String {
    format!("val{}", index)
}

/// 为选项构建 CAS 批次（使用显示形式而非值）
pub fn build_batch(options: &[DropdownOption]) -> Vec<NamedExpression> {
    options
        .iter()
        .enumerate()
        .map(|(i, opt)| NamedExpression::new(batch_name(i), opt.raw_display()))
        .collect()
}

/// 按模式给排版结果加上定界符
pub fn wrap_display(mode: DdlDisplay, text: &str) -> String {
    match mode {
        DdlDisplay::CasString => format!("<code>{}</code>", text),
        DdlDisplay::Latex => format!("\\[{}\\]", text),
        DdlDisplay::LatexInline => format!("\\({}\\)", text),
    }
}

/// 解析所有选项的显示形式
///
/// 返回带新显示的选项副本；失败时输入保持不变。
pub async fn resolve_displays(
    options: &[DropdownOption],
    mode: DdlDisplay,
    cas: Option<&dyn CasSession>,
    timeout: Duration,
) -> Result<Vec<DropdownOption>, CasError> {
    if !mode.needs_cas() {
        return Ok(options
            .iter()
            .map(|opt| DropdownOption {
                display: wrap_display(mode, opt.raw_display()),
                ..opt.clone()
            })
            .collect());
    }

    let cas = cas.ok_or(CasError::Unavailable)?;
    let batch = build_batch(options);

    // 括号必须成对，且不能夹带额外的语句
    if let Some(bad) = batch.iter().find(|e| {
        !maxima_list::brackets_balanced(&e.expr) || maxima_list::has_statement_separator(&e.expr)
    }) {
        error!("❌ 表达式无效，未发送到 CAS: {}", bad);
        return Err(CasError::InvalidExpression {
            name: bad.name.clone(),
            expr: bad.expr.clone(),
        });
    }

    info!("🧮 正在通过 CAS 生成 {} 个选项的 {} 显示...", batch.len(), mode);
    for expr in &batch {
        debug!("CAS 批次: {}", expr);
    }

    let results = match tokio::time::timeout(timeout, cas.evaluate_batch(&batch)).await {
        Ok(Ok(results)) => results,
        Ok(Err(e)) => {
            error!("❌ CAS 计算失败: {}", e);
            return Err(e);
        }
        Err(_) => {
            error!("❌ CAS 调用超时 ({:?})", timeout);
            return Err(CasError::Timeout {
                millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }
    };

    let mut resolved = Vec::with_capacity(options.len());
    for (opt, expr) in options.iter().zip(&batch) {
        let typeset = results.get(&expr.name).ok_or_else(|| CasError::MissingResult {
            name: expr.name.clone(),
        })?;
        resolved.push(DropdownOption {
            display: wrap_display(mode, typeset),
            ..opt.clone()
        });
    }

    info!("✓ CAS 显示生成完成");
    Ok(resolved)
}
