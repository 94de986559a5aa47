//! 可恢复的解析诊断
//!
//! 这些问题不会中断解析，只会被收集起来交给调用方（通常是出题教师）查看。

use serde::Serialize;

/// 解析过程中收集到的警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// 少于两个字段的选项，已跳过
    MalformedOption { index: usize, raw: String },
    /// 值为空的选项，会与"未作答"条目冲突，已跳过
    EmptyValue { index: usize },
    /// 教师答案本身不是列表
    NotAList { raw: String },
    /// 无法识别的配置标记，已忽略
    UnrecognizedFlag { token: String },
    /// 重复的选项值，后出现的已跳过
    DuplicateValue { value: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MalformedOption { index, raw } => {
                write!(f, "第 {} 个选项格式错误（至少需要两个字段）: {}", index + 1, raw)
            }
            Warning::EmptyValue { index } => write!(f, "第 {} 个选项的值为空", index + 1),
            Warning::NotAList { raw } => write!(f, "教师答案不是列表: {}", raw),
            Warning::UnrecognizedFlag { token } => write!(f, "无法识别的选项标记: {}", token),
            Warning::DuplicateValue { value } => write!(f, "重复的选项值: {}", value),
        }
    }
}

/// 带诊断信息的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Parsed<T> {
    pub fn new(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
