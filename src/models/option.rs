use serde::{Deserialize, Serialize};

/// 下拉列表中的一个候选答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// CAS 表达式，同时作为选择键，在选项集合内唯一
    pub value: String,
    /// 显示给学生的文本
    pub display: String,
    /// 是否为正确答案
    pub correct: bool,
    /// 教师显式给出的显示形式（第三个字段）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_override: Option<String>,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, correct: bool, display_override: Option<String>) -> Self {
        let value = value.into();
        let display = display_override.clone().unwrap_or_else(|| value.clone());
        Self {
            value,
            display,
            correct,
            display_override,
        }
    }

    /// 送往 CAS 或直接显示的原始文本（显示覆盖优先）
    pub fn raw_display(&self) -> &str {
        self.display_override.as_deref().unwrap_or(&self.value)
    }
}

/// 由名称和表达式组成的 CAS 赋值，线上格式为 `name:expr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedExpression {
    pub name: String,
    pub expr: String,
}

impl NamedExpression {
    pub fn new(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expr: expr.into(),
        }
    }
}

impl std::fmt::Display for NamedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.expr)
    }
}
