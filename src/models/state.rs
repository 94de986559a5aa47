//! 学生提交状态与渲染描述

use serde::{Deserialize, Serialize};

use crate::models::parameters::DdlType;

/// 学生当前提交的内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub contents: Vec<String>,
}

impl InputState {
    pub fn new(contents: Vec<String>) -> Self {
        Self { contents }
    }

    pub fn single(value: impl Into<String>) -> Self {
        Self {
            contents: vec![value.into()],
        }
    }

    /// 提交内容对应的 CAS 值；下拉只关心第一个元素
    pub fn contents_to_maxima(&self) -> &str {
        self.contents.first().map(String::as_str).unwrap_or("")
    }
}

/// 交给宿主 UI 框架的选择控件描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescription {
    pub kind: DdlType,
    pub field_name: String,
    pub options: Vec<(String, String)>,
    pub selected: String,
    pub disabled: bool,
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Rendered {
    Widget(WidgetDescription),
    /// 没有任何选项时的本地化占位消息
    Empty(String),
}

/// 教师测试表单中的字段描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestInputField {
    Static {
        name: String,
        message: String,
    },
    Select {
        name: String,
        label: String,
        options: Vec<(String, String)>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_to_maxima() {
        assert_eq!(InputState::default().contents_to_maxima(), "");
        let state = InputState::new(vec!["x^2".to_string(), "ignored".to_string()]);
        assert_eq!(state.contents_to_maxima(), "x^2");
    }
}
