use serde::{Deserialize, Serialize};

use crate::models::parameters::InputParameters;

/// 一个下拉输入的题目定义（来自 TOML 文件）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropdownQuestion {
    /// 输入名称，例如 `ans1`
    pub name: String,
    /// 教师答案：列表的列表 `[[value, correct, display], ...]`
    pub teacher_answer: String,
    #[serde(default)]
    pub parameters: InputParameters,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl DropdownQuestion {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
