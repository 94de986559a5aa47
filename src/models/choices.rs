use serde::Serialize;

/// 有序的 值 → 显示文本 映射
///
/// 第一个条目总是空字符串哨兵（"未作答"）。顺序即渲染顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChoiceSet {
    entries: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub display: String,
}

impl ChoiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个条目；键已存在时保留先出现的那个
    pub fn push(&mut self, value: impl Into<String>, display: impl Into<String>) -> bool {
        let value = value.into();
        if self.contains_key(&value) {
            return false;
        }
        self.entries.push(Choice {
            value,
            display: display.into(),
        });
        true
    }

    pub fn contains_key(&self, value: &str) -> bool {
        self.entries.iter().any(|c| c.value == value)
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.display.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 转成 (值, 显示) 对，供渲染描述使用
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|c| (c.value.clone(), c.display.clone()))
            .collect()
    }
}
