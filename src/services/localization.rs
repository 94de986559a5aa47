//! 本地化服务
//!
//! 所有面向用户的字符串都通过 `Localizer` 获取，由宿主在构造时注入。

use std::collections::HashMap;

use phf::phf_map;

use crate::error::{AppError, AppResult};

pub const NOT_ANSWERED: &str = "notanswered";
pub const DDL_EMPTY: &str = "ddl_empty";
pub const DDL_NO_CORRECT_ANSWER: &str = "ddl_nocorrectanswersupplied";
pub const DDL_UNRECOGNISED_VALUE: &str = "dropdowngotunrecognisedvalue";

static DEFAULT_STRINGS: phf::Map<&'static str, &'static str> = phf_map! {
    "notanswered" => "(Clear my choice)",
    "ddl_empty" => "No choices were provided for this drop-down.",
    "ddl_nocorrectanswersupplied" => "The teacher did not indicate at least one correct answer.",
    "dropdowngotunrecognisedvalue" => "Invalid choice for this input.",
};

/// 字符串查找接口
pub trait Localizer: Send + Sync {
    fn get_string(&self, key: &str) -> String;
}

/// 内置英文字符串表；未知键返回 `[[key]]`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrings;

impl Localizer for DefaultStrings {
    fn get_string(&self, key: &str) -> String {
        DEFAULT_STRINGS
            .get(key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("[[{}]]", key))
    }
}

/// 覆盖在内置表之上的字符串表，可从 TOML 加载
///
/// ```toml
/// notanswered = "(未作答)"
/// ddl_empty = "该下拉列表没有选项。"
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    overrides: HashMap<String, String>,
}

impl StringTable {
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let overrides: HashMap<String, String> =
            toml::from_str(content).map_err(|e| AppError::toml_parse_failed("<strings>", e))?;
        Ok(Self { overrides })
    }

    pub fn from_file(path: &str) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;
        let overrides: HashMap<String, String> =
            toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(path, e))?;
        Ok(Self { overrides })
    }
}

impl Localizer for StringTable {
    fn get_string(&self, key: &str) -> String {
        match self.overrides.get(key) {
            Some(s) => s.clone(),
            None => DefaultStrings.get_string(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strings() {
        assert_eq!(DefaultStrings.get_string(NOT_ANSWERED), "(Clear my choice)");
        assert_eq!(DefaultStrings.get_string("nosuchkey"), "[[nosuchkey]]");
    }

    #[test]
    fn test_string_table_overlays_defaults() {
        let table = StringTable::from_toml_str("notanswered = \"(未作答)\"").unwrap();
        assert_eq!(table.get_string(NOT_ANSWERED), "(未作答)");
        assert_eq!(
            table.get_string(DDL_UNRECOGNISED_VALUE),
            "Invalid choice for this input."
        );
    }

    #[test]
    fn test_string_table_rejects_bad_toml() {
        assert!(StringTable::from_toml_str("notanswered = ").is_err());
    }
}
