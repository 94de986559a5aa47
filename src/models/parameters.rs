use serde::{Deserialize, Serialize};

/// 控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DdlType {
    #[default]
    Select,
    Radio,
    Checkbox,
}

impl DdlType {
    pub fn name(self) -> &'static str {
        match self {
            DdlType::Select => "select",
            DdlType::Radio => "radio",
            DdlType::Checkbox => "checkbox",
        }
    }
}

impl std::fmt::Display for DdlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 学生看到的显示形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DdlDisplay {
    /// 原样显示 CAS 字符串（包裹在 `<code>` 中）
    #[default]
    #[serde(rename = "casstring")]
    CasString,
    /// 块级 LaTeX `\[ \]`
    #[serde(rename = "LaTeX")]
    Latex,
    /// 行内 LaTeX `\( \)`
    #[serde(rename = "LaTeXinline")]
    LatexInline,
}

impl DdlDisplay {
    pub fn name(self) -> &'static str {
        match self {
            DdlDisplay::CasString => "casstring",
            DdlDisplay::Latex => "LaTeX",
            DdlDisplay::LatexInline => "LaTeXinline",
        }
    }

    /// 是否需要经过 CAS 生成显示形式
    pub fn needs_cas(self) -> bool {
        !matches!(self, DdlDisplay::CasString)
    }
}

impl std::fmt::Display for DdlDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 由 options 字符串解析出的下拉配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownConfig {
    pub widget_type: DdlType,
    pub shuffle: bool,
    pub display_mode: DdlDisplay,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            widget_type: DdlType::Select,
            shuffle: true,
            display_mode: DdlDisplay::CasString,
        }
    }
}

/// 宿主系统为每个输入保存的参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputParameters {
    #[serde(default)]
    pub must_verify: bool,
    #[serde(default)]
    pub show_validation: u8,
    #[serde(default)]
    pub options: String,
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            must_verify: false,
            show_validation: 0,
            options: String::new(),
        }
    }
}

impl InputParameters {
    pub fn with_options(options: impl Into<String>) -> Self {
        Self {
            options: options.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_defaults() {
        let params = InputParameters::default();
        assert!(!params.must_verify);
        assert_eq!(params.show_validation, 0);
        assert!(params.options.is_empty());
    }

    #[test]
    fn test_parameters_from_toml_keys() {
        let params: InputParameters =
            toml::from_str("mustVerify = true\nshowValidation = 1\noptions = \"latex\"").unwrap();
        assert!(params.must_verify);
        assert_eq!(params.show_validation, 1);
        assert_eq!(params.options, "latex");
    }

    #[test]
    fn test_config_defaults() {
        let config = DropdownConfig::default();
        assert_eq!(config.widget_type, DdlType::Select);
        assert!(config.shuffle);
        assert_eq!(config.display_mode, DdlDisplay::CasString);
        assert!(!config.display_mode.needs_cas());
    }
}
