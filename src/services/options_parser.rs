//! 配置解析服务 - 业务能力层
//!
//! 把逗号分隔的 options 字符串解析为 `DropdownConfig`

use tracing::{debug, warn};

use crate::models::{DdlDisplay, DdlType, DropdownConfig, Parsed, Warning};

/// 解析 options 字符串
///
/// 每个标记先去空白再转小写后比较；同一组内后出现的标记覆盖先出现的。
/// 空标记被跳过，无法识别的标记记为 `UnrecognizedFlag` 警告。
pub fn parse_options(options: &str) -> Parsed<DropdownConfig> {
    let mut config = DropdownConfig::default();
    let mut warnings = Vec::new();

    if options.trim().is_empty() {
        return Parsed::new(config, warnings);
    }

    for raw in options.split(',') {
        let token = raw.trim().to_lowercase();
        match token.as_str() {
            "" => continue,
            "shuffle" => config.shuffle = true,
            "latex" => config.display_mode = DdlDisplay::Latex,
            "latexinline" => config.display_mode = DdlDisplay::LatexInline,
            "casstring" => config.display_mode = DdlDisplay::CasString,
            "checkbox" => config.widget_type = DdlType::Checkbox,
            "radio" => config.widget_type = DdlType::Radio,
            "select" => config.widget_type = DdlType::Select,
            _ => {
                warn!("⚠️ 忽略无法识别的选项标记: {}", raw.trim());
                warnings.push(Warning::UnrecognizedFlag {
                    token: raw.trim().to_string(),
                });
                continue;
            }
        }
        debug!("识别选项标记: {}", token);
    }

    Parsed::new(config, warnings)
}
