//! 教师答案解析服务 - 业务能力层
//!
//! 教师答案是一个列表的列表，每个元素为 `[value, correct, display]`，
//! 其中 display 可省略。

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::InputError;
use crate::models::{DropdownOption, Parsed, Warning};
use crate::utils::maxima_list;

/// 解析单个选项
///
/// 接受带或不带外层方括号的写法：`[x^2,true,x^{2}]` 与 `x^2,true,x^{2}` 等价。
/// 字段少于两个时返回 `None`。
pub fn parse_option(element: &str) -> Option<DropdownOption> {
    let fields = maxima_list::list_to_vec(element)
        .unwrap_or_else(|| maxima_list::split_top_level(element));

    if fields.len() < 2 {
        return None;
    }

    let value = fields[0].clone();
    let correct = fields[1] == "true";
    let display_override = fields.get(2).cloned();

    Some(DropdownOption::new(value, correct, display_override))
}

/// 解析完整的教师答案
///
/// 格式错误和重复值的选项被跳过并记为警告。没有任何正确选项时返回
/// `InputError::NoCorrectAnswer`。
pub fn parse_teacher_answer(teacher_answer: &str) -> Result<Parsed<Vec<DropdownOption>>, InputError> {
    let parsed = collect_options(teacher_answer);
    ensure_correct(&parsed.value)?;
    Ok(parsed)
}

/// 至少需要一个正确选项
pub fn ensure_correct(options: &[DropdownOption]) -> Result<(), InputError> {
    let number_correct = options.iter().filter(|o| o.correct).count();
    if number_correct == 0 {
        return Err(InputError::NoCorrectAnswer);
    }
    debug!("共解析 {} 个选项，其中 {} 个正确", options.len(), number_correct);
    Ok(())
}

/// 收集教师答案中的有效选项，不检查正确答案个数
pub fn collect_options(teacher_answer: &str) -> Parsed<Vec<DropdownOption>> {
    let mut warnings = Vec::new();

    let elements = match maxima_list::list_to_vec(teacher_answer) {
        Some(elements) => elements,
        None => {
            warn!("⚠️ 教师答案不是列表: {}", teacher_answer.trim());
            warnings.push(Warning::NotAList {
                raw: teacher_answer.trim().to_string(),
            });
            Vec::new()
        }
    };

    let mut options: Vec<DropdownOption> = Vec::with_capacity(elements.len());
    let mut seen = HashSet::new();

    for (index, element) in elements.iter().enumerate() {
        // 子元素必须本身是列表
        let parsed = maxima_list::is_list(element)
            .then(|| parse_option(element))
            .flatten();

        let Some(option) = parsed else {
            warn!("⚠️ 跳过格式错误的第 {} 个选项: {}", index + 1, element);
            warnings.push(Warning::MalformedOption {
                index,
                raw: element.clone(),
            });
            continue;
        };

        // 空值与"未作答"条目的键相同
        if option.value.is_empty() {
            warn!("⚠️ 跳过值为空的第 {} 个选项: {}", index + 1, element);
            warnings.push(Warning::EmptyValue { index });
            continue;
        }

        if !seen.insert(option.value.clone()) {
            warn!("⚠️ 跳过重复的选项值: {}", option.value);
            warnings.push(Warning::DuplicateValue {
                value: option.value,
            });
            continue;
        }

        debug!(
            "选项 {}: value={} correct={} display={}",
            index + 1,
            option.value,
            option.correct,
            option.display
        );
        options.push(option);
    }

    Parsed::new(options, warnings)
}
