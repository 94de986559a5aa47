//! 选项集合构建服务 - 业务能力层

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::models::{ChoiceSet, DropdownOption};

/// 构建 值 → 显示 的有序映射
///
/// 洗牌必须在构建映射之前完成：映射按值索引，之后再打乱不会改变显示顺序。
/// 空字符串哨兵总在洗牌之后放到最前面；没有任何选项时返回空集合。
pub fn build_choices<R: Rng + ?Sized>(
    options: &[DropdownOption],
    shuffle: bool,
    not_answered_label: &str,
    rng: &mut R,
) -> ChoiceSet {
    let mut choices = ChoiceSet::new();
    if options.is_empty() {
        return choices;
    }

    let mut ordered: Vec<&DropdownOption> = options.iter().collect();
    if shuffle {
        ordered.shuffle(rng);
    }

    choices.push("", not_answered_label);
    for opt in ordered {
        if !choices.push(opt.value.as_str(), opt.display.as_str()) {
            warn!("⚠️ 选项值 {:?} 已存在，未加入选项集合", opt.value);
        }
    }
    choices
}
