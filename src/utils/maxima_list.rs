//! Maxima 列表文本的切分工具
//!
//! 只切分一层：`[a,[b,c],f(d,e)]` → `["a", "[b,c]", "f(d,e)"]`。
//! 括号 `()[]{}` 和双引号字符串内部的逗号不会被当作分隔符。

/// 如果 `s` 整体是一个方括号列表，返回其内部文本
pub fn list_inner(s: &str) -> Option<&str> {
    let s = s.trim();
    if !s.starts_with('[') || !s.ends_with(']') {
        return None;
    }
    match matching_close(s, 0) {
        Some(end) if end == s.len() - 1 => Some(&s[1..end]),
        _ => None,
    }
}

pub fn is_list(s: &str) -> bool {
    list_inner(s).is_some()
}

/// 把列表切分成顶层元素；`s` 不是列表时返回 `None`
pub fn list_to_vec(s: &str) -> Option<Vec<String>> {
    list_inner(s).map(split_top_level)
}

/// 按顶层逗号切分，元素会被去除首尾空白；空文本得到空列表
pub fn split_top_level(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                items.push(s[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(s[start..].trim().to_string());
    items
}

/// 括号是否成对且嵌套正确（字符串内部忽略）
pub fn brackets_balanced(s: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in s.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(open) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty() && !in_string
}

/// 字符串外是否出现语句终止符 `$` 或 `;`
pub fn has_statement_separator(s: &str) -> bool {
    let mut in_string = false;
    let mut escaped = false;

    for c in s.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '$' | ';' => return true,
            _ => {}
        }
    }
    false
}

/// 找到 `open_idx` 处左括号对应的右括号的字节位置
fn matching_close(s: &str, open_idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s[open_idx..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open_idx + i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_to_vec_one_level() {
        let items = list_to_vec("[[x^2,true,x^{2}], [x^3,false], f(a,b)]").unwrap();
        assert_eq!(items, vec!["[x^2,true,x^{2}]", "[x^3,false]", "f(a,b)"]);
    }

    #[test]
    fn test_strings_protect_commas() {
        let items = list_to_vec(r#"["a,b",true,"say \"hi\", ok"]"#).unwrap();
        assert_eq!(items, vec![r#""a,b""#, "true", r#""say \"hi\", ok""#]);
    }

    #[test]
    fn test_not_a_list() {
        assert!(list_to_vec("x^2").is_none());
        // 两个相邻列表不是一个列表
        assert!(list_to_vec("[a],[b]").is_none());
        assert_eq!(list_to_vec("[]").unwrap(), Vec::<String>::new());
        assert_eq!(list_to_vec("  [ a ]  ").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_brackets_balanced() {
        assert!(brackets_balanced("sin(x)^[2]"));
        assert!(brackets_balanced(r#"f("(")"#));
        assert!(!brackets_balanced("sin(x"));
        assert!(!brackets_balanced("(]"));
        assert!(!brackets_balanced(r#""open"#));
    }

    #[test]
    fn test_statement_separator() {
        assert!(has_statement_separator("x$ val1:evil()"));
        assert!(has_statement_separator("a;b"));
        assert!(has_statement_separator("f(a$b)"));
        assert!(!has_statement_separator(r#""costs $5; maybe""#));
        assert!(!has_statement_separator(r#"f("a\"$")"#));
        assert!(!has_statement_separator("x^2+1"));
    }
}
