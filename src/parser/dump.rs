//! 开发者工具导出的头部
//!
//! 从浏览器网络面板复制请求头时，名称占一行，值在下一行：
//!
//! ```text
//! :authority:
//! example.com
//! accept:
//! text/html
//! ```
//!
//! 已经带有内联值的行（`:method: GET`）作为单个条目原样保留。

/// 判断 `text` 是否为导出格式（以冒号开头）
pub fn is_dump(text: &str) -> bool {
    text.trim_start().starts_with(':')
}

/// 将导出内容改写为每个头部一行的 `name: value` 格式
pub fn to_colon_separated(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut output = String::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index].strip_prefix(':').unwrap_or(lines[index]);

        if let Some(name) = name_only(line) {
            // 末尾多出的名称行没有对应的值
            let value = lines.get(index + 1).copied().unwrap_or("");
            output.push_str(&format!("{}: {}\n", name, value));
            index += 2;
        } else {
            output.push_str(line);
            output.push('\n');
            index += 1;
        }
    }

    output
}

/// `line` 不含内联值时返回名称本身
fn name_only(line: &str) -> Option<&str> {
    if let Some(name) = line.strip_suffix(':') {
        return Some(name);
    }
    match line.split_once(':') {
        Some((_, value)) if !value.trim().is_empty() => None,
        _ => Some(line),
    }
}
