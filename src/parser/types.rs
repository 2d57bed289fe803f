use std::fmt;

use serde::{Deserialize, Serialize};

/// 文本块的解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockMode {
    /// 请求头和参数：普通的 `name: value` 对
    Request,
    /// 期望的响应头：`{name}` 表示占位符，至少需要一个条目
    Response,
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockMode::Request => write!(f, "request"),
            BlockMode::Response => write!(f, "response"),
        }
    }
}

/// 解析后的单个 `name: value` 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// 去除空白后的键，占位符已去掉括号。不会为空
    pub name: String,

    /// 第一个冒号之后的剩余内容（已去除空白）
    pub value: String,

    /// 仅在响应模式下设置
    pub is_placeholder: bool,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_placeholder: false,
        }
    }

    pub fn placeholder(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            is_placeholder: true,
            ..Self::new(name, value)
        }
    }
}

/// 一个文本字段解析出的条目，保持输入行的顺序
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedBlock {
    entries: Vec<HeaderEntry>,
}

impl ParsedBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HeaderEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按名称查找第一个条目
    pub fn get(&self, name: &str) -> Option<&HeaderEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl FromIterator<HeaderEntry> for ParsedBlock {
    fn from_iter<I: IntoIterator<Item = HeaderEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParsedBlock {
    type Item = HeaderEntry;
    type IntoIter = std::vec::IntoIter<HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParsedBlock {
    type Item = &'a HeaderEntry;
    type IntoIter = std::slice::Iter<'a, HeaderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
