use crate::parser::dump;
use crate::parser::types::{BlockMode, HeaderEntry, ParsedBlock};
use crate::{Result, StatsError};

/// 由传输层自行计算的头部。在键名中区分大小写地按子串匹配
const TRANSPORT_MANAGED_KEYS: [&str; 2] = ["Content-Length", "Content-Type"];

pub const EMPTY_RESPONSE_MESSAGE: &str = "Please enter at least one response header";

/// 冒号分隔文本块解析器
pub struct BlockParser;

impl BlockParser {
    /// 按给定模式解析一个文本字段
    ///
    /// 没有冒号或键为空的行会被跳过。
    /// [`BlockMode::Response`] 模式下结果为空属于校验错误
    pub fn parse(text: &str, mode: BlockMode) -> Result<ParsedBlock> {
        let block = if text.trim().is_empty() {
            ParsedBlock::new()
        } else if dump::is_dump(text) {
            let converted = dump::to_colon_separated(text);
            tracing::debug!(%mode, "Converted header dump:\n{}", converted);
            Self::parse_lines(&converted, mode)
        } else {
            Self::parse_lines(text, mode)
        };

        mode.validate(&block)?;
        Ok(block)
    }

    fn parse_lines(text: &str, mode: BlockMode) -> ParsedBlock {
        text.split('\n')
            .filter_map(Self::split_line)
            .filter(|(key, _)| !Self::is_transport_managed(key))
            .filter_map(|(key, value)| mode.entry(key, value))
            .collect()
    }

    /// 按第一个冒号分割，后续冒号保留在值中
    fn split_line(line: &str) -> Option<(&str, &str)> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (key, value) = line.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, value.trim()))
    }

    fn is_transport_managed(key: &str) -> bool {
        TRANSPORT_MANAGED_KEYS.iter().any(|k| key.contains(k))
    }
}

impl BlockMode {
    fn entry(self, key: &str, value: &str) -> Option<HeaderEntry> {
        match self {
            BlockMode::Request => Some(HeaderEntry::new(key, value)),
            BlockMode::Response => Self::response_entry(key, value),
        }
    }

    /// `{name}` 表示占位符。两侧括号同时存在时才各去掉一个
    fn response_entry(key: &str, value: &str) -> Option<HeaderEntry> {
        match key.strip_prefix('{').and_then(|k| k.strip_suffix('}')) {
            Some("") => None,
            Some(name) => Some(HeaderEntry::placeholder(name, value)),
            None => Some(HeaderEntry::new(key, value)),
        }
    }

    fn validate(self, block: &ParsedBlock) -> Result<()> {
        if self == BlockMode::Response && block.is_empty() {
            return Err(StatsError::validation(EMPTY_RESPONSE_MESSAGE));
        }
        Ok(())
    }
}
