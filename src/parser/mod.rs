pub mod block;
pub mod dump;
pub mod types;

// 重新导出常用类型
pub use block::BlockParser;
pub use types::{BlockMode, HeaderEntry, ParsedBlock};

use crate::Result;

/// 将冒号分隔的文本字段解析为有序文本块
pub fn parse_block(text: &str, mode: BlockMode) -> Result<ParsedBlock> {
    BlockParser::parse(text, mode)
}

/// 将粘贴的开发者工具头部导出转换为冒号分隔的行
pub fn parse_chrome_style_dump(text: &str) -> String {
    dump::to_colon_separated(text)
}
