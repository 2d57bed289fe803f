pub mod types;
pub mod xml;

pub use types::{BenchmarkConfig, BenchmarkForm};
pub use xml::ConfigSynthesizer;

use crate::Result;
use crate::parser::{BlockMode, ParsedBlock};

/// 单个文本块的标记片段，空文本块返回空片段
pub fn serialize_block(block: &ParsedBlock, mode: BlockMode) -> String {
    ConfigSynthesizer::serialize_block(block, mode)
}

/// 根据原始表单输入生成完整配置文档
pub fn synthesize_config(form: &BenchmarkForm) -> Result<String> {
    ConfigSynthesizer::synthesize(form)
}
