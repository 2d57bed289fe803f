use crate::Result;
use crate::generator::types::{BenchmarkConfig, BenchmarkForm};
use crate::parser::{BlockMode, ParsedBlock};

const XML_DECLARATION: &str = r#"<?xml version="1.0"?>"#;
const ROOT_OPEN: &str = r#"<configuration xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="stats-meta.xsd">"#;
const ROOT_CLOSE: &str = "</configuration>";

/// 生成统计服务使用的配置文档
///
/// 名称和值原样写入，不做任何转义：包含 `<`、`>` 或引号的输入
/// 会生成格式错误的文档，不可信的文本需要事先清理
pub struct ConfigSynthesizer;

impl ConfigSynthesizer {
    pub fn synthesize(form: &BenchmarkForm) -> Result<String> {
        let config = BenchmarkConfig::try_from(form)?;
        Ok(Self::to_xml(&config))
    }

    /// 序列化已校验的配置，字段顺序固定
    pub fn to_xml(config: &BenchmarkConfig) -> String {
        let mut xml = String::new();

        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(ROOT_OPEN);
        xml.push('\n');

        Self::push_field(&mut xml, "is-test", &config.is_test.to_string());
        Self::push_field(
            &mut xml,
            "skip-first-request-data-row",
            &config.skip_first_request_data_row.to_string(),
        );
        Self::push_field(
            &mut xml,
            "disable-parallel-calls",
            &config.disable_parallel_calls.to_string(),
        );
        Self::push_field(&mut xml, "url", &config.url);
        Self::push_field(&mut xml, "method", &config.method);
        Self::push_section(&mut xml, "headers", &config.headers, BlockMode::Request);
        Self::push_field(&mut xml, "raw-request-headers", "");
        Self::push_section(&mut xml, "params", &config.params, BlockMode::Request);
        Self::push_field(&mut xml, "json-body", &config.json_body);
        Self::push_field(&mut xml, "request-batch-size", &config.request_batch_size);
        Self::push_field(
            &mut xml,
            "request-batch-interval",
            &config.request_batch_interval,
        );
        Self::push_section(&mut xml, "response", &config.response, BlockMode::Response);
        Self::push_field(&mut xml, "placeholder-handler", &config.placeholder_handler);

        xml.push_str(ROOT_CLOSE);
        xml
    }

    /// 每个条目一个元素，各占一行
    pub fn serialize_block(block: &ParsedBlock, mode: BlockMode) -> String {
        let mut fragment = String::new();

        for entry in block {
            let element = match mode {
                BlockMode::Request => {
                    format!("<{0}>{1}</{0}>", entry.name, entry.value)
                }
                BlockMode::Response => format!(
                    r#"<header name="{}" placeholder="{}">{}</header>"#,
                    entry.name, entry.is_placeholder, entry.value
                ),
            };
            fragment.push_str("    ");
            fragment.push_str(&element);
            fragment.push('\n');
        }

        fragment
    }

    fn push_field(xml: &mut String, tag: &str, value: &str) {
        xml.push_str(&format!("  <{0}>{1}</{0}>\n", tag, value));
    }

    fn push_section(xml: &mut String, tag: &str, block: &ParsedBlock, mode: BlockMode) {
        let fragment = Self::serialize_block(block, mode);
        if fragment.is_empty() {
            Self::push_field(xml, tag, "");
        } else {
            xml.push_str(&format!("  <{0}>\n{1}  </{0}>\n", tag, fragment));
        }
    }
}
