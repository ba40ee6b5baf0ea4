pub mod output_json;
pub mod output_text;
pub mod reader;
