use std::path::Path;

/// 程序配置
///
/// 进程启动时从环境变量读取一次，之后只读
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    /// 允许处理的文件扩展名（带点，小写）
    pub allowed_document_types: Vec<String>,
    /// OCR 语言提示
    pub ocr_languages: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 结果输出文件，未设置时写到 stdout
    pub output_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_temperature: 0.0,
            allowed_document_types: vec![".pdf".to_string(), ".xlsx".to_string(), ".xls".to_string()],
            ocr_languages: vec!["en".to_string()],
            verbose_logging: false,
            output_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
            allowed_document_types: std::env::var("ALLOWED_DOCUMENT_TYPES")
                .ok()
                .map(|v| parse_extension_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(default.allowed_document_types),
            ocr_languages: std::env::var("OCR_LANGUAGES")
                .ok()
                .map(|v| parse_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(default.ocr_languages),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_file: std::env::var("OUTPUT_FILE").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

/// 文件扩展名是否在给定白名单中（白名单项为带点的小写扩展名）
pub fn is_extension_allowed(allowed: &[String], path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = format!(".{}", ext.to_ascii_lowercase());
    allowed.iter().any(|item| *item == ext)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `pdf, .XLSX` -> [".pdf", ".xlsx"]
fn parse_extension_list(value: &str) -> Vec<String> {
    parse_list(value)
        .into_iter()
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}
