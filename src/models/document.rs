//! 上传文档及其格式

use std::fmt;
use std::path::Path;

use phf::phf_map;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::corpus::CorpusKey;

/// 支持的文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// 提单等 PDF 单据
    Pdf,
    /// Excel 2007+ 发票
    Xlsx,
    /// 旧版 Excel 发票
    Xls,
}

/// 扩展名（小写、不带点）到格式的映射
static EXTENSIONS: phf::Map<&'static str, DocumentFormat> = phf_map! {
    "pdf" => DocumentFormat::Pdf,
    "xlsx" => DocumentFormat::Xlsx,
    "xls" => DocumentFormat::Xls,
};

impl DocumentFormat {
    /// 根据文件名后缀识别格式（忽略大小写）
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        EXTENSIONS.get(ext.as_str()).copied()
    }

    /// 该格式抽取出的文本存放在语料的哪个槽位
    pub fn corpus_key(self) -> CorpusKey {
        match self {
            DocumentFormat::Pdf => CorpusKey::PdfText,
            DocumentFormat::Xlsx | DocumentFormat::Xls => CorpusKey::ExcelText,
        }
    }

    pub fn is_spreadsheet(self) -> bool {
        matches!(self, DocumentFormat::Xlsx | DocumentFormat::Xls)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Xlsx => "xlsx",
            DocumentFormat::Xls => "xls",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个已完整读入内存的上传文档
#[derive(Debug, Clone)]
pub struct Document {
    /// 原始文件名（用于格式识别和日志）
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 从磁盘读取整个文件
    pub async fn load(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        debug!("读取文档 {} ({} 字节)", path.display(), bytes.len());
        Ok(Self::new(path.display().to_string(), bytes))
    }

    /// 按文件名识别的格式；不支持时返回 None
    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_name(&self.name)
    }
}
