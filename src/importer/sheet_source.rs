// ==========================================
// 奖助学金管理看板 - 数据源加载
// ==========================================
// 优先级: 远程表格（Google Sheets CSV 导出） > 本地文件
// 约束: 远程失败或为空 → 回退本地；本地缺失 → 空表（不报错）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, RawTable, UniversalFileParser};
use crate::importer::roster_importer_trait::FileParser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("bolsas-dashboard/", env!("CARGO_PKG_VERSION"));

// ==========================================
// DataSource - 数据源描述
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub key: String, // 日志中的名称，如 ORGANOGRAMA
    pub remote_url: Option<String>,
    pub local_path: PathBuf,
}

impl DataSource {
    pub fn local(key: &str, local_path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.to_string(),
            remote_url: None,
            local_path: local_path.into(),
        }
    }

    pub fn with_remote(mut self, url: Option<String>) -> Self {
        self.remote_url = url.filter(|u| !u.trim().is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetOrigin {
    Remote(String),
    Local(PathBuf),
    Missing,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub origin: DatasetOrigin,
    pub table: RawTable,
}

/// Google Sheets 编辑链接 → CSV 导出链接
///
/// 非 Google Sheets 链接原样返回。
pub fn google_sheet_csv_url(url: &str) -> String {
    let url = url.trim();
    if url.contains("/export?") {
        return url.to_string();
    }

    let Some((base, rest)) = url.split_once("/spreadsheets/d/") else {
        return url.to_string();
    };

    let sheet_id: String = rest
        .chars()
        .take_while(|c| !matches!(c, '/' | '?' | '#'))
        .collect();
    if sheet_id.is_empty() {
        return url.to_string();
    }

    let gid = rest
        .split(['?', '#', '&'])
        .find_map(|part| part.strip_prefix("gid="))
        .map(|g| g.chars().take_while(|c| c.is_ascii_digit()).collect::<String>())
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| "0".to_string());

    format!(
        "{}/spreadsheets/d/{}/export?format=csv&gid={}",
        base, sheet_id, gid
    )
}

// ==========================================
// DatasetLoader - 数据集加载器
// ==========================================
pub struct DatasetLoader {
    http_client: reqwest::Client,
}

impl DatasetLoader {
    pub fn new(timeout: Duration) -> ImportResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ImportError::InternalError(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self { http_client })
    }

    /// 加载数据集（远程优先，本地回退）
    pub async fn load(&self, source: &DataSource) -> ImportResult<LoadedDataset> {
        if let Some(url) = &source.remote_url {
            match self.fetch_remote(&source.key, url).await {
                Ok(table) if !table.is_empty() => {
                    info!(source = %source.key, rows = table.len(), "远程表格加载成功");
                    return Ok(LoadedDataset {
                        origin: DatasetOrigin::Remote(url.clone()),
                        table,
                    });
                }
                Ok(_) => {
                    warn!(source = %source.key, "远程表格为空，回退本地文件");
                }
                Err(e) => {
                    warn!(source = %source.key, error = %e, "远程表格读取失败，回退本地文件");
                }
            }
        }

        self.load_local(source)
    }

    /// 仅读取本地文件
    pub fn load_local(&self, source: &DataSource) -> ImportResult<LoadedDataset> {
        if !source.local_path.exists() {
            warn!(
                source = %source.key,
                file = %source.local_path.display(),
                "本地文件不存在，视为空数据集"
            );
            return Ok(LoadedDataset {
                origin: DatasetOrigin::Missing,
                table: RawTable::default(),
            });
        }

        let table = UniversalFileParser.parse_table(&source.local_path)?;
        debug!(
            source = %source.key,
            file = %source.local_path.display(),
            rows = table.len(),
            "本地文件加载完成"
        );

        Ok(LoadedDataset {
            origin: DatasetOrigin::Local(source.local_path.clone()),
            table,
        })
    }

    async fn fetch_remote(&self, key: &str, url: &str) -> ImportResult<RawTable> {
        let csv_url = google_sheet_csv_url(url);
        debug!(source = %key, url = %csv_url, "请求远程表格");

        let response = self.http_client.get(&csv_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::RemoteFetchError {
                source_key: key.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body = response.bytes().await?;
        CsvParser.parse_reader(body.as_ref())
    }
}
