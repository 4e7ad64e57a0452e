// ==========================================
// 奖助学金管理看板 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.ods) / CSV (.csv)
// 约束: 保持列顺序（组织架构按列位置读取），表头仅 TRIM
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::roster_importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>, // 不含表头，已跳过空白行
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn push_row(&mut self, row: Vec<String>) {
        // 跳过完全空白的行
        if row.iter().all(|v| v.is_empty()) {
            return;
        }
        self.rows.push(row);
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析（远程表格导出的 CSV 亦走此路径）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        let mut table = RawTable {
            headers: reader
                .headers()?
                .iter()
                .map(|h| h.trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for result in reader.records() {
            let record = result?;
            table.push_row(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(table)
    }
}

impl FileParser for CsvParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        if let Some(ext) = file_path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn read_first_sheet(&self, path: &Path) -> ImportResult<RawTable> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Err(ImportError::ExcelParseError("Excel 文件无工作表".to_string()));
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            // 空工作表视为空表
            return Ok(RawTable::default());
        };

        let mut table = RawTable {
            headers: header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect(),
            rows: Vec::new(),
        };

        for data_row in rows {
            table.push_row(
                data_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
            );
        }

        Ok(table)
    }
}

impl FileParser for ExcelParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !matches!(ext.as_str(), "xlsx" | "xls" | "xlsm" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 文件被其他程序占用时，复制到临时目录再读
        match File::open(file_path) {
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                warn!(file = %file_path.display(), "文件被占用，复制到临时目录读取");
                let temp_path = copy_to_temp(file_path, &ext)?;
                let result = self.read_first_sheet(&temp_path);
                if let Err(e) = std::fs::remove_file(&temp_path) {
                    debug!(file = %temp_path.display(), error = %e, "临时文件清理失败");
                }
                result
            }
            Err(e) => Err(e.into()),
            Ok(_) => self.read_first_sheet(file_path),
        }
    }
}

fn copy_to_temp(path: &Path, ext: &str) -> ImportResult<PathBuf> {
    let temp_path = std::env::temp_dir().join(format!("bolsas-{}.{}", Uuid::new_v4(), ext));
    std::fs::copy(path, &temp_path).map_err(|e| {
        ImportError::FileReadError(format!(
            "文件被占用且无法复制: {} ({})",
            path.display(),
            e
        ))
    })?;
    Ok(temp_path)
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_table(file_path),
            "xlsx" | "xls" | "xlsm" | "ods" => ExcelParser.parse_table(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
