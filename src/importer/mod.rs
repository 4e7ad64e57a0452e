// ==========================================
// 奖助学金管理看板 - 导入层
// ==========================================
// 职责: 外部数据加载（远程表格 / Excel / CSV），交给充实引擎
// 输出: 充实后的花名册 + DQ 报告
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod roster_importer_impl;
pub mod roster_importer_trait;
pub mod sheet_source;

// 重导出核心类型
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawTable, UniversalFileParser};
pub use roster_importer_impl::{RosterImporterImpl, ORG_CHART_SOURCE_KEY, ROSTER_SOURCE_KEY};
pub use sheet_source::{google_sheet_csv_url, DataSource, DatasetLoader, DatasetOrigin, LoadedDataset};

// 重导出 Trait 接口
pub use roster_importer_trait::{
    ConflictHandler, DataCleaner, DqValidator, FieldMapper, FileParser, RosterImporter,
};
