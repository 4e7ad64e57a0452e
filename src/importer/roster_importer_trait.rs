// ==========================================
// 奖助学金管理看板 - 花名册导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 读取 → 映射 → 清洗 → 构建索引 → 充实 → 校验 → 报告
// ==========================================

use crate::domain::org_chart::OrgChartBuildStats;
use crate::domain::person::PersonRecord;
use crate::domain::report::{DqViolation, EnrichmentReport, EnrichmentResult, EnrichmentSummary};
use crate::domain::types::MatchKind;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;
use crate::importer::sheet_source::DataSource;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// RosterImporter Trait
// ==========================================
// 用途: 花名册导入 + 组织架构充实主接口
// 实现者: RosterImporterImpl
#[async_trait]
pub trait RosterImporter: Send + Sync {
    /// 加载组织架构与花名册并充实
    ///
    /// # 参数
    /// - org_chart: 组织架构数据源（按列位置读取）
    /// - roster: 花名册数据源（按表头读取）
    ///
    /// # 返回
    /// - Ok(EnrichmentResult): 充实后的花名册 + DQ 报告
    /// - Err: 数据源读取失败（远程失败会先回退本地，本地缺失视为空表）
    async fn import_and_enrich(
        &self,
        org_chart: &DataSource,
        roster: &DataSource,
    ) -> ImportResult<EnrichmentResult>;

    /// 按配置中的数据源执行导入
    async fn import_from_config(&self) -> ImportResult<EnrichmentResult>;

    /// 同一组织架构下充实多份花名册（并发执行）
    ///
    /// # 说明
    /// - 组织架构只加载一次，每份花名册独立出报告
    /// - 单份加载失败不影响其他花名册
    async fn batch_enrich(
        &self,
        org_chart: &DataSource,
        rosters: Vec<DataSource>,
    ) -> ImportResult<Vec<Result<EnrichmentResult, String>>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件读取接口
// 实现者: CsvParser / ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表（首行为表头，空白行跳过）
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 花名册表头别名 → 规范字段
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将一行映射为 PersonRecord
    ///
    /// # 参数
    /// - headers: 原始表头（按列顺序）
    /// - row: 行数据（与表头对齐）
    /// - row_number: 行号（用于 DQ 报告）
    fn map_to_person(&self, headers: &[String], row: &[String], row_number: usize)
        -> PersonRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM，可选 UPPER）
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 标准化 NULL 值（空白 / nan / None → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 清洗单条花名册记录（原地）
    fn clean_person(&self, record: &mut PersonRecord);
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口
// 实现者: DqValidatorImpl
pub trait DqValidator: Send + Sync {
    /// 校验工号（缺失为 Error）
    fn validate_primary_key(&self, records: &[PersonRecord]) -> Vec<DqViolation>;

    /// 校验充实结果（无代码为 Info，部门 N/D 为 Warning）
    fn validate_enriched(
        &self,
        records: &[PersonRecord],
        match_kinds: &[MatchKind],
    ) -> Vec<DqViolation>;

    /// 生成充实报告
    fn generate_report(
        &self,
        batch_id: String,
        org_chart: OrgChartBuildStats,
        summary: EnrichmentSummary,
        violations: Vec<DqViolation>,
        config_snapshot: Option<String>,
    ) -> EnrichmentReport;
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// 用途: 冲突检测接口
// 实现者: ConflictHandlerImpl
pub trait ConflictHandler: Send + Sync {
    /// 检测花名册内重复工号
    ///
    /// # 返回
    /// - Vec<(行号, matricula)>: 重复记录（不包括第一次出现）
    fn detect_duplicates(&self, records: &[PersonRecord]) -> Vec<(usize, String)>;
}
