// ==========================================
// 奖助学金管理看板 - 花名册导入器实现
// ==========================================
// 职责: 整合导入流程，从数据源到充实后的花名册 + DQ 报告
// 流程: 加载 → 映射 → 清洗 → 工号校验 → 冲突检测 → 构建索引 → 充实 → 校验 → 报告
// ==========================================

use crate::config::EnrichmentConfigReader;
use crate::domain::person::PersonRecord;
use crate::domain::report::{DqLevel, DqViolation, EnrichmentResult};
use crate::engine::{Enricher, OrgChartIndex};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use crate::importer::roster_importer_trait::{
    ConflictHandler, DataCleaner, DqValidator, FieldMapper, RosterImporter,
};
use crate::importer::sheet_source::{DataSource, DatasetLoader};
use crate::importer::{ConflictHandlerImpl, DataCleanerImpl, DqValidatorImpl, FieldMapperImpl};
use async_trait::async_trait;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 组织架构数据源名称
pub const ORG_CHART_SOURCE_KEY: &str = "ORGANOGRAMA";
/// 花名册数据源名称
pub const ROSTER_SOURCE_KEY: &str = "BOLSAS";

// 表头占第 1 行，数据从第 2 行开始
const FIRST_DATA_ROW: usize = 2;

// ==========================================
// RosterImporterImpl - 花名册导入器实现
// ==========================================
pub struct RosterImporterImpl<C>
where
    C: EnrichmentConfigReader,
{
    // 配置读取器
    config: C,

    // 数据集加载器（远程 / 本地）
    loader: DatasetLoader,

    // 导入组件
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_validator: Box<dyn DqValidator>,
    conflict_handler: Box<dyn ConflictHandler>,
}

impl<C> RosterImporterImpl<C>
where
    C: EnrichmentConfigReader,
{
    pub fn new(
        config: C,
        loader: DatasetLoader,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        dq_validator: Box<dyn DqValidator>,
        conflict_handler: Box<dyn ConflictHandler>,
    ) -> Self {
        Self {
            config,
            loader,
            field_mapper,
            data_cleaner,
            dq_validator,
            conflict_handler,
        }
    }

    /// 使用默认组件创建（远程超时取自配置）
    pub async fn with_default_components(config: C) -> ImportResult<Self> {
        let timeout_secs = config
            .get_remote_timeout_secs()
            .await
            .map_err(|e| config_error("remote_timeout_secs", e))?;
        let loader = DatasetLoader::new(Duration::from_secs(timeout_secs))?;

        Ok(Self::new(
            config,
            loader,
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl),
            Box::new(DqValidatorImpl),
            Box::new(ConflictHandlerImpl),
        ))
    }

    /// 对已加载的两张表执行充实（同步，无 I/O）
    ///
    /// # 参数
    /// - org_table: 组织架构表（按列位置读取）
    /// - roster_table: 花名册表（按表头读取）
    /// - nd_warning_ratio: N/D 比例告警阈值
    /// - config_snapshot: 写入报告的配置快照
    pub fn enrich_tables(
        &self,
        org_table: &RawTable,
        roster_table: &RawTable,
        nd_warning_ratio: f64,
        config_snapshot: Option<String>,
    ) -> EnrichmentResult {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(
            batch_id = %batch_id,
            org_rows = org_table.len(),
            roster_rows = roster_table.len(),
            "开始花名册充实"
        );

        // === 步骤 1: 字段映射 + 清洗 ===
        debug!("步骤 1: 字段映射与清洗");
        let records = self.map_roster(roster_table);

        // === 步骤 2: 工号校验 + 冲突检测 ===
        debug!("步骤 2: 工号校验与冲突检测");
        let mut violations = self.dq_validator.validate_primary_key(&records);
        let duplicates = self.conflict_handler.detect_duplicates(&records);
        if !duplicates.is_empty() {
            warn!(count = duplicates.len(), "花名册存在重复工号");
        }
        violations.extend(duplicates.into_iter().map(|(row_number, matricula)| DqViolation {
            row_number,
            matricula: Some(matricula),
            level: DqLevel::Conflict,
            field: "matricula".to_string(),
            message: "重复工号（同批次内）".to_string(),
        }));

        // === 步骤 3: 构建组织架构索引 ===
        debug!("步骤 3: 构建组织架构索引");
        let index = OrgChartIndex::build::<Vec<String>, String>(&org_table.rows);

        // === 步骤 4: 充实 ===
        debug!("步骤 4: 充实");
        let outcome = Enricher::new(nd_warning_ratio).enrich(&records, &index);

        // === 步骤 5: 充实结果校验 + 报告 ===
        debug!("步骤 5: 充实结果校验");
        violations.extend(
            self.dq_validator
                .validate_enriched(&outcome.records, &outcome.match_kinds),
        );

        let report = self.dq_validator.generate_report(
            batch_id,
            index.stats().clone(),
            outcome.summary,
            violations,
            config_snapshot,
        );

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %report.batch_id,
            total = report.summary.total_rows,
            resolved = report.summary.resolved(),
            not_determined = report.summary.not_determined,
            errors = report.count_level(DqLevel::Error),
            conflicts = report.count_level(DqLevel::Conflict),
            elapsed_ms = elapsed_ms,
            "花名册充实完成"
        );

        EnrichmentResult {
            records: outcome.records,
            report,
            elapsed_ms,
        }
    }

    fn map_roster(&self, roster_table: &RawTable) -> Vec<PersonRecord> {
        roster_table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let mut record =
                    self.field_mapper
                        .map_to_person(&roster_table.headers, row, idx + FIRST_DATA_ROW);
                self.data_cleaner.clean_person(&mut record);
                record
            })
            .collect()
    }

    async fn load_quality_settings(&self) -> ImportResult<(f64, Option<String>)> {
        let ratio = self
            .config
            .get_nd_warning_ratio()
            .await
            .map_err(|e| config_error("nd_warning_ratio", e))?;
        let snapshot = self
            .config
            .get_config_snapshot()
            .await
            .map_err(|e| config_error("config_snapshot", e))?;
        Ok((ratio, snapshot))
    }
}

#[async_trait]
impl<C> RosterImporter for RosterImporterImpl<C>
where
    C: EnrichmentConfigReader,
{
    #[instrument(skip(self, org_chart, roster), fields(org_chart = %org_chart.key, roster = %roster.key))]
    async fn import_and_enrich(
        &self,
        org_chart: &DataSource,
        roster: &DataSource,
    ) -> ImportResult<EnrichmentResult> {
        let (org_loaded, roster_loaded) =
            futures::join!(self.loader.load(org_chart), self.loader.load(roster));
        let org_loaded = org_loaded?;
        let roster_loaded = roster_loaded?;
        debug!(
            org_origin = ?org_loaded.origin,
            roster_origin = ?roster_loaded.origin,
            "数据源加载完成"
        );

        let (ratio, snapshot) = self.load_quality_settings().await?;
        Ok(self.enrich_tables(&org_loaded.table, &roster_loaded.table, ratio, snapshot))
    }

    #[instrument(skip(self))]
    async fn import_from_config(&self) -> ImportResult<EnrichmentResult> {
        let org_path = self
            .config
            .get_org_chart_local_path()
            .await
            .map_err(|e| config_error("org_chart_local_path", e))?;
        let org_url = self
            .config
            .get_org_chart_remote_url()
            .await
            .map_err(|e| config_error("org_chart_remote_url", e))?;
        let roster_path = self
            .config
            .get_roster_local_path()
            .await
            .map_err(|e| config_error("roster_local_path", e))?;
        let roster_url = self
            .config
            .get_roster_remote_url()
            .await
            .map_err(|e| config_error("roster_remote_url", e))?;

        let org_chart = DataSource::local(ORG_CHART_SOURCE_KEY, org_path).with_remote(org_url);
        let roster = DataSource::local(ROSTER_SOURCE_KEY, roster_path).with_remote(roster_url);

        self.import_and_enrich(&org_chart, &roster).await
    }

    #[instrument(skip(self, org_chart, rosters), fields(org_chart = %org_chart.key, count = rosters.len()))]
    async fn batch_enrich(
        &self,
        org_chart: &DataSource,
        rosters: Vec<DataSource>,
    ) -> ImportResult<Vec<Result<EnrichmentResult, String>>> {
        use futures::future::join_all;

        info!(count = rosters.len(), "开始批量充实花名册");

        // 组织架构只加载一次
        let org_loaded = self.loader.load(org_chart).await?;
        let (ratio, snapshot) = self.load_quality_settings().await?;
        let org_table = &org_loaded.table;

        let tasks = rosters.iter().map(|roster| {
            let snapshot = snapshot.clone();
            async move {
                match self.loader.load(roster).await {
                    Ok(loaded) => {
                        let result = self.enrich_tables(org_table, &loaded.table, ratio, snapshot);
                        info!(
                            roster = %roster.key,
                            total = result.report.summary.total_rows,
                            "花名册充实成功"
                        );
                        Ok(result)
                    }
                    Err(e) => {
                        error!(roster = %roster.key, error = %e, "花名册加载失败");
                        Err(format!("花名册 {} 加载失败: {}", roster.key, e))
                    }
                }
            }
        });

        // 并发执行
        let results = join_all(tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量充实完成"
        );

        Ok(results)
    }
}

fn config_error(key: &str, err: Box<dyn Error + Send + Sync>) -> ImportError {
    ImportError::ConfigReadError {
        key: key.to_string(),
        message: err.to_string(),
    }
}
