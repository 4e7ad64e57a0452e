// ==========================================
// 奖助学金管理看板 - 数据质量报告模型
// ==========================================
// 用途: 充实批次的汇总统计与逐行违规明细
// 红线: "N/D" 比例过高只是警告，不阻断结果
// ==========================================

use crate::domain::org_chart::OrgChartBuildStats;
use crate::domain::person::PersonRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,    // 错误（缺工号）
    Warning,  // 警告（部门最终为 N/D）
    Info,     // 提示（无本地代码）
    Conflict, // 冲突（工号重复）
}

// ==========================================
// DqViolation - 违规明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub matricula: Option<String>,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// EnrichmentSummary - 充实汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    pub total_rows: usize,
    pub exact: usize,
    pub prefix: usize,
    pub normalized_exact: usize,
    pub normalized_prefix: usize,
    pub fallback_existing: usize, // 未解析但沿用原部门
    pub not_determined: usize,    // 最终部门为 N/D
    pub nd_ratio: f64,
    pub quality_warning: bool, // nd_ratio 超过阈值
}

impl EnrichmentSummary {
    pub fn resolved(&self) -> usize {
        self.exact + self.prefix + self.normalized_exact + self.normalized_prefix
    }
}

// ==========================================
// EnrichmentReport - 充实批次报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub batch_id: String,
    pub created_at: DateTime<Utc>,
    pub org_chart: OrgChartBuildStats,
    pub summary: EnrichmentSummary,
    pub violations: Vec<DqViolation>,
    pub config_snapshot: Option<String>, // 生成报告时的配置快照（JSON）
}

impl EnrichmentReport {
    pub fn count_level(&self, level: DqLevel) -> usize {
        self.violations.iter().filter(|v| v.level == level).count()
    }
}

// ==========================================
// EnrichmentResult - 导入管道返回值
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub records: Vec<PersonRecord>,
    pub report: EnrichmentReport,
    pub elapsed_ms: u64,
}
