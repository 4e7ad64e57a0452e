// ==========================================
// 奖助学金管理看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、哨兵值
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod org_chart;
pub mod person;
pub mod report;
pub mod types;

// 重导出核心类型
pub use org_chart::{OrgChartBuildStats, OrgChartEntry, Resolution};
pub use person::PersonRecord;
pub use report::{DqLevel, DqViolation, EnrichmentReport, EnrichmentResult, EnrichmentSummary};
pub use types::{MatchKind, NOT_APPLICABLE, NOT_DETERMINED};
