// ==========================================
// 奖助学金管理看板 - 核心库
// ==========================================
// 核心: 本地代码 → 组织架构（部门 + 两级主管）解析
// 外围: 数据源加载、花名册充实、DQ 报告、CSV 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 索引构建 / 代码解析 / 花名册充实
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（配置存储）
pub mod db;

// 导出
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MatchKind, NOT_APPLICABLE, NOT_DETERMINED};

// 领域实体
pub use domain::{
    DqLevel, DqViolation, EnrichmentReport, EnrichmentResult, EnrichmentSummary,
    OrgChartEntry, PersonRecord, Resolution,
};

// 引擎
pub use engine::{enrich, resolve, Enricher, OrgChartIndex, OrgResolver};

// 导入
pub use importer::{DataSource, RosterImporter, RosterImporterImpl};

// 配置
pub use config::{ConfigManager, EnrichmentConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "奖助学金管理看板";
