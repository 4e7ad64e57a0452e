// ==========================================
// 奖助学金管理看板 - 配置层
// ==========================================
// 职责: 数据源与数据质量阈值配置
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod enrichment_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, defaults, ConfigManager};
pub use enrichment_config_trait::EnrichmentConfigReader;
