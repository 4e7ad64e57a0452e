// ==========================================
// 奖助学金管理看板 - 引擎层
// ==========================================
// 职责: 组织架构索引构建 / 本地代码解析 / 花名册充实
// 红线: 纯同步计算，无 I/O，无共享可变状态
// ==========================================

pub mod enricher;
pub mod org_chart_index;
pub mod resolver;

// 重导出核心引擎
pub use enricher::{enrich, EnrichmentOutcome, Enricher, DEFAULT_ND_WARNING_RATIO};
pub use org_chart_index::OrgChartIndex;
pub use resolver::{resolve, strip_leading_zeros, OrgResolver};
