// ==========================================
// 奖助学金管理看板 - 充实配置读取 Trait
// ==========================================
// 职责: 定义导入/充实流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// EnrichmentConfigReader Trait
// ==========================================
// 用途: 导入管道读取数据源与质量阈值
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait EnrichmentConfigReader: Send + Sync {
    // ===== 数据质量配置 =====

    /// N/D 部门比例告警阈值
    ///
    /// # 默认值
    /// - 0.15
    ///
    /// # 用途
    /// - 超过阈值时报告 quality_warning，不阻断结果
    async fn get_nd_warning_ratio(&self) -> Result<f64, Box<dyn Error + Send + Sync>>;

    // ===== 数据源配置 =====

    /// 组织架构本地文件路径
    ///
    /// # 默认值
    /// - BASES.BOLSAS/ORGANOGRAMA.xlsx
    async fn get_org_chart_local_path(&self) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// 花名册本地文件路径
    ///
    /// # 默认值
    /// - BASES.BOLSAS/BASE.BOLSAS.2025.xlsx
    async fn get_roster_local_path(&self) -> Result<String, Box<dyn Error + Send + Sync>>;

    /// 组织架构远程表格 URL（Google Sheets），未配置返回 None
    async fn get_org_chart_remote_url(
        &self,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>>;

    /// 花名册远程表格 URL（Google Sheets），未配置返回 None
    async fn get_roster_remote_url(&self) -> Result<Option<String>, Box<dyn Error + Send + Sync>>;

    /// 远程读取超时（秒）
    ///
    /// # 默认值
    /// - 15
    async fn get_remote_timeout_secs(&self) -> Result<u64, Box<dyn Error + Send + Sync>>;

    // ===== 报告 =====

    /// 当前配置快照（JSON），写入充实报告；默认不提供
    async fn get_config_snapshot(&self) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        Ok(None)
    }
}
