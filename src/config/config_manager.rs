// ==========================================
// 奖助学金管理看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (scope_id + key → value)
// ==========================================

use crate::config::enrichment_config_trait::EnrichmentConfigReader;
use crate::db::{ensure_config_schema, open_sqlite_connection};
use crate::engine::DEFAULT_ND_WARNING_RATIO;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（配置表不存在时自动创建）
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;

        tracing::debug!(key = key, value = value, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有 global 配置的快照（JSON，按键排序）
    ///
    /// # 用途
    /// - 写入充实报告，便于事后追溯阈值与数据源
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// EnrichmentConfigReader Trait 实现
// ==========================================
#[async_trait]
impl EnrichmentConfigReader for ConfigManager {
    async fn get_nd_warning_ratio(&self) -> ConfigResult<f64> {
        let default = DEFAULT_ND_WARNING_RATIO.to_string();
        let value = self.get_config_or_default(config_keys::ND_WARNING_RATIO, &default)?;
        match value.parse::<f64>() {
            Ok(ratio) if (0.0..=1.0).contains(&ratio) => Ok(ratio),
            _ => {
                tracing::warn!(
                    config_key = config_keys::ND_WARNING_RATIO,
                    raw_value = %value,
                    "N/D 告警阈值格式错误，使用默认值"
                );
                Ok(DEFAULT_ND_WARNING_RATIO)
            }
        }
    }

    async fn get_org_chart_local_path(&self) -> ConfigResult<String> {
        self.get_config_or_default(
            config_keys::ORG_CHART_LOCAL_PATH,
            defaults::ORG_CHART_LOCAL_PATH,
        )
    }

    async fn get_roster_local_path(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::ROSTER_LOCAL_PATH, defaults::ROSTER_LOCAL_PATH)
    }

    async fn get_org_chart_remote_url(&self) -> ConfigResult<Option<String>> {
        self.get_global_config_value(config_keys::ORG_CHART_REMOTE_URL)
    }

    async fn get_roster_remote_url(&self) -> ConfigResult<Option<String>> {
        self.get_global_config_value(config_keys::ROSTER_REMOTE_URL)
    }

    async fn get_remote_timeout_secs(&self) -> ConfigResult<u64> {
        let value = self.get_config_or_default(config_keys::REMOTE_TIMEOUT_SECS, "15")?;
        Ok(value.parse::<u64>().unwrap_or(defaults::REMOTE_TIMEOUT_SECS))
    }

    async fn get_config_snapshot(&self) -> ConfigResult<Option<String>> {
        ConfigManager::get_config_snapshot(self).map(Some)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 数据质量
    pub const ND_WARNING_RATIO: &str = "nd_warning_ratio";

    // 数据源
    pub const ORG_CHART_LOCAL_PATH: &str = "org_chart_local_path";
    pub const ROSTER_LOCAL_PATH: &str = "roster_local_path";
    pub const ORG_CHART_REMOTE_URL: &str = "org_chart_remote_url";
    pub const ROSTER_REMOTE_URL: &str = "roster_remote_url";
    pub const REMOTE_TIMEOUT_SECS: &str = "remote_timeout_secs";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const ORG_CHART_LOCAL_PATH: &str = "BASES.BOLSAS/ORGANOGRAMA.xlsx";
    pub const ROSTER_LOCAL_PATH: &str = "BASES.BOLSAS/BASE.BOLSAS.2025.xlsx";
    pub const REMOTE_TIMEOUT_SECS: u64 = 15;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_manager() -> (NamedTempFile, ConfigManager) {
        let file = NamedTempFile::new().unwrap();
        let manager = ConfigManager::new(file.path().to_str().unwrap()).unwrap();
        (file, manager)
    }

    #[tokio::test]
    async fn test_defaults_when_table_empty() {
        let (_file, manager) = temp_manager();

        assert_eq!(
            manager.get_nd_warning_ratio().await.unwrap(),
            DEFAULT_ND_WARNING_RATIO
        );
        assert_eq!(
            manager.get_org_chart_local_path().await.unwrap(),
            defaults::ORG_CHART_LOCAL_PATH
        );
        assert_eq!(manager.get_org_chart_remote_url().await.unwrap(), None);
        assert_eq!(manager.get_remote_timeout_secs().await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_set_and_read_back() {
        let (_file, manager) = temp_manager();
        manager
            .set_global_config_value(config_keys::ND_WARNING_RATIO, "0.3")
            .unwrap();
        manager
            .set_global_config_value(config_keys::ROSTER_REMOTE_URL, "https://example.org/x")
            .unwrap();

        assert_eq!(manager.get_nd_warning_ratio().await.unwrap(), 0.3);
        assert_eq!(
            manager.get_roster_remote_url().await.unwrap().as_deref(),
            Some("https://example.org/x")
        );
    }

    #[tokio::test]
    async fn test_invalid_ratio_falls_back_to_default() {
        let (_file, manager) = temp_manager();
        manager
            .set_global_config_value(config_keys::ND_WARNING_RATIO, "1.5")
            .unwrap();
        assert_eq!(
            manager.get_nd_warning_ratio().await.unwrap(),
            DEFAULT_ND_WARNING_RATIO
        );
    }

    #[test]
    fn test_blank_value_reads_as_none() {
        let (_file, manager) = temp_manager();
        manager
            .set_global_config_value(config_keys::ORG_CHART_REMOTE_URL, "   ")
            .unwrap();
        assert_eq!(
            manager
                .get_global_config_value(config_keys::ORG_CHART_REMOTE_URL)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_config_snapshot_sorted_json() {
        let (_file, manager) = temp_manager();
        manager.set_global_config_value("b_key", "2").unwrap();
        manager.set_global_config_value("a_key", "1").unwrap();

        let snapshot = manager.get_config_snapshot().unwrap();
        assert_eq!(snapshot, r#"{"a_key":"1","b_key":"2"}"#);
    }
}
