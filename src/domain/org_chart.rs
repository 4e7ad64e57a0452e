// ==========================================
// 奖助学金管理看板 - 组织架构领域模型
// ==========================================
// 用途: 组织架构索引条目 + 解析结果
// 约束: 代码保持原样（仅 TRIM），不去除 ".0" 后缀
// ==========================================

use crate::domain::types::{MatchKind, NOT_DETERMINED};
use serde::{Deserialize, Serialize};

// ==========================================
// OrgChartEntry - 组织架构条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgChartEntry {
    pub code: String,          // 本地代码（"." 分层，如 "1.2.04"）
    pub department: String,    // 部门（TRIM + UPPER）
    pub manager_tier1: String, // 一级主管（Gestor N3），缺失为 "N/A"
    pub manager_tier2: String, // 二级主管（Gestor N4），缺失为 "N/A"
}

// ==========================================
// OrgChartBuildStats - 索引构建统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgChartBuildStats {
    pub rows_read: usize,           // 原始行数
    pub indexed: usize,             // 最终索引条目数
    pub discarded: usize,           // 代码或部门为空被丢弃的行
    pub duplicates_overwritten: usize, // 重复代码（后出现者覆盖）
}

// ==========================================
// Resolution - 单个本地代码的解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub department: String,
    pub manager_tier1: String,
    pub manager_tier2: String,
    pub match_kind: MatchKind,
    pub matched_code: Option<String>, // 命中的组织架构代码
}

impl Resolution {
    /// 未解析结果: ("N/D", "N/D", "N/D")
    pub fn unresolved() -> Self {
        Self {
            department: NOT_DETERMINED.to_string(),
            manager_tier1: NOT_DETERMINED.to_string(),
            manager_tier2: NOT_DETERMINED.to_string(),
            match_kind: MatchKind::Unresolved,
            matched_code: None,
        }
    }

    pub fn from_entry(entry: &OrgChartEntry, match_kind: MatchKind) -> Self {
        Self {
            department: entry.department.clone(),
            manager_tier1: entry.manager_tier1.clone(),
            manager_tier2: entry.manager_tier2.clone(),
            match_kind,
            matched_code: Some(entry.code.clone()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.match_kind.is_resolved()
    }

    /// 三元组视图 (部门, 一级主管, 二级主管)
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.department, &self.manager_tier1, &self.manager_tier2)
    }
}
