// ==========================================
// 奖助学金管理看板 - 领域类型定义
// ==========================================
// 职责: 哨兵值、匹配方式枚举、哨兵判定函数
// 红线: 哨兵值是唯一的"未确定"信号，不抛错
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 哨兵值
// ==========================================

/// 未确定（Não Determinado）：部门/主管解析失败且无兜底
pub const NOT_DETERMINED: &str = "N/D";

/// 不适用（Não Aplicável）：组织架构表中主管列缺失
pub const NOT_APPLICABLE: &str = "N/A";

/// 视为"无代码"的本地代码取值（大小写不敏感，比较前已 TRIM + UPPER）
pub const INVALID_LOCAL_CODES: &[&str] = &[
    "SEM CODIGO LOCAL",
    "SEM CÓDIGO LOCAL",
    "N/A",
    "N/D",
    "NAN",
    "NONE",
    "",
];

/// 花名册中视为"无部门"的占位取值（大小写不敏感）
pub const ABSENT_DEPARTMENT_MARKERS: &[&str] = &["N/D", "N/A", "NONE", "NAN", ""];

/// 判断本地代码是否为无效代码标记
pub fn is_invalid_local_code(value: &str) -> bool {
    let upper = value.trim().to_uppercase();
    INVALID_LOCAL_CODES.contains(&upper.as_str())
}

/// 判断单元格是否为 "nan" 类空值（表格导出常见的 nan / None 文本）
pub fn is_nan_like(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
}

/// 判断部门取值是否为占位文本（不是真实部门）
pub fn is_absent_department(value: &str) -> bool {
    let upper = value.trim().to_uppercase();
    ABSENT_DEPARTMENT_MARKERS.contains(&upper.as_str())
}

// ==========================================
// 匹配方式 (Match Kind)
// ==========================================
// 顺序即优先级: 精确 → 前缀 → 去前导零精确 → 去前导零前缀 → 未解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchKind {
    Exact,
    Prefix,
    NormalizedExact,
    NormalizedPrefix,
    Unresolved,
}

impl MatchKind {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, MatchKind::Unresolved)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => write!(f, "EXACT"),
            MatchKind::Prefix => write!(f, "PREFIX"),
            MatchKind::NormalizedExact => write!(f, "NORMALIZED_EXACT"),
            MatchKind::NormalizedPrefix => write!(f, "NORMALIZED_PREFIX"),
            MatchKind::Unresolved => write!(f, "UNRESOLVED"),
        }
    }
}
