// ==========================================
// 奖助学金管理看板 - 花名册领域模型
// ==========================================
// 用途: 导入层写入，充实引擎读取并返回新副本
// 字段命名: 对齐规范列名（matricula / nome / cod_local / diretoria）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PersonRecord - 花名册行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    // ===== 标识 =====
    pub matricula: Option<String>, // 工号
    pub nome: Option<String>,      // 姓名（UPPER）

    // ===== 组织信息 =====
    pub local_code: Option<String>, // 本地代码（原始值）
    pub department: Option<String>, // 部门（充实前可能为占位文本）

    // ===== 充实派生字段 =====
    pub resolved_department: Option<String>, // 组织架构解析出的部门
    pub manager_tier1: Option<String>,       // Gestor N3
    pub manager_tier2: Option<String>,       // Gestor N4

    // ===== 其他规范列（curso / instituicao / situacao ...）=====
    pub extra: BTreeMap<String, String>,

    // ===== 元信息 =====
    pub row_number: usize, // 原始文件行号（用于 DQ 报告）
}

impl PersonRecord {
    pub fn new(matricula: &str, local_code: Option<&str>, department: Option<&str>) -> Self {
        Self {
            matricula: Some(matricula.to_string()),
            local_code: local_code.map(|s| s.to_string()),
            department: department.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    /// 部门取值，缺失时返回 "N/D"
    pub fn department_or_nd(&self) -> &str {
        self.department
            .as_deref()
            .unwrap_or(crate::domain::types::NOT_DETERMINED)
    }
}
