// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供组织架构/花名册样例文件、Mock 配置、索引构建等功能
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use bolsas_dashboard::config::EnrichmentConfigReader;
use bolsas_dashboard::engine::OrgChartIndex;
use bolsas_dashboard::PersonRecord;
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// 组织架构样例（7 列，按位置读取）
///
/// - 2 行被丢弃（无代码 / 无部门）
/// - "1.2" 重复，后出现者覆盖
pub const ORG_CHART_LINES: &[&str] = &[
    "COD LOCAL,AREA,DIRETORIA,GESTOR N3,COL4,COL5,GESTOR N4",
    "1,,AGRICOLA,Ana,,,Bruno",
    "1.2,,INDUSTRIAL,Carla,,,Davi",
    "1.2.04,,financeira,Elisa,,,",
    "2.1,comercial,nan,Fabio,,,Gil",
    ",,ORFA,Ze,,,",
    "3.3,,,Hugo,,,",
    "1.2, ,Industrial Nova,Ines,,,Joao",
];

/// 花名册样例（按表头读取，表头为别名）
///
/// 行号（表头为第 1 行）:
/// - 2: 前缀命中 1.2.04
/// - 3: 去前导零后精确命中 1.2
/// - 4: 未解析，沿用原部门
/// - 5: 无效代码 + 占位部门 → N/D
/// - 6: 缺工号
/// - 7: 重复工号
pub const ROSTER_LINES: &[&str] = &[
    "MATRÍCULA,NOME,COD. LOCAL,DIRETORIA,CURSO",
    "100,ana lima,1.2.04.007,,MBA",
    "101,beto,01.2,,Direito",
    "102,caio,9.9,Marketing,",
    "103,dora,SEM CODIGO LOCAL,N/A,",
    ",sem matricula,2.1,,",
    "100,ana dup,1,,",
];

/// 写入临时 CSV 文件（需要保持存活）
pub fn write_csv(lines: &[&str]) -> NamedTempFile {
    write_with_suffix(lines, ".csv")
}

/// 写入指定后缀的临时文件
pub fn write_with_suffix(lines: &[&str], suffix: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write temp file");
    }
    file.flush().expect("Failed to flush temp file");
    file
}

pub fn org_chart_csv() -> NamedTempFile {
    write_csv(ORG_CHART_LINES)
}

pub fn roster_csv() -> NamedTempFile {
    write_csv(ROSTER_LINES)
}

/// 由字面量行构建索引
pub fn build_index(rows: &[&[&str]]) -> OrgChartIndex {
    let raw: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
    OrgChartIndex::build::<Vec<String>, String>(&raw)
}

/// (代码, 部门, 一级主管, 二级主管) → 7 列原始行
pub fn org_index(entries: &[(&str, &str, &str, &str)]) -> OrgChartIndex {
    let raw: Vec<Vec<String>> = entries
        .iter()
        .map(|(code, dep, m1, m2)| {
            vec![
                code.to_string(),
                String::new(),
                dep.to_string(),
                m1.to_string(),
                String::new(),
                String::new(),
                m2.to_string(),
            ]
        })
        .collect();
    OrgChartIndex::build::<Vec<String>, String>(&raw)
}

pub fn person(matricula: &str, local_code: Option<&str>, department: Option<&str>) -> PersonRecord {
    PersonRecord::new(matricula, local_code, department)
}

// ==========================================
// MockConfig - 内存配置
// ==========================================
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub nd_warning_ratio: f64,
    pub org_chart_local_path: String,
    pub roster_local_path: String,
    pub org_chart_remote_url: Option<String>,
    pub roster_remote_url: Option<String>,
    pub remote_timeout_secs: u64,
}

impl MockConfig {
    pub fn new(org_chart_local_path: &str, roster_local_path: &str) -> Self {
        Self {
            nd_warning_ratio: 0.15,
            org_chart_local_path: org_chart_local_path.to_string(),
            roster_local_path: roster_local_path.to_string(),
            org_chart_remote_url: None,
            roster_remote_url: None,
            remote_timeout_secs: 1,
        }
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.nd_warning_ratio = ratio;
        self
    }
}

#[async_trait]
impl EnrichmentConfigReader for MockConfig {
    async fn get_nd_warning_ratio(&self) -> Result<f64, Box<dyn Error + Send + Sync>> {
        Ok(self.nd_warning_ratio)
    }

    async fn get_org_chart_local_path(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(self.org_chart_local_path.clone())
    }

    async fn get_roster_local_path(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(self.roster_local_path.clone())
    }

    async fn get_org_chart_remote_url(
        &self,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        Ok(self.org_chart_remote_url.clone())
    }

    async fn get_roster_remote_url(&self) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        Ok(self.roster_remote_url.clone())
    }

    async fn get_remote_timeout_secs(&self) -> Result<u64, Box<dyn Error + Send + Sync>> {
        Ok(self.remote_timeout_secs)
    }
}
