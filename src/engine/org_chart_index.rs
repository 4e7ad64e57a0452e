// ==========================================
// 奖助学金管理看板 - 组织架构索引
// ==========================================
// 输入: 组织架构原始行（按列位置读取，不依赖表头）
//   列 0 = 本地代码, 列 1 = 备用部门, 列 2 = 主部门,
//   列 3 = 一级主管, 列 6 = 二级主管（可能不存在）
// 输出: 按代码长度降序排列的索引（前缀匹配依赖此顺序）
// 生命周期: 每次充实重建，构建后不可变
// ==========================================

use crate::domain::org_chart::{OrgChartBuildStats, OrgChartEntry};
use crate::domain::types::{is_nan_like, NOT_APPLICABLE};
use std::collections::HashMap;
use tracing::{debug, warn};

const COL_CODE: usize = 0;
const COL_DEPARTMENT_FALLBACK: usize = 1;
const COL_DEPARTMENT: usize = 2;
const COL_MANAGER_TIER1: usize = 3;
const COL_MANAGER_TIER2: usize = 6;

// ==========================================
// OrgChartIndex
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct OrgChartIndex {
    entries: Vec<OrgChartEntry>,     // 代码长度降序（同长度保持首次出现顺序）
    by_code: HashMap<String, usize>, // 代码 → entries 下标
    stats: OrgChartBuildStats,
}

impl OrgChartIndex {
    /// 由原始行构建索引
    ///
    /// # 规则
    /// - 代码仅 TRIM，保持原样
    /// - 部门 = 列 2（非空且非 nan），否则列 1；TRIM + UPPER
    /// - 代码或部门为空/nan 的行丢弃
    /// - 重复代码: 后出现者覆盖内容，位置保持首次出现
    pub fn build<R, S>(raw_rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut entries: Vec<OrgChartEntry> = Vec::new();
        let mut by_code: HashMap<String, usize> = HashMap::new();
        let mut stats = OrgChartBuildStats {
            rows_read: raw_rows.len(),
            ..Default::default()
        };

        for (row_idx, row) in raw_rows.iter().enumerate() {
            let row = row.as_ref();

            let Some(entry) = parse_row(row) else {
                debug!(row = row_idx + 1, "组织架构行缺少代码或部门，已丢弃");
                stats.discarded += 1;
                continue;
            };

            match by_code.get(&entry.code) {
                Some(&pos) => {
                    warn!(
                        row = row_idx + 1,
                        code = %entry.code,
                        previous = %entries[pos].department,
                        current = %entry.department,
                        "组织架构代码重复，以后出现者为准"
                    );
                    stats.duplicates_overwritten += 1;
                    entries[pos] = entry;
                }
                None => {
                    by_code.insert(entry.code.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        // 稳定排序: 长度降序，同长度保持原顺序
        entries.sort_by(|a, b| b.code.len().cmp(&a.code.len()));

        let by_code = entries
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.code.clone(), idx))
            .collect();
        stats.indexed = entries.len();

        debug!(
            rows_read = stats.rows_read,
            indexed = stats.indexed,
            discarded = stats.discarded,
            duplicates = stats.duplicates_overwritten,
            "组织架构索引构建完成"
        );

        Self {
            entries,
            by_code,
            stats,
        }
    }

    /// 空索引
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 精确查找
    pub fn get(&self, code: &str) -> Option<&OrgChartEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    /// 按匹配顺序（长度降序）遍历
    pub fn iter(&self) -> impl Iterator<Item = &OrgChartEntry> {
        self.entries.iter()
    }

    /// 前缀扫描: 第一个（即最长的）为查询代码前缀的条目
    pub fn longest_prefix_of(&self, code: &str) -> Option<&OrgChartEntry> {
        self.entries.iter().find(|e| code.starts_with(e.code.as_str()))
    }

    pub fn stats(&self) -> &OrgChartBuildStats {
        &self.stats
    }
}

/// 解析单行；代码或部门缺失返回 None
fn parse_row<S: AsRef<str>>(row: &[S]) -> Option<OrgChartEntry> {
    let code = cell(row, COL_CODE)?;
    if is_nan_like(code) {
        return None;
    }

    let department = cell(row, COL_DEPARTMENT)
        .filter(|v| !is_nan_like(v))
        .or_else(|| cell(row, COL_DEPARTMENT_FALLBACK))
        .filter(|v| !is_nan_like(v))?;

    Some(OrgChartEntry {
        code: code.to_string(),
        department: department.to_uppercase(),
        manager_tier1: manager_cell(row, COL_MANAGER_TIER1),
        manager_tier2: manager_cell(row, COL_MANAGER_TIER2),
    })
}

fn cell<S: AsRef<str>>(row: &[S], idx: usize) -> Option<&str> {
    row.get(idx).map(|v| v.as_ref().trim())
}

fn manager_cell<S: AsRef<str>>(row: &[S], idx: usize) -> String {
    cell(row, idx)
        .filter(|v| !is_nan_like(v))
        .unwrap_or(NOT_APPLICABLE)
        .to_string()
}
