// ==========================================
// 奖助学金管理看板 - 花名册充实引擎
// ==========================================
// 输入: 花名册 + 组织架构索引
// 输出: 新的花名册副本（不修改输入）
// 部门优先级: 组织架构解析结果 > 原有部门（非占位）> "N/D"
// 红线: 单条记录异常不中断批次，按"无代码"处理
// ==========================================

use crate::domain::org_chart::Resolution;
use crate::domain::person::PersonRecord;
use crate::domain::report::EnrichmentSummary;
use crate::domain::types::{is_absent_department, MatchKind, NOT_DETERMINED};
use crate::engine::org_chart_index::OrgChartIndex;
use crate::engine::resolver::OrgResolver;
use tracing::{debug, info, warn};

/// 默认 N/D 比例告警阈值
pub const DEFAULT_ND_WARNING_RATIO: f64 = 0.15;

// ==========================================
// EnrichmentOutcome - 充实结果
// ==========================================
#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    pub records: Vec<PersonRecord>,
    pub match_kinds: Vec<MatchKind>, // 与 records 一一对应
    pub summary: EnrichmentSummary,
}

// ==========================================
// Enricher
// ==========================================
pub struct Enricher {
    nd_warning_ratio: f64,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(DEFAULT_ND_WARNING_RATIO)
    }
}

impl Enricher {
    pub fn new(nd_warning_ratio: f64) -> Self {
        Self { nd_warning_ratio }
    }

    /// 充实花名册
    ///
    /// # 流程
    /// 1. 花名册或索引为空 → 原样返回（非错误）
    /// 2. 原有部门占位文本（N/D / N/A / None / nan / 空）视为缺失
    /// 3. 逐条解析本地代码（同一代码只解析一次）
    /// 4. 最终部门 = 解析部门 | 原有部门 | "N/D"，TRIM + UPPER
    pub fn enrich(&self, roster: &[PersonRecord], index: &OrgChartIndex) -> EnrichmentOutcome {
        if roster.is_empty() || index.is_empty() {
            debug!(
                roster = roster.len(),
                index = index.len(),
                "花名册或组织架构为空，跳过充实"
            );
            return self.passthrough(roster);
        }

        let mut resolver = OrgResolver::new(index);
        let mut records = Vec::with_capacity(roster.len());
        let mut match_kinds = Vec::with_capacity(roster.len());
        let mut summary = EnrichmentSummary {
            total_rows: roster.len(),
            ..Default::default()
        };

        for record in roster {
            let resolution = resolver.resolve(record.local_code.as_deref());
            let existing = existing_department(record.department.as_deref());

            match resolution.match_kind {
                MatchKind::Exact => summary.exact += 1,
                MatchKind::Prefix => summary.prefix += 1,
                MatchKind::NormalizedExact => summary.normalized_exact += 1,
                MatchKind::NormalizedPrefix => summary.normalized_prefix += 1,
                MatchKind::Unresolved if existing.is_some() => summary.fallback_existing += 1,
                MatchKind::Unresolved => {}
            }

            let enriched = apply_resolution(record, &resolution, existing);
            if is_absent_department(enriched.department_or_nd()) {
                summary.not_determined += 1;
            }

            match_kinds.push(resolution.match_kind);
            records.push(enriched);
        }

        self.finish_summary(&mut summary);

        info!(
            total = summary.total_rows,
            resolved = summary.resolved(),
            fallback = summary.fallback_existing,
            not_determined = summary.not_determined,
            distinct_codes = resolver.distinct_codes(),
            cache_hits = resolver.cache_hits(),
            "花名册充实完成"
        );

        EnrichmentOutcome {
            records,
            match_kinds,
            summary,
        }
    }

    /// 空输入时原样返回，仅统计缺部门的记录
    fn passthrough(&self, roster: &[PersonRecord]) -> EnrichmentOutcome {
        let mut summary = EnrichmentSummary {
            total_rows: roster.len(),
            ..Default::default()
        };
        summary.not_determined = roster
            .iter()
            .filter(|r| is_absent_department(r.department_or_nd()))
            .count();
        self.finish_summary(&mut summary);

        EnrichmentOutcome {
            records: roster.to_vec(),
            match_kinds: vec![MatchKind::Unresolved; roster.len()],
            summary,
        }
    }

    fn finish_summary(&self, summary: &mut EnrichmentSummary) {
        summary.nd_ratio = if summary.total_rows == 0 {
            0.0
        } else {
            summary.not_determined as f64 / summary.total_rows as f64
        };
        summary.quality_warning = summary.nd_ratio > self.nd_warning_ratio;

        if summary.quality_warning {
            warn!(
                not_determined = summary.not_determined,
                total = summary.total_rows,
                ratio = %format!("{:.1}%", summary.nd_ratio * 100.0),
                "N/D 部门比例过高，需人工核查组织架构或本地代码"
            );
        }
    }
}

/// 便捷函数: 默认阈值充实，仅返回记录
pub fn enrich(roster: &[PersonRecord], index: &OrgChartIndex) -> Vec<PersonRecord> {
    Enricher::default().enrich(roster, index).records
}

/// 原有部门，占位文本视为缺失
fn existing_department(department: Option<&str>) -> Option<String> {
    department
        .filter(|d| !is_absent_department(d))
        .map(|d| d.trim().to_uppercase())
}

fn apply_resolution(
    record: &PersonRecord,
    resolution: &Resolution,
    existing: Option<String>,
) -> PersonRecord {
    let department = if resolution.is_resolved() {
        resolution.department.clone()
    } else {
        existing.unwrap_or_else(|| NOT_DETERMINED.to_string())
    };

    PersonRecord {
        department: Some(finalize_department(&department)),
        resolved_department: Some(resolution.department.clone()),
        manager_tier1: Some(resolution.manager_tier1.clone()),
        manager_tier2: Some(resolution.manager_tier2.clone()),
        ..record.clone()
    }
}

/// TRIM + UPPER，残留占位文本统一为 "N/D"
fn finalize_department(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    match upper.as_str() {
        "" | "NAN" | "NONE" => NOT_DETERMINED.to_string(),
        _ => upper,
    }
}
