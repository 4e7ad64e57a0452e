// ==========================================
// 奖助学金管理看板 - 数据质量校验器实现
// ==========================================
// 职责: 工号校验 / 充实结果校验 / 报告生成
// 级别: Error=缺工号 Warning=部门 N/D Info=无代码 Conflict=重复工号
// ==========================================

use crate::domain::org_chart::OrgChartBuildStats;
use crate::domain::person::PersonRecord;
use crate::domain::report::{DqLevel, DqViolation, EnrichmentReport, EnrichmentSummary};
use crate::domain::types::{is_absent_department, is_invalid_local_code, MatchKind};
use crate::importer::roster_importer_trait::DqValidator as DqValidatorTrait;
use chrono::Utc;

pub struct DqValidator;

impl DqValidatorTrait for DqValidator {
    fn validate_primary_key(&self, records: &[PersonRecord]) -> Vec<DqViolation> {
        records
            .iter()
            .filter(|r| r.matricula.as_deref().map_or(true, |m| m.trim().is_empty()))
            .map(|r| DqViolation {
                row_number: r.row_number,
                matricula: None,
                level: DqLevel::Error,
                field: "matricula".to_string(),
                message: "工号缺失".to_string(),
            })
            .collect()
    }

    fn validate_enriched(
        &self,
        records: &[PersonRecord],
        match_kinds: &[MatchKind],
    ) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let code = record.local_code.as_deref().unwrap_or("");
            if is_invalid_local_code(code) {
                violations.push(DqViolation {
                    row_number: record.row_number,
                    matricula: record.matricula.clone(),
                    level: DqLevel::Info,
                    field: "cod_local".to_string(),
                    message: format!("无有效本地代码: '{}'", code.trim()),
                });
            }

            // 与充实汇总的 not_determined 口径一致
            if is_absent_department(record.department_or_nd()) {
                let kind = match_kinds.get(idx).copied().unwrap_or(MatchKind::Unresolved);
                violations.push(DqViolation {
                    row_number: record.row_number,
                    matricula: record.matricula.clone(),
                    level: DqLevel::Warning,
                    field: "diretoria".to_string(),
                    message: format!("部门无法确定 (匹配方式: {})", kind),
                });
            }
        }

        violations
    }

    fn generate_report(
        &self,
        batch_id: String,
        org_chart: OrgChartBuildStats,
        summary: EnrichmentSummary,
        mut violations: Vec<DqViolation>,
        config_snapshot: Option<String>,
    ) -> EnrichmentReport {
        // 按行号排序，同行按级别顺序
        violations.sort_by_key(|v| (v.row_number, level_rank(v.level)));

        EnrichmentReport {
            batch_id,
            created_at: Utc::now(),
            org_chart,
            summary,
            violations,
            config_snapshot,
        }
    }
}

fn level_rank(level: DqLevel) -> u8 {
    match level {
        DqLevel::Error => 0,
        DqLevel::Conflict => 1,
        DqLevel::Warning => 2,
        DqLevel::Info => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(matricula: Option<&str>, code: Option<&str>, dept: &str, row: usize) -> PersonRecord {
        PersonRecord {
            matricula: matricula.map(|m| m.to_string()),
            local_code: code.map(|c| c.to_string()),
            department: Some(dept.to_string()),
            row_number: row,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_matricula_is_error() {
        let records = vec![
            record(Some("1"), Some("1.2"), "HR", 2),
            record(None, Some("1.2"), "HR", 3),
            record(Some("  "), Some("1.2"), "HR", 4),
        ];

        let violations = DqValidator.validate_primary_key(&records);

        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.level == DqLevel::Error));
        assert_eq!(violations[0].row_number, 3);
    }

    #[test]
    fn test_enriched_violations() {
        let records = vec![
            record(Some("1"), Some("SEM CODIGO LOCAL"), "N/D", 2),
            record(Some("2"), Some("9.9"), "N/D", 3),
            record(Some("3"), Some("1.2"), "HR", 4),
            record(Some("4"), None, "FIN", 5),
        ];
        let kinds = vec![
            MatchKind::Unresolved,
            MatchKind::Unresolved,
            MatchKind::Prefix,
            MatchKind::Unresolved,
        ];

        let violations = DqValidator.validate_enriched(&records, &kinds);

        let infos: Vec<_> = violations
            .iter()
            .filter(|v| v.level == DqLevel::Info)
            .map(|v| v.row_number)
            .collect();
        let warnings: Vec<_> = violations
            .iter()
            .filter(|v| v.level == DqLevel::Warning)
            .map(|v| v.row_number)
            .collect();
        assert_eq!(infos, vec![2, 5]);
        assert_eq!(warnings, vec![2, 3]);
    }

    #[test]
    fn test_absent_department_is_warning_without_enrichment() {
        let mut missing = record(Some("1"), Some("1.2"), "", 2);
        missing.department = None;
        let records = vec![
            missing,
            record(Some("2"), Some("1.2"), "N/A", 3),
            record(Some("3"), Some("1.2"), "nan", 4),
            record(Some("4"), Some("1.2"), "Marketing", 5),
        ];
        let kinds = vec![MatchKind::Unresolved; records.len()];

        let violations = DqValidator.validate_enriched(&records, &kinds);

        let warnings: Vec<_> = violations
            .iter()
            .filter(|v| v.level == DqLevel::Warning)
            .map(|v| v.row_number)
            .collect();
        assert_eq!(warnings, vec![2, 3, 4]);
    }

    #[test]
    fn test_report_sorted_by_row() {
        let violations = vec![
            DqViolation {
                row_number: 5,
                matricula: None,
                level: DqLevel::Info,
                field: "cod_local".to_string(),
                message: String::new(),
            },
            DqViolation {
                row_number: 2,
                matricula: None,
                level: DqLevel::Error,
                field: "matricula".to_string(),
                message: String::new(),
            },
        ];

        let report = DqValidator.generate_report(
            "b1".to_string(),
            OrgChartBuildStats::default(),
            EnrichmentSummary::default(),
            violations,
            None,
        );

        assert_eq!(report.violations[0].row_number, 2);
        assert_eq!(report.count_level(DqLevel::Error), 1);
        assert_eq!(report.batch_id, "b1");
    }
}
