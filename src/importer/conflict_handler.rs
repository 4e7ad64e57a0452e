// ==========================================
// 奖助学金管理看板 - 冲突处理器实现
// ==========================================
// 职责: 检测花名册内重复工号（首次出现保留，后续标记）
// 说明: 充实仍处理所有行，冲突仅进入 DQ 报告
// ==========================================

use crate::domain::person::PersonRecord;
use crate::importer::roster_importer_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashSet;

pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    fn detect_duplicates(&self, records: &[PersonRecord]) -> Vec<(usize, String)> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates = Vec::new();

        for record in records {
            let Some(matricula) = record.matricula.as_deref() else {
                continue;
            };
            if matricula.is_empty() {
                continue;
            }
            if !seen.insert(matricula) {
                duplicates.push((record.row_number, matricula.to_string()));
            }
        }

        duplicates
    }
}
