// ==========================================
// 奖助学金管理看板 - 数据清洗器实现
// ==========================================
// 职责: TRIM / UPPER / NULL 标准化
// 说明: 占位部门（N/A 等）保留原样，由充实引擎判定
// ==========================================

use crate::domain::person::PersonRecord;
use crate::domain::types::is_nan_like;
use crate::importer::roster_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            if is_nan_like(&v) {
                None
            } else {
                Some(v.trim().to_string())
            }
        })
    }

    fn clean_person(&self, record: &mut PersonRecord) {
        record.matricula = self.normalize_null(record.matricula.take());
        record.nome = self
            .normalize_null(record.nome.take())
            .map(|n| self.clean_text(&n, true));
        record.local_code = self.normalize_null(record.local_code.take());
        record.department = record
            .department
            .take()
            .map(|d| self.clean_text(&d, false))
            .filter(|d| !d.is_empty());

        record.extra.retain(|_, v| !is_nan_like(v));
        for value in record.extra.values_mut() {
            *value = value.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  rh  ", true), "RH");
        assert_eq!(cleaner.clean_text("  rh  ", false), "rh");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("   ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("nan".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("None".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some(" 1.2 ".to_string())),
            Some("1.2".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_clean_person_keeps_placeholder_department() {
        let cleaner = DataCleaner;
        let mut record = PersonRecord::new(" 10 ", Some("nan"), Some(" N/A "));
        record.nome = Some(" ana ".to_string());
        record.extra.insert("curso".to_string(), "nan".to_string());
        record.extra.insert("tipo".to_string(), " MBA ".to_string());

        cleaner.clean_person(&mut record);

        assert_eq!(record.matricula.as_deref(), Some("10"));
        assert_eq!(record.nome.as_deref(), Some("ANA"));
        assert_eq!(record.local_code, None);
        assert_eq!(record.department.as_deref(), Some("N/A"));
        assert!(!record.extra.contains_key("curso"));
        assert_eq!(record.extra.get("tipo").map(String::as_str), Some("MBA"));
    }
}
