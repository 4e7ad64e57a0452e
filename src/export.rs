// ==========================================
// 奖助学金管理看板 - 充实结果导出
// ==========================================
// 格式: CSV（规范列在前，其余列按名称排序追加）
// ==========================================

use crate::domain::person::PersonRecord;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 规范列（顺序固定）
pub const CANONICAL_COLUMNS: &[&str] = &[
    "matricula",
    "nome",
    "cod_local",
    "diretoria",
    "gestor_n3",
    "gestor_n4",
];

/// 写出充实后的花名册
pub fn write_enriched_csv<W: Write>(writer: W, records: &[PersonRecord]) -> ImportResult<()> {
    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.extra.keys().map(String::as_str))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);

    let header = CANONICAL_COLUMNS
        .iter()
        .copied()
        .chain(extra_columns.iter().copied());
    csv_writer.write_record(header).map_err(export_error)?;

    for record in records {
        let canonical = [
            record.matricula.as_deref().unwrap_or(""),
            record.nome.as_deref().unwrap_or(""),
            record.local_code.as_deref().unwrap_or(""),
            record.department.as_deref().unwrap_or(""),
            record.manager_tier1.as_deref().unwrap_or(""),
            record.manager_tier2.as_deref().unwrap_or(""),
        ];
        let extras = extra_columns
            .iter()
            .map(|col| record.extra.get(*col).map(String::as_str).unwrap_or(""));

        csv_writer
            .write_record(canonical.into_iter().chain(extras))
            .map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| ImportError::ExportError(e.to_string()))?;
    Ok(())
}

/// 写出到文件
pub fn write_enriched_csv_file(path: &Path, records: &[PersonRecord]) -> ImportResult<()> {
    let file = std::fs::File::create(path)
        .map_err(|e| ImportError::ExportError(format!("{}: {}", path.display(), e)))?;
    write_enriched_csv(file, records)?;
    info!(file = %path.display(), rows = records.len(), "充实结果已导出");
    Ok(())
}

fn export_error(err: csv::Error) -> ImportError {
    ImportError::ExportError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_enriched_csv() {
        let mut first = PersonRecord::new("10", Some("1.2.04"), Some("FINANCEIRA"));
        first.nome = Some("ANA".to_string());
        first.manager_tier1 = Some("Carla".to_string());
        first.manager_tier2 = Some("N/A".to_string());
        first.extra.insert("curso".to_string(), "MBA".to_string());

        let mut second = PersonRecord::new("11", None, Some("N/D"));
        second.extra.insert("cpf".to_string(), "123".to_string());

        let mut buffer = Vec::new();
        write_enriched_csv(&mut buffer, &[first, second]).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "matricula,nome,cod_local,diretoria,gestor_n3,gestor_n4,cpf,curso"
        );
        assert_eq!(lines[1], "10,ANA,1.2.04,FINANCEIRA,Carla,N/A,,MBA");
        assert_eq!(lines[2], "11,,,N/D,,,123,");
    }

    #[test]
    fn test_write_empty_roster_writes_header_only() {
        let mut buffer = Vec::new();
        write_enriched_csv(&mut buffer, &[]).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 1);
    }
}
