// ==========================================
// 奖助学金管理看板 - 字段映射器实现
// ==========================================
// 职责: 花名册表头别名 → 规范字段
// 规则: 表头先 TRIM + UPPER；同一规范字段取第一个非空别名列
// ==========================================

use crate::domain::person::PersonRecord;
use crate::importer::roster_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::BTreeMap;

// 规范字段名
pub const FIELD_MATRICULA: &str = "matricula";
pub const FIELD_NOME: &str = "nome";
pub const FIELD_DIRETORIA: &str = "diretoria";
pub const FIELD_COD_LOCAL: &str = "cod_local";

/// 表头别名表（UPPER 后比较），同一字段内按优先级排列
pub const HEADER_ALIASES: &[(&str, &[&str])] = &[
    (
        FIELD_MATRICULA,
        &["MATRÍCULA", "MATRICULA", "MATR", "ID", "RE", "REGISTRO"],
    ),
    (
        FIELD_NOME,
        &["NOME", "COLABORADOR", "NOMES", "FUNCIONARIO", "BOLSISTA"],
    ),
    ("cpf", &["CPF"]),
    (
        FIELD_DIRETORIA,
        &["DIRETORIA", "AREA", "DEPARTAMENTO", "DEPTO"],
    ),
    (
        FIELD_COD_LOCAL,
        &[
            "COD. LOCAL",
            "COD LOCAL",
            "CODIGO LOCAL",
            "CÓDIGO LOCAL",
            "CENTRO DE CUSTO",
            "CC",
            "CR",
            "COD_LOCAL",
        ],
    ),
    ("curso", &["CURSO"]),
    (
        "instituicao",
        &[
            "INSTITUIÇÃO",
            "INSTITUICAO",
            "INSTITUIO",
            "FACULDADE",
            "UNIVERSIDADE",
        ],
    ),
    ("tipo", &["TIPO", "NIVEL"]),
    ("modalidade", &["MODALIDADE"]),
    (
        "inicio_curso",
        &[
            "INÍCIO CURSO",
            "INICIO CURSO",
            "INICIO DO CURSO",
            "INÍCIO DO CURSO",
            "DATA INICIO",
            "DATA INÍCIO",
            "INICIO",
        ],
    ),
    (
        "fim_curso",
        &[
            "FIM CURSO",
            "TERMINO DO CURSO",
            "TÉRMINO DO CURSO",
            "FIM DO CURSO",
            "DATA FIM",
            "DATA TERMINO",
            "FIM",
        ],
    ),
    (
        "ano_referencia",
        &[
            "ANO PROGRAMA",
            "ANO",
            "ANO REFERENCIA",
            "ANO REFERÊNCIA",
            "SAFRA",
        ],
    ),
    (
        "mensalidade",
        &[
            "MENSALIDADE",
            "VALOR MENSALIDADE",
            "MENSALIDADE PREV CONTRATO",
        ],
    ),
    (
        "porcentagem",
        &["% BOLSA", "PORCENTAGEM", "%BOLSA", "%"],
    ),
    (
        "valor_reembolso",
        &["VALOR REEMBOLSO", "VALOR", "REEMBOLSO"],
    ),
    ("situacao", &["SITUAÇÃO", "SITUACAO", "STATUS"]),
    (
        "checagem",
        &["CHECAGEM", "CHECAGEM SITUACAO", "CHECAGEM SITUAÇÃO"],
    ),
];

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_person(
        &self,
        headers: &[String],
        row: &[String],
        row_number: usize,
    ) -> PersonRecord {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_uppercase()).collect();

        let mut record = PersonRecord {
            row_number,
            ..Default::default()
        };
        let mut extra = BTreeMap::new();

        for (field, aliases) in HEADER_ALIASES {
            let Some(value) = self.first_value(&normalized, row, aliases) else {
                continue;
            };

            match *field {
                FIELD_MATRICULA => record.matricula = Some(value.trim().to_string()),
                FIELD_NOME => record.nome = Some(value.to_uppercase()),
                FIELD_DIRETORIA => record.department = Some(value),
                FIELD_COD_LOCAL => record.local_code = Some(value),
                other => {
                    extra.insert(other.to_string(), value);
                }
            }
        }

        record.extra = extra;
        record
    }
}

impl FieldMapper {
    /// 按别名优先级取第一个非空值
    fn first_value(&self, headers: &[String], row: &[String], aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            headers
                .iter()
                .position(|h| h == alias)
                .and_then(|idx| row.get(idx))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        })
    }
}
