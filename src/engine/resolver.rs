// ==========================================
// 奖助学金管理看板 - 本地代码解析器
// ==========================================
// 优先级（首个命中即返回）:
//   1) 精确匹配
//   2) 前缀匹配（索引按长度降序，最具体者胜出）
//   3) 去除首段前导零后精确匹配（"01.2.04" → "1.2.04"）
//   4) 去除首段前导零后前缀匹配
//   5) 未解析 → ("N/D", "N/D", "N/D")
// 红线: 纯函数，无隐藏状态；缓存仅限单次充实
// ==========================================

use crate::domain::org_chart::Resolution;
use crate::domain::types::{is_invalid_local_code, MatchKind};
use crate::engine::org_chart_index::OrgChartIndex;
use std::borrow::Cow;
use std::collections::HashMap;

/// 解析单个本地代码
pub fn resolve(local_code: Option<&str>, index: &OrgChartIndex) -> Resolution {
    let Some(raw) = local_code else {
        return Resolution::unresolved();
    };
    if index.is_empty() || is_invalid_local_code(raw) {
        return Resolution::unresolved();
    }

    let code = raw.trim();

    if let Some(entry) = index.get(code) {
        return Resolution::from_entry(entry, MatchKind::Exact);
    }
    if let Some(entry) = index.longest_prefix_of(code) {
        return Resolution::from_entry(entry, MatchKind::Prefix);
    }

    let normalized = strip_leading_zeros(code);
    if normalized != code {
        if let Some(entry) = index.get(&normalized) {
            return Resolution::from_entry(entry, MatchKind::NormalizedExact);
        }
        if let Some(entry) = index.longest_prefix_of(&normalized) {
            return Resolution::from_entry(entry, MatchKind::NormalizedPrefix);
        }
    }

    Resolution::unresolved()
}

/// 去除首段数字的前导零，至少保留一位数字
///
/// 等价于正则 `^0+(\d)` → `$1`:
/// - "01.2.04" → "1.2.04"
/// - "001.5" → "1.5"
/// - "00.5" → "0.5"
/// - "0.5" 保持不变
///
/// `\d` 只取 ASCII 数字；本地代码不含其他数字字符
pub fn strip_leading_zeros(code: &str) -> Cow<'_, str> {
    let zeros = code.bytes().take_while(|b| *b == b'0').count();
    if zeros == 0 {
        return Cow::Borrowed(code);
    }

    let rest = &code[zeros..];
    match rest.chars().next() {
        Some(c) if c.is_ascii_digit() => Cow::Owned(rest.to_string()),
        // 零后不是数字: 回退一个零作为保留数字
        _ if zeros >= 2 => Cow::Owned(code[zeros - 1..].to_string()),
        _ => Cow::Borrowed(code),
    }
}

// ==========================================
// OrgResolver - 带单次充实缓存的解析器
// ==========================================
// 同一代码在花名册中通常重复出现，按代码缓存结果
pub struct OrgResolver<'a> {
    index: &'a OrgChartIndex,
    cache: HashMap<String, Resolution>,
    hits: usize,
}

impl<'a> OrgResolver<'a> {
    pub fn new(index: &'a OrgChartIndex) -> Self {
        Self {
            index,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    pub fn resolve(&mut self, local_code: Option<&str>) -> Resolution {
        let Some(raw) = local_code else {
            return Resolution::unresolved();
        };
        let key = raw.trim();

        if let Some(hit) = self.cache.get(key) {
            self.hits += 1;
            return hit.clone();
        }

        let resolution = resolve(Some(key), self.index);
        self.cache.insert(key.to_string(), resolution.clone());
        resolution
    }

    /// 缓存命中次数
    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    /// 已缓存的不同代码数
    pub fn distinct_codes(&self) -> usize {
        self.cache.len()
    }
}
