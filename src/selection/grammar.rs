//! 页码选择语法 - 能力层
//!
//! 解析和校验形如 `19-20, 21, 22-25` 的页码选择表达式。
//!
//! ## 语法
//! - 逗号分隔的若干项，每项为单个页码 `n` 或闭区间 `a-b`
//! - 页码从 1 开始，且不能超过文档页数
//! - 允许重复页码和区间重叠（例如同一页插入两次）
//! - 项两端的空白会被忽略，多余的逗号会被忽略
//! - 项内部不允许出现空白（`1 - 4` 非法），前导零按十进制解析（`03` 即第 3 页）
//!
//! 校验是"全有或全无"的：任意一项非法，整个表达式非法。

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// 单项匹配规则：纯数字，或两个数字用一个连字符相连
///
/// 使用 `[0-9]` 而不是 `\d`，避免匹配到非 ASCII 数字
fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]+)(?:-([0-9]+))?$").expect("页码项正则表达式应当合法")
    })
}

/// 选择表达式非法的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// 表达式为空，或只包含逗号和空白
    #[error("页码选择为空")]
    Empty,
    /// 某一项不符合 `n` 或 `a-b` 的格式
    #[error("无法识别的页码项: '{term}'")]
    MalformedTerm { term: String },
    /// 某一项的页码小于 1 或大于文档页数
    #[error("页码项 '{term}' 超出范围 [1, {page_count}]")]
    PageOutOfRange { term: String, page_count: u32 },
    /// 区间起点大于终点
    #[error("页码区间 '{term}' 起点大于终点")]
    DescendingRange { term: String },
}

/// 闭区间页码范围（从 1 开始）
///
/// 只能由 [`SelectionGrammar::parse`] 构造，保证 `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// 区间包含的页数
    pub fn page_span(&self) -> usize {
        self.end.saturating_sub(self.start) as usize + 1
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// 解析后的页码选择，按书写顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<PageRange>,
}

impl Selection {
    pub fn ranges(&self) -> &[PageRange] {
        &self.ranges
    }

    /// 该选择在输出文档中贡献的总页数（重复页按次数计）
    pub fn page_total(&self) -> usize {
        self.ranges.iter().map(PageRange::page_span).sum()
    }

    /// 展开为逐页序列
    pub fn pages(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|r| r.start..=r.end)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self.ranges.iter().map(ToString::to_string).collect();
        write!(f, "{}", terms.join(","))
    }
}

/// 页码选择语法
///
/// 无状态，所有方法都是纯函数
pub struct SelectionGrammar;

impl SelectionGrammar {
    /// 解析选择表达式
    ///
    /// # 参数
    /// - `expression`: 用户输入的选择表达式
    /// - `page_count`: 文档页数
    ///
    /// # 返回
    /// 返回按书写顺序排列的区间列表，或第一个非法原因
    pub fn parse(expression: &str, page_count: u32) -> Result<Selection, SelectionError> {
        if expression.trim().is_empty() {
            return Err(SelectionError::Empty);
        }

        let mut ranges = Vec::new();
        for term in expression.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            ranges.push(Self::parse_term(term, page_count)?);
        }

        if ranges.is_empty() {
            return Err(SelectionError::Empty);
        }

        Ok(Selection { ranges })
    }

    /// 校验选择表达式是否合法
    pub fn validate(expression: &str, page_count: u32) -> bool {
        Self::parse(expression, page_count).is_ok()
    }

    /// 新上传文档的默认选择：全部页
    pub fn default_for(page_count: u32) -> String {
        format!("1-{}", page_count)
    }

    fn parse_term(term: &str, page_count: u32) -> Result<PageRange, SelectionError> {
        let captures = term_pattern()
            .captures(term)
            .ok_or_else(|| SelectionError::MalformedTerm {
                term: term.to_string(),
            })?;

        let out_of_range = || SelectionError::PageOutOfRange {
            term: term.to_string(),
            page_count,
        };

        // 数字过大导致溢出时，必然超出页数范围
        let start: u32 = captures[1].parse().map_err(|_| out_of_range())?;
        let end: u32 = match captures.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| out_of_range())?,
            None => start,
        };

        if start < 1 || end < 1 || start > page_count || end > page_count {
            return Err(out_of_range());
        }
        if start > end {
            return Err(SelectionError::DescendingRange {
                term: term.to_string(),
            });
        }

        Ok(PageRange { start, end })
    }
}
