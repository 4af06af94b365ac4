//! 批量导入用户的 CSV 解析
//!
//! 列顺序固定为 `username,email[,firstName,lastName]`，首行表头可选。
//! 空行跳过；每一行独立校验，出错的行记录行号（从 1 开始）后继续解析。

use std::collections::HashSet;

use felix_shared::protocol::CreateUserRequest;

use crate::forms::UserDraft;

const MAX_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLineError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkParse {
    pub users: Vec<CreateUserRequest>,
    pub errors: Vec<CsvLineError>,
}

impl BulkParse {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// 拆分一行，支持双引号包裹的字段与 `""` 转义
fn split_row(line: &str) -> Result<Vec<String>, String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                cell.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if cell.trim().is_empty() => {
                cell.clear();
                in_quotes = true;
            }
            (',', false) => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    cells.push(cell.trim().to_string());
    Ok(cells)
}

fn is_header(cells: &[String]) -> bool {
    cells.len() >= 2
        && cells[0].eq_ignore_ascii_case("username")
        && cells[1].eq_ignore_ascii_case("email")
}

pub fn parse_user_csv(text: &str) -> BulkParse {
    let mut result = BulkParse::default();
    let mut seen = HashSet::new();
    let mut first_row = true;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let raw = raw.trim_start_matches('\u{feff}');
        if raw.trim().is_empty() {
            continue;
        }

        let mut fail = |message: String| result.errors.push(CsvLineError { line, message });

        let cells = match split_row(raw) {
            Ok(cells) => cells,
            Err(message) => {
                fail(message);
                first_row = false;
                continue;
            }
        };

        if std::mem::take(&mut first_row) && is_header(&cells) {
            continue;
        }

        if cells.len() < 2 || cells.len() > MAX_COLUMNS {
            fail(format!(
                "expected 2 to {MAX_COLUMNS} columns, found {}",
                cells.len()
            ));
            continue;
        }

        let mut cells = cells.into_iter();
        let draft = UserDraft {
            username: cells.next().unwrap_or_default(),
            email: cells.next().unwrap_or_default(),
            first_name: cells.next().unwrap_or_default(),
            last_name: cells.next().unwrap_or_default(),
        };

        match draft.into_request() {
            Ok(user) => {
                if seen.insert(user.email.to_lowercase()) {
                    result.users.push(user);
                } else {
                    fail(format!("duplicate email {}", user.email));
                }
            }
            Err(e) => fail(e.to_string()),
        }
    }

    tracing::debug!(
        users = result.users.len(),
        errors = result.errors.len(),
        "parsed bulk user csv"
    );
    result
}
