//! 管線表格 (`| a | b |`) 的列切分

/// 切分一列儲存格：去掉開頭的 `|` 與結尾的 `|`（若有），`\|` 視為儲存格內的字元
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let body = line.strip_prefix('|').unwrap_or(line);
    let body = match body.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => body,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

/// 分隔列只含 `-`、`:` 與空白；空列也視為分隔列
pub fn is_delimiter_row(cells: &[String]) -> bool {
    cells
        .iter()
        .flat_map(|cell| cell.chars())
        .all(|c| matches!(c, '-' | ':' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row_with_outer_pipes() {
        assert_eq!(split_row("| 项目 | 结果 |"), vec!["项目", "结果"]);
    }

    #[test]
    fn test_split_row_without_trailing_pipe() {
        assert_eq!(split_row("| a | b"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_row_keeps_empty_cells() {
        assert_eq!(split_row("| a |  | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_escaped_pipe_stays_in_cell() {
        assert_eq!(split_row(r"| a \| b | c |"), vec!["a | b", "c"]);
    }

    #[test]
    fn test_delimiter_rows() {
        assert!(is_delimiter_row(&split_row("|---|:---:|")));
        assert!(is_delimiter_row(&split_row("| --- | --- |")));
        assert!(is_delimiter_row(&split_row("||")));
        assert!(!is_delimiter_row(&split_row("| - | x |")));
    }
}
