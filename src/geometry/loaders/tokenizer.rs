/// 行分词工具
///
/// OBJ 和 MTL 都是按行组织的文本格式：每行第一个记号是指令，
/// 其后是参数。空白字符只包括空格和制表符。

use std::io::{self, BufRead};

/// 按行读取，非 UTF-8 字节替换为 U+FFFD
///
/// 导出工具常在注释里写入 Latin-1 文本，按字节读取可以避免整个文件因此失败。
/// 行尾的 `\n` 和 `\r\n` 被去掉。
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

/// 创建逐行读取的迭代器
pub fn lossy_lines<R: BufRead>(reader: R) -> LossyLines<R> {
    LossyLines { reader, buf: Vec::new() }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// 行首第一个记号（到下一个空白为止）
///
/// 空行或只有空白的行返回空字符串。
pub fn first_token(line: &str) -> &str {
    let trimmed = line.trim_start_matches(is_blank);
    match trimmed.find(is_blank) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    }
}

/// 第一个记号之后的文本，去掉首尾空白
pub fn tail(line: &str) -> &str {
    let trimmed = line.trim_start_matches(is_blank);
    match trimmed.find(is_blank) {
        Some(end) => trimmed[end..].trim_matches(is_blank),
        None => "",
    }
}

/// 按分隔符拆分，保留连续分隔符之间以及首尾的空字段
///
/// `"1//3"` 拆分为 `["1", "", "3"]`，面角点 `P//N` 依赖这一点。
/// 空文本返回空列表。
pub fn split(text: &str, delimiter: char) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(delimiter).collect()
}

/// 指令参数字段（连续空白视为一个分隔）
pub fn fields(text: &str) -> Vec<&str> {
    text.split(is_blank).filter(|f| !f.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_lines() {
        let data: &[u8] = b"# cr\xe9\xe9 par export\r\nv 1 2 3\n\nlast";
        let lines: Vec<String> = lossy_lines(data).collect::<io::Result<_>>().unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "# cr\u{fffd}\u{fffd} par export");
        assert_eq!(lines[1], "v 1 2 3");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "last");
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("v 1 2 3"), "v");
        assert_eq!(first_token("  \tusemtl red"), "usemtl");
        assert_eq!(first_token("g"), "g");
        assert_eq!(first_token("   "), "");
        assert_eq!(first_token(""), "");
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("o  my object \t"), "my object");
        assert_eq!(tail("map_Kd textures/wood diffuse.png"), "textures/wood diffuse.png");
        assert_eq!(tail("g"), "");
        assert_eq!(tail("g   "), "");
        assert_eq!(tail(""), "");
    }

    #[test]
    fn test_split_preserves_empty_fields() {
        assert_eq!(split("1//3", '/'), vec!["1", "", "3"]);
        assert_eq!(split("1/2", '/'), vec!["1", "2"]);
        assert_eq!(split("/1/", '/'), vec!["", "1", ""]);
        assert_eq!(split("7", '/'), vec!["7"]);
        assert!(split("", '/').is_empty());
    }

    #[test]
    fn test_fields_collapses_blanks() {
        assert_eq!(fields("1.0  2.0\t3.0"), vec!["1.0", "2.0", "3.0"]);
        assert!(fields("   ").is_empty());
    }
}
