/// Byte offsets where each line of a text starts, for O(log n) lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line number containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// 1-based (line, column) of `offset`. Columns count characters.
    pub fn line_col(&self, content: &str, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.offsets[line - 1];
        let col = content[start..offset].chars().count() + 1;
        (line, col)
    }

    /// Text of a 1-based line, without the line terminator.
    pub fn line_text<'a>(&self, content: &'a str, line: usize) -> &'a str {
        let start = self.offsets[line - 1];
        let end = self
            .offsets
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(content.len());
        content[start..end].trim_end_matches('\r')
    }
}
