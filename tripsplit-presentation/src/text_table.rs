use std::{borrow::Cow, fmt::Write};

const COLUMN_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

/// Plain-text table. Cells may span several lines; columns are padded to the
/// widest line, counting non-ASCII characters as two columns.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| cell_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(cell_width(cell));
            }
        }

        let mut out = String::with_capacity(256);
        self.write_line(&mut out, self.headers, &col_widths);
        let rule: Vec<String> = col_widths.iter().map(|width| "-".repeat(*width)).collect();
        let _ = writeln!(&mut out, "{}", rule.join(RULE_SEPARATOR));
        for row in &self.rows {
            self.write_line(&mut out, row.as_ref(), &col_widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], col_widths: &[usize]) {
        let height = cells
            .iter()
            .take(col_widths.len())
            .map(|cell| cell.lines().count().max(1))
            .max()
            .unwrap_or(1);

        for line_idx in 0..height {
            let texts: Vec<&str> = (0..col_widths.len())
                .map(|i| {
                    cells
                        .get(i)
                        .and_then(|cell| cell.lines().nth(line_idx))
                        .unwrap_or("")
                })
                .collect();
            // Trailing empty cells are dropped with their separators.
            let used = texts
                .iter()
                .rposition(|text| !text.is_empty())
                .map_or(0, |last| last + 1);
            let padded: Vec<String> = texts[..used]
                .iter()
                .zip(col_widths)
                .enumerate()
                .map(|(i, (text, width))| {
                    pad(text, *width, self.alignments.get(i).copied().unwrap_or_default())
                })
                .collect();
            let _ = writeln!(out, "{}", padded.join(COLUMN_SEPARATOR).trim_end());
        }
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn cell_width(cell: &str) -> usize {
    cell.lines().map(display_width).max().unwrap_or(0)
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let gap = width.saturating_sub(display_width(text));
    let (left, right) = match alignment {
        Alignment::Left => (0, gap),
        Alignment::Center => (gap / 2, gap - gap / 2),
        Alignment::Right => (gap, 0),
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}
