//! Plain aligned tables for `--format table`.

const MIN_WIDTH: usize = 6;
const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    /// Shrink the widest columns until the table fits.
    pub max_width: Option<usize>,
    pub color: bool,
}

struct Column<'a> {
    header: &'a str,
    width: usize,
}

impl Column<'_> {
    fn floor(&self) -> usize {
        self.header.chars().count().max(MIN_WIDTH)
    }
}

/// Render rows of cells under `headers`. Missing cells print as `-`.
#[must_use]
pub fn render_grid(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut columns: Vec<Column<'_>> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            let mut column = Column { header, width: 0 };
            column.width = widest.max(column.floor());
            column
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink(&mut columns, max_width);
    }

    let header_line = columns
        .iter()
        .map(|c| pad(&clip(c.header, c.width), c.width, false))
        .collect::<Vec<_>>()
        .join(GAP);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push("-".repeat(header_line.chars().count()));
    lines.insert(0, header_line);

    for row in rows {
        let line = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let text = clip(row.get(i).map_or("-", String::as_str), c.width);
                let right = is_numeric(&text);
                let padded = pad(&text, c.width, right);
                if options.color {
                    paint(&padded, &text)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line);
    }

    lines.join("\n")
}

/// Narrow the widest column one character at a time, never below its floor.
fn shrink(columns: &mut [Column<'_>], max_width: usize) {
    let gaps = columns.len().saturating_sub(1) * GAP.len();
    let mut total: usize = columns.iter().map(|c| c.width).sum::<usize>() + gaps;

    while total > max_width {
        let Some(widest) = columns
            .iter_mut()
            .filter(|c| c.width > c.floor())
            .max_by_key(|c| c.width)
        else {
            break;
        };
        widest.width -= 1;
        total -= 1;
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize, right: bool) -> String {
    if right {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.parse::<f64>().is_ok()
}

/// Wrap outcome and verdict words in an ANSI color: green for success,
/// yellow for inconclusive, red for rejection or failure.
fn paint(padded: &str, word: &str) -> String {
    let code = match word.to_ascii_lowercase().as_str() {
        "accepted" | "verified" | "approve" | "true" => "32",
        "revise" | "exhausted" | "limit_reached" | "hint" => "33",
        "rejected" | "reject" | "infrastructure_failure" | "cancelled" | "false" => "31",
        _ => return padded.to_string(),
    };
    padded.replacen(word, &format!("\u{1b}[{code}m{word}\u{1b}[0m"), 1)
}
