use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print column-aligned rows under a dashed header, each line prefixed with
/// `indent`.
pub fn print_table(indent: &str, headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(indent, headers, rows));
}

fn render_table(indent: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut out = render_line(indent, &widths, headers.iter().copied());
    out.push_str(&render_line(indent, &widths, dashes.iter().map(String::as_str)));
    for row in rows {
        out.push_str(&render_line(indent, &widths, row.iter().map(String::as_str)));
    }
    out
}

fn render_line<'a>(indent: &str, widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let padded: Vec<String> = cells
        .enumerate()
        .map(|(i, cell)| {
            let w = widths.get(i).copied().unwrap_or(0);
            format!("{cell:w$}")
        })
        .collect();
    format!("{indent}{}\n", padded.join("  ").trim_end())
}
