// Plain-text asset table for `activos list`

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use activos_import::{Asset, Field};

/// Widest a column may grow before values are cut with "..".
const MAX_COLUMN_WIDTH: usize = 28;

pub(crate) fn render(assets: &[Asset]) -> String {
    let mut widths: Vec<usize> = Field::ALL.iter().map(|f| f.header().width()).collect();
    for asset in assets {
        for (i, field) in Field::ALL.iter().enumerate() {
            let w = asset.field(*field).unwrap_or("").width();
            widths[i] = widths[i].max(w.min(MAX_COLUMN_WIDTH));
        }
    }

    let mut out = String::new();
    let header: Vec<&str> = Field::ALL.iter().map(|f| f.header()).collect();
    push_line(&mut out, &header, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths);

    for asset in assets {
        let cells: Vec<&str> = Field::ALL
            .iter()
            .map(|f| asset.field(*f).unwrap_or(""))
            .collect();
        push_line(&mut out, &cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| pad_right(c, *w))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Cut `s` to at most `width` display columns, ending in ".." when cut.
fn truncate_display(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let budget = width.saturating_sub(2);
    let mut used = 0;
    let mut kept = String::new();
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        kept.push(ch);
    }
    if width >= 2 {
        kept.push_str("..");
    }
    kept
}

fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let w = cut.width();
    format!("{}{}", cut, " ".repeat(width.saturating_sub(w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(code: &str, name: &str) -> Asset {
        Asset {
            id: Some(1),
            sync_id: "s".into(),
            code: code.into(),
            name: name.into(),
            building: Some("Edificio A".into()),
            floor: None,
            category: None,
            space: None,
            serial: None,
            updated_at: None,
            deleted: Some(0),
        }
    }

    #[test]
    fn header_and_rows_align() {
        let out = render(&[asset("ACT-1", "Silla"), asset("ACT-10", "Escritorio")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("codigo  nombre"));
        assert!(lines[1].starts_with("------"));
        // name column starts at the same offset on every line
        let offset = lines[0].find("nombre").unwrap();
        assert_eq!(&lines[3][offset..offset + 10], "Escritorio");
    }

    #[test]
    fn long_values_are_cut() {
        let long = "x".repeat(40);
        let out = render(&[asset("A", &long)]);
        assert!(out.contains(&format!("{}..", "x".repeat(MAX_COLUMN_WIDTH - 2))));
        assert!(!out.contains(&long));
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(pad_right("\u{4e16}\u{754c}", 6), "\u{4e16}\u{754c}  ");
        assert_eq!(truncate_display("\u{4e16}\u{754c}\u{4f60}\u{597d}", 6), "\u{4e16}\u{754c}..");
    }

    #[test]
    fn empty_listing_is_header_only() {
        assert_eq!(render(&[]).lines().count(), 2);
    }
}
