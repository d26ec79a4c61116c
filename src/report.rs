use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::data::model::PriceCatalog;

const COLUMN_TITLES: [&str; 6] = [
    "Номер",
    "Название",
    "Цена",
    "Фасовка",
    "Файл",
    "Цена за кг.",
];

/// Write the whole catalog as an HTML table to `path`, replacing any
/// existing file.
pub fn export_html(catalog: &PriceCatalog, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    render_html(catalog, &mut out).with_context(|| format!("writing {}", path.display()))?;
    out.flush().with_context(|| format!("flushing {}", path.display()))?;
    info!("exported {} records to {}", catalog.len(), path.display());
    Ok(())
}

/// Render one row per record, numbered from 1, in catalog order.
pub fn render_html<W: Write>(catalog: &PriceCatalog, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta charset=\"utf-8\">")?;
    writeln!(out, "    <title>Позиции продуктов</title>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "    <table border=\"1\">")?;

    writeln!(out, "        <tr>")?;
    for title in COLUMN_TITLES {
        writeln!(out, "            <th>{title}</th>")?;
    }
    writeln!(out, "        </tr>")?;

    for (idx, rec) in catalog.records().iter().enumerate() {
        let cells = [
            (idx + 1).to_string(),
            escape(&rec.product),
            format_number(rec.price),
            format_number(rec.weight),
            escape(&rec.source_file),
            format!("{:.2}", rec.price_per_kg),
        ];
        writeln!(out, "        <tr>")?;
        for cell in &cells {
            writeln!(out, "            <td>{cell}</td>")?;
        }
        writeln!(out, "        </tr>")?;
    }

    writeln!(out, "    </table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}

/// Plain number text: whole values keep one decimal (`50.0`), others use
/// the shortest round-trip form (`12.5`). Magnitudes outside
/// `[1e-4, 1e16)` switch to exponent form with a signed, two-digit
/// exponent (`1e+16`, `2.5e-05`).
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v == f64::INFINITY {
        return "inf".to_string();
    }
    if v == f64::NEG_INFINITY {
        return "-inf".to_string();
    }

    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if v != 0.0 && !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
