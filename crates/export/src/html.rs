use std::fmt::Write;

use crate::currency::format_rupiah;
use crate::details::{DetailSection, QuoteDocument, project_details};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; }
h1 { color: #2C3E50; }
.summary { display: flex; justify-content: space-between; margin: 20px 0; }
.summary-item { padding: 15px; background-color: #f8f9fa; border-radius: 5px; width: 30%; text-align: center; }
.summary-value { font-size: 24px; font-weight: bold; margin: 10px 0; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #f2f2f2; }
.footer { margin-top: 30px; font-size: 12px; color: #666; }
";

/// Quotes are honoured for this many days after issue.
pub const VALIDITY_DAYS: u32 = 30;

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a standalone HTML quote document.
pub fn render_html(doc: &QuoteDocument<'_>) -> Result<Vec<u8>, std::fmt::Error> {
    let mut html = String::new();
    write_document(&mut html, doc)?;
    Ok(html.into_bytes())
}

fn write_document(out: &mut String, doc: &QuoteDocument<'_>) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Lapis Visuals - Project Quote</title>")?;
    writeln!(out, "<style>\n{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>Lapis Visuals - Project Quote</h1>")?;
    writeln!(out, "<p>Date: {}</p>", doc.issued.format("%Y-%m-%d"))?;

    writeln!(out, "<h2>Quote Summary</h2>")?;
    writeln!(out, "<div class=\"summary\">")?;
    for (label, amount) in [
        ("Low Estimate", doc.totals.low),
        ("Recommended", doc.totals.recommended),
        ("High Estimate", doc.totals.high),
    ] {
        writeln!(
            out,
            "<div class=\"summary-item\"><div>{label}</div><div class=\"summary-value\">{}</div></div>",
            format_rupiah(amount as f64)
        )?;
    }
    writeln!(out, "</div>")?;

    let rows = project_details(doc.brief, doc.production_vars);
    for section in [DetailSection::ClientBrief, DetailSection::ProductionVariables] {
        writeln!(out, "<h2>{}</h2>", section.title())?;
        writeln!(out, "<table>")?;
        writeln!(out, "<tr><th>Item</th><th>Value</th></tr>")?;
        for row in rows.iter().filter(|r| r.section == section) {
            writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", row.item, escape(&row.value))?;
        }
        writeln!(out, "</table>")?;
    }

    writeln!(out, "<h2>Cost Breakdown</h2>")?;
    writeln!(out, "<table>")?;
    writeln!(out, "<tr><th>Item</th><th>Low (Rp)</th><th>High (Rp)</th></tr>")?;
    for (category, range) in doc.line_items.iter() {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(category.label()),
            format_rupiah(range.low),
            format_rupiah(range.high)
        )?;
    }
    writeln!(out, "</table>")?;

    writeln!(out, "<div class=\"footer\">")?;
    writeln!(out, "<p>Generated by Lapis Visuals Pricing Calculator</p>")?;
    writeln!(
        out,
        "<p>This quote is valid for {VALIDITY_DAYS} days from the date above.</p>"
    )?;
    writeln!(out, "</div>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}
