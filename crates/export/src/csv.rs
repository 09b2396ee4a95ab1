use crate::currency::format_rupiah;
use crate::details::{QuoteDocument, project_details};

/// Quote a CSV field when it contains a delimiter, quote or line break.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn push_row(out: &mut String, cells: &[&str]) {
    let line: Vec<String> = cells.iter().map(|c| field(c)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Render the quote as CSV with three sections (breakdown, summary and
/// project details), each headed by a `# <name>` line and separated by a
/// blank line.
///
/// Amounts are whole rupiah without separators so spreadsheets read them
/// as numbers.
pub fn render_csv(doc: &QuoteDocument<'_>) -> Vec<u8> {
    let mut out = String::new();

    push_row(&mut out, &["# Quote Breakdown"]);
    push_row(&mut out, &["Item", "Low (Rp)", "High (Rp)"]);
    for (category, range) in doc.line_items.iter() {
        push_row(
            &mut out,
            &[
                category.label(),
                &format!("{:.0}", range.low.round()),
                &format!("{:.0}", range.high.round()),
            ],
        );
    }
    out.push_str("\r\n");

    push_row(&mut out, &["# Quote Summary"]);
    push_row(&mut out, &["Item", "Amount (Rp)", "Formatted"]);
    for (label, amount) in [
        ("Low Estimate", doc.totals.low),
        ("Recommended Price", doc.totals.recommended),
        ("High Estimate", doc.totals.high),
    ] {
        push_row(
            &mut out,
            &[label, &amount.to_string(), &format_rupiah(amount as f64)],
        );
    }
    out.push_str("\r\n");

    push_row(&mut out, &["# Project Details"]);
    push_row(&mut out, &["Category", "Item", "Value"]);
    for row in project_details(doc.brief, doc.production_vars) {
        push_row(&mut out, &[row.section.title(), row.item, &row.value]);
    }

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lapis_pricing::{
        DistributionChannel, LineCategory, QuoteDraft, RateCatalog, calculate_quote,
        generate_line_items,
    };

    fn render(draft: &QuoteDraft) -> String {
        let catalog = RateCatalog::default();
        let totals = calculate_quote(&draft.brief, &draft.production_vars, &catalog).unwrap();
        let items = generate_line_items(&draft.brief, &draft.production_vars, &catalog).unwrap();
        let doc = QuoteDocument {
            line_items: &items,
            brief: &draft.brief,
            production_vars: &draft.production_vars,
            totals,
            issued: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        };
        String::from_utf8(render_csv(&doc)).unwrap()
    }

    #[test]
    fn has_three_sections_in_order() {
        let csv = render(&QuoteDraft::default());
        let breakdown = csv.find("# Quote Breakdown").unwrap();
        let summary = csv.find("# Quote Summary").unwrap();
        let details = csv.find("# Project Details").unwrap();
        assert!(breakdown < summary && summary < details);
    }

    #[test]
    fn breakdown_has_one_row_per_category() {
        let csv = render(&QuoteDraft::default());
        let section = csv.split("\r\n\r\n").next().unwrap();
        // heading + header + one row per category
        assert_eq!(section.lines().count(), 2 + LineCategory::ALL.len());
    }

    #[test]
    fn summary_carries_raw_and_formatted_totals() {
        let csv = render(&QuoteDraft::default());
        assert!(csv.contains("Low Estimate,29751000,Rp 29.751.000"));
        assert!(csv.contains("Recommended Price,43664880,Rp 43.664.880"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut draft = QuoteDraft::default();
        draft.brief.distribution.insert(DistributionChannel::Instagram);
        draft.brief.distribution.insert(DistributionChannel::TikTok);
        draft.brief.concept = "Say \"hi\"".to_string();
        let csv = render(&draft);
        assert!(csv.contains("Client Brief,Distribution,\"Instagram, TikTok\""));
        assert!(csv.contains("Client Brief,Concept,\"Say \"\"hi\"\"\""));
    }
}
