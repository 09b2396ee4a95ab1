//! Plain-text rendering for terminal output.

use lapis_customers::Customer;
use lapis_export::{DetailSection, format_rupiah, project_details};
use lapis_pricing::{LineItems, QuoteDraft, QuoteTotals, RateCatalog};
use lapis_quotes::Quote;

pub fn totals(totals: &QuoteTotals) {
    println!("Low estimate:       {}", format_rupiah(totals.low as f64));
    println!("Recommended price:  {}", format_rupiah(totals.recommended as f64));
    println!("High estimate:      {}", format_rupiah(totals.high as f64));
}

pub fn line_items(items: &LineItems) {
    println!("{:<22} {:>18} {:>18}", "Item", "Low", "High");
    for (category, range) in items.iter() {
        println!(
            "{:<22} {:>18} {:>18}",
            category.label(),
            format_rupiah(range.low),
            format_rupiah(range.high)
        );
    }
    let sum = items.total();
    println!(
        "{:<22} {:>18} {:>18}",
        "Sum of items",
        format_rupiah(sum.low),
        format_rupiah(sum.high)
    );
}

pub fn draft(draft: &QuoteDraft) {
    let rows = project_details(&draft.brief, &draft.production_vars);
    for section in [DetailSection::ClientBrief, DetailSection::ProductionVariables] {
        println!("{}", section.title());
        for row in rows.iter().filter(|r| r.section == section) {
            println!("  {:<22} {}", row.item, row.value);
        }
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn customer_table(customers: &[Customer]) {
    if customers.is_empty() {
        println!("No customers.");
        return;
    }
    println!("{:<14} {:<28} {:<28} {}", "ID", "Name", "Email", "Company");
    for c in customers {
        println!(
            "{:<14} {:<28} {:<28} {}",
            c.customer_id,
            c.name,
            or_dash(c.email.as_deref()),
            or_dash(c.company.as_deref())
        );
    }
}

pub fn customer(c: &Customer) {
    println!("{} ({})", c.name, c.customer_id);
    println!("  Email:    {}", or_dash(c.email.as_deref()));
    println!("  Phone:    {}", or_dash(c.phone.as_deref()));
    println!("  Company:  {}", or_dash(c.company.as_deref()));
    let address: Vec<&str> = [
        &c.address.street,
        &c.address.city,
        &c.address.province,
        &c.address.postal_code,
        &c.address.country,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .collect();
    if !address.is_empty() {
        println!("  Address:  {}", address.join(", "));
    }
    if !c.notes.is_empty() {
        println!("  Notes:    {}", c.notes);
    }
    println!("  Projects: {}", c.project_history.len());
    if c.parked_draft().is_some() {
        println!("  Has a parked draft");
    }
}

pub fn project_history(c: &Customer) {
    if c.project_history.is_empty() {
        println!("No projects recorded.");
        return;
    }
    for record in &c.project_history {
        let price = record
            .recommended_quote
            .map(|amount| format_rupiah(amount as f64))
            .unwrap_or_else(|| "-".to_string());
        let quote = record.quote_id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        println!("{}  {:<32} {:<14} {}", record.date, record.project_name, quote, price);
    }
}

pub fn quote_table(quotes: &[Quote]) {
    if quotes.is_empty() {
        println!("No quotes.");
        return;
    }
    println!(
        "{:<14} {:<14} {:<28} {:<9} {:>18}",
        "ID", "Customer", "Project", "Status", "Recommended"
    );
    for q in quotes {
        println!(
            "{:<14} {:<14} {:<28} {:<9} {:>18}",
            q.quote_id,
            q.customer_id,
            q.project_name,
            q.status,
            format_rupiah(q.recommended_quote as f64)
        );
    }
}

pub fn quote(q: &Quote) {
    println!("{} - {} ({})", q.quote_id, q.project_name, q.status);
    println!("Customer: {}", q.customer_id);
    println!("Created:  {}", q.creation_date.format("%Y-%m-%d %H:%M"));
    println!("Updated:  {}", q.last_updated_date.format("%Y-%m-%d %H:%M"));
    println!();
    totals(&q.totals());
    println!();
    line_items(&q.line_items_snapshot);
    println!();
    draft(&q.draft());
}

pub fn catalog(c: &RateCatalog) {
    println!("Scriptwriting base: {}", format_rupiah(c.scriptwriting.base as f64));
    for (level, factor) in &c.scriptwriting.complexity_factors {
        println!("  {level:<10} x{factor}");
    }
    println!("Storyboard base:    {}", format_rupiah(c.storyboard.base as f64));
    println!("Locations:");
    for (name, cost) in &c.location {
        println!("  {name:<24} {}", format_rupiah(*cost as f64));
    }
    println!("Crew roles (booking order, per day):");
    for (role, rate) in &c.crew_roles {
        println!("  {role:<24} {}", format_rupiah(*rate as f64));
    }
    println!(
        "Equipment per day:  basic {} / premium {}",
        format_rupiah(c.equipment.basic as f64),
        format_rupiah(c.equipment.premium as f64)
    );
    println!("Post-production per minute:");
    for (stage, rates) in &c.post_production {
        let factors: Vec<String> = rates
            .complexity
            .iter()
            .map(|(level, factor)| format!("{level} x{factor}"))
            .collect();
        println!(
            "  {stage:<10} {} ({})",
            format_rupiah(rates.per_minute as f64),
            factors.join(", ")
        );
    }
    println!("Producer fee:       {:.1}%", c.producer_fee.percent * 100.0);
    println!("Contingency default: {:.1}%", c.contingency.default * 100.0);
}
