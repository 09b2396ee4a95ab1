use anyhow::{Context as _, Result};

use lapis_core::CustomerId;
use lapis_customers::{Customer, CustomerPatch};
use lapis_infra::RecordStore;

use crate::cli::{EditCustomerArgs, NewCustomerArgs};
use crate::context::Context;
use crate::render;

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn add(ctx: &Context, args: NewCustomerArgs) -> Result<CustomerId> {
    let mut customer = Customer::new(CustomerId::new(), args.name);
    customer.email = non_blank(args.email);
    customer.phone = non_blank(args.phone);
    customer.company = non_blank(args.company);
    customer.notes = args.notes.unwrap_or_default();

    let id = customer.customer_id.clone();
    ctx.customers.upsert(customer).context("customer not saved")?;
    println!("Added customer {id}");
    Ok(id)
}

pub fn list(ctx: &Context) -> Result<()> {
    render::customer_table(&ctx.customers.list()?);
    Ok(())
}

pub fn search(ctx: &Context, query: &str) -> Result<()> {
    render::customer_table(&ctx.customers.search(query)?);
    Ok(())
}

fn require(ctx: &Context, id: &CustomerId) -> Result<Customer> {
    ctx.customers
        .get(id)?
        .with_context(|| format!("customer {id} not found"))
}

pub fn show(ctx: &Context, id: &CustomerId) -> Result<()> {
    render::customer(&require(ctx, id)?);
    Ok(())
}

/// Load, merge and re-validate. A rejected edit leaves the stored record as it was.
pub fn edit(ctx: &Context, args: EditCustomerArgs) -> Result<()> {
    let mut customer = require(ctx, &args.id)?;
    let patch = CustomerPatch {
        name: args.name,
        email: args.email,
        phone: args.phone,
        company: args.company,
        notes: args.notes,
        street: args.street,
        city: args.city,
        province: args.province,
        postal_code: args.postal_code,
        country: args.country,
        preferred_contact: args.contact,
        preferred_formats: args.formats.map(|f| f.into_iter().collect()),
        preferred_channels: args.channels.map(|c| c.into_iter().collect()),
        language: args.language,
    };
    if patch.is_empty() {
        println!("Nothing to change for {}", args.id);
        return Ok(());
    }

    customer.apply_patch(patch);
    ctx.customers.upsert(customer).context("customer not saved")?;
    println!("Updated customer {}", args.id);
    Ok(())
}

/// Deleting an unknown id is a no-op. Deleting the active customer also
/// deactivates it, keeping the draft.
pub fn delete(ctx: &Context, id: &CustomerId) -> Result<bool> {
    if !ctx.customers.delete(id)? {
        println!("No customer {id}; nothing deleted");
        return Ok(false);
    }
    let mut session = ctx.session()?;
    if session.active_customer.as_ref() == Some(id) {
        session.active_customer = None;
        ctx.save_session(&session)?;
    }
    println!("Deleted customer {id}");
    Ok(true)
}

pub fn use_customer(ctx: &Context, id: Option<CustomerId>) -> Result<()> {
    let mut session = ctx.session()?;
    session.switch_customer(&ctx.customers, id)?;
    ctx.save_session(&session)?;
    match &session.active_customer {
        Some(id) => println!("Active customer: {id}"),
        None => println!("No active customer"),
    }
    Ok(())
}

pub fn history(ctx: &Context, id: &CustomerId) -> Result<()> {
    let customer = require(ctx, id)?;
    println!("Projects for {}", customer.name);
    render::project_history(&customer);
    println!();
    println!("Saved quotes");
    render::quote_table(&ctx.quotes.list_by_customer(id)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::create_test_context;
    use lapis_customers::ContactMethod;
    use lapis_pricing::DistributionChannel;

    fn args(name: &str, email: Option<&str>) -> NewCustomerArgs {
        NewCustomerArgs {
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: None,
            company: Some("  ".to_string()),
            notes: None,
        }
    }

    #[test]
    fn add_stores_customer_with_generated_id() {
        let (ctx, _dir) = create_test_context();
        let id = add(&ctx, args("Rina", Some("rina@studio.id"))).unwrap();
        assert!(id.as_str().starts_with("CUST-"));
        let stored = ctx.customers.get(&id).unwrap().unwrap();
        assert_eq!(stored.email.as_deref(), Some("rina@studio.id"));
        assert_eq!(stored.company, None);
    }

    #[test]
    fn add_rejects_invalid_input() {
        let (ctx, _dir) = create_test_context();
        assert!(add(&ctx, args("", None)).is_err());
        assert!(add(&ctx, args("Rina", Some("rina.studio.id"))).is_err());
        assert!(ctx.customers.list().unwrap().is_empty());
    }

    fn edit_args(id: &CustomerId) -> EditCustomerArgs {
        EditCustomerArgs {
            id: id.clone(),
            name: None,
            email: None,
            phone: None,
            company: None,
            notes: None,
            street: None,
            city: None,
            province: None,
            postal_code: None,
            country: None,
            contact: None,
            formats: None,
            channels: None,
            language: None,
        }
    }

    #[test]
    fn edit_changes_only_given_fields() {
        let (ctx, _dir) = create_test_context();
        let id = add(&ctx, args("Rina", Some("rina@studio.id"))).unwrap();

        edit(
            &ctx,
            EditCustomerArgs {
                phone: Some("0812-555".to_string()),
                city: Some("Yogyakarta".to_string()),
                contact: Some(ContactMethod::Phone),
                channels: Some(vec![DistributionChannel::YouTube]),
                ..edit_args(&id)
            },
        )
        .unwrap();

        let stored = ctx.customers.get(&id).unwrap().unwrap();
        assert_eq!(stored.name, "Rina");
        assert_eq!(stored.email.as_deref(), Some("rina@studio.id"));
        assert_eq!(stored.phone.as_deref(), Some("0812-555"));
        assert_eq!(stored.address.city.as_deref(), Some("Yogyakarta"));
        assert_eq!(stored.preferences.preferred_contact, Some(ContactMethod::Phone));
        assert!(stored.preferences.preferred_channels.contains(&DistributionChannel::YouTube));
    }

    #[test]
    fn rejected_edit_leaves_file_untouched() {
        let (ctx, _dir) = create_test_context();
        let id = add(&ctx, args("Rina", Some("rina@studio.id"))).unwrap();
        let before = std::fs::read(&ctx.config.customers_file).unwrap();

        let bad_email = EditCustomerArgs {
            email: Some("rina.studio.id".to_string()),
            city: Some("Medan".to_string()),
            ..edit_args(&id)
        };
        assert!(edit(&ctx, bad_email).is_err());
        let blank_name = EditCustomerArgs {
            name: Some("  ".to_string()),
            ..edit_args(&id)
        };
        assert!(edit(&ctx, blank_name).is_err());

        assert_eq!(std::fs::read(&ctx.config.customers_file).unwrap(), before);
    }

    #[test]
    fn edit_of_unknown_customer_fails() {
        let (ctx, _dir) = create_test_context();
        let id: CustomerId = "CUST-ABCDEF02".parse().unwrap();
        assert!(edit(&ctx, EditCustomerArgs { city: Some("Bali".to_string()), ..edit_args(&id) }).is_err());
        assert!(ctx.customers.list().unwrap().is_empty());
    }

    #[test]
    fn deleting_active_customer_deactivates_it() {
        let (ctx, _dir) = create_test_context();
        let id = add(&ctx, args("Rina", None)).unwrap();
        use_customer(&ctx, Some(id.clone())).unwrap();

        assert!(delete(&ctx, &id).unwrap());
        assert_eq!(ctx.session().unwrap().active_customer, None);
        assert!(!delete(&ctx, &id).unwrap());
    }

    #[test]
    fn use_unknown_customer_fails() {
        let (ctx, _dir) = create_test_context();
        assert!(use_customer(&ctx, Some("CUST-ABCDEF01".parse().unwrap())).is_err());
        assert_eq!(ctx.session().unwrap().active_customer, None);
    }
}
