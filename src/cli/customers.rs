use super::{OutputFormat, render, ui};
use crate::core::CustomerService;
use crate::core::model::{CustomerDraft, CustomerRecord};
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;

/// Customer maintenance operations exposed on the command line.
#[derive(Debug, Clone)]
pub enum CustomerCommand {
    List,
    Show { id: String },
    ShowByDocument { document_number: String },
    Add(CustomerDraft),
    Update { id: String, draft: CustomerDraft },
    Delete { id: String },
}

fn customers_table(customers: &[CustomerRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Document"),
        ui::header_cell("Name"),
        ui::header_cell("Type"),
        ui::header_cell("Email"),
        ui::header_cell("Phone"),
    ]);
    for customer in customers {
        let name = match &customer.last_name {
            Some(last_name) => format!("{} {last_name}", customer.first_name),
            None => customer.first_name.clone(),
        };
        table.add_row(vec![
            Cell::new(&customer.id),
            Cell::new(format!(
                "{} {}",
                customer.document_type, customer.document_number
            )),
            Cell::new(name),
            Cell::new(customer.customer_type),
            Cell::new(customer.email.as_deref().unwrap_or("")),
            Cell::new(customer.phone.as_deref().unwrap_or("")),
        ]);
    }
    table.to_string()
}

fn single_customer_table(customer: &CustomerRecord) -> String {
    customers_table(std::slice::from_ref(customer))
}

pub async fn run(
    service: &CustomerService,
    command: CustomerCommand,
    format: OutputFormat,
) -> Result<String> {
    match command {
        CustomerCommand::List => {
            let customers = service.find_all().await?;
            render(&customers, format, |c| customers_table(c))
        }
        CustomerCommand::Show { id } => {
            let customer = service.find_by_id(&id).await?;
            render(&customer, format, single_customer_table)
        }
        CustomerCommand::ShowByDocument { document_number } => {
            let customer = service.find_by_document_number(&document_number).await?;
            render(&customer, format, single_customer_table)
        }
        CustomerCommand::Add(draft) => {
            let customer = service.create(draft, Utc::now()).await?;
            render(&customer, format, single_customer_table)
        }
        CustomerCommand::Update { id, draft } => {
            let customer = service.update(&id, draft).await?;
            render(&customer, format, single_customer_table)
        }
        CustomerCommand::Delete { id } => {
            service.delete(&id).await?;
            Ok(format!("Deleted customer {id}"))
        }
    }
}
