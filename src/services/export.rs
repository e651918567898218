use crate::models::contacts::Contact;

/// Filename suggested to the browser for the CSV download.
pub const EXPORT_FILENAME: &str = "my_contacts.csv";

const HEADER: &str = "Name,Phone,Email,Address,Notes,Category";

/// Renders the user's contacts as a CSV document.
///
/// Every field is double-quoted with embedded quotes doubled, one row per
/// contact, in the order the rows were fetched (name ascending).
pub fn contacts_to_csv(contacts: &[Contact]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for contact in contacts {
        let fields = [
            contact.name.as_str(),
            contact.phone.as_deref().unwrap_or(""),
            contact.email.as_deref().unwrap_or(""),
            contact.address.as_deref().unwrap_or(""),
            contact.notes.as_deref().unwrap_or(""),
            contact.category.as_str(),
        ];

        let row: Vec<String> = fields.iter().map(|f| quote_field(f)).collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
