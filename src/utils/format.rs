use crate::models::{Transaction, TransactionType};

/// Two decimals with a currency prefix; outcomes are shown negative
pub fn format_price(kind: &TransactionType, price: f64) -> String {
    match kind {
        TransactionType::Outcome => format!("- R$ {:.2}", price),
        _ => format!("R$ {:.2}", price),
    }
}

/// `dd/mm/yyyy` when the timestamp parses, the raw string otherwise
pub fn format_date(transaction: &Transaction) -> String {
    transaction
        .created_at_utc()
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| transaction.created_at.clone())
}
