use crate::models::{Summary, Transaction, TransactionType};

/// Sum incomes and outcomes; unknown types count toward neither
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = transactions
        .iter()
        .fold(Summary::default(), |mut acc, tx| {
            match tx.kind {
                TransactionType::Income => acc.income += tx.price,
                TransactionType::Outcome => acc.outcome += tx.price,
                TransactionType::Other(_) => {}
            }
            acc
        });
    summary.total = summary.income - summary.outcome;
    summary
}
