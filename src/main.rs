use std::process::ExitCode;

use dtmoney::services::summarize;
use dtmoney::utils::{format_date, format_price, Align, Table};
use dtmoney::{CreateTransactionInput, Snapshot, StoreConfig, TransactionStore, TransactionType, TransactionsClient};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: dtmoney [list [QUERY]] | create <DESCRIPTION> <PRICE> <income|outcome> <CATEGORY>";

enum Command {
    List(Option<String>),
    Create(CreateTransactionInput),
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args.first().map(String::as_str) {
        None => Ok(Command::List(None)),
        Some("list") => match args.len() {
            1 => Ok(Command::List(None)),
            2 => Ok(Command::List(Some(args[1].clone()))),
            _ => Err("list takes at most one query".to_string()),
        },
        Some("create") => {
            if args.len() != 5 {
                return Err("create takes exactly four arguments".to_string());
            }
            let price = args[2]
                .parse::<f64>()
                .map_err(|_| format!("Invalid price '{}'", args[2]))?;
            Ok(Command::Create(CreateTransactionInput {
                description: args[1].clone(),
                price,
                kind: TransactionType::from(args[3].as_str()),
                category: args[4].clone(),
            }))
        }
        Some(other) => Err(format!("Unknown command '{}'", other)),
    }
}

fn render(transactions: &Snapshot) -> String {
    let mut table = Table::new(&["Id", "Description", "Price", "Category", "Date"])
        .align(0, Align::Right)
        .align(2, Align::Right);
    for tx in transactions.iter() {
        table.add_row(vec![
            tx.id.to_string(),
            tx.description.clone(),
            format_price(&tx.kind, tx.price),
            tx.category.clone(),
            format_date(tx),
        ]);
    }

    let summary = summarize(transactions);
    let mut output = if table.is_empty() {
        String::from("No transactions found\n")
    } else {
        table.render()
    };
    output.push_str(&format!(
        "\nIncome: R$ {:.2} | Outcome: R$ {:.2} | Total: R$ {:.2}\n",
        summary.income, summary.outcome, summary.total
    ));
    output
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("dtmoney=info".parse().expect("static directive")))
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Using transactions backend at {}", config.base_url);

    let client = TransactionsClient::new(config.base_url.clone());
    let store = match TransactionStore::connect(client, config.placement).await {
        Ok(store) => store,
        Err(e) => {
            error!("Initial load failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Loaded {} transactions", store.snapshot().len());

    let result = match command {
        Command::List(None) => Ok(()),
        Command::List(Some(query)) => store.fetch_transactions(Some(&query)).await,
        Command::Create(input) => store.create_transaction(input).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    print!("{}", render(&store.snapshot()));
    ExitCode::SUCCESS
}
