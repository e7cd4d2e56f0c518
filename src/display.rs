//! Terminal rendering for entity lists and the dashboard

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::api::types::{
    Account, ClientRecord, Dashboard, Exchange, PendingPayment, Transaction, TransactionKind,
};
use crate::split::{Tone, Validity};

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Case-insensitive substring match over an entity's display fields
pub fn matches_filter(haystacks: &[&str], filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => {
            let needle = f.to_lowercase();
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        }
    }
}

pub fn print_dashboard(dashboard: &Dashboard) {
    println!("{}", "TransactionHub dashboard".bright_white());
    println!(
        "   {} {}   {} {}   {} {}",
        "Clients:".bright_black(),
        dashboard.client_count.bright_yellow(),
        "Exchanges:".bright_black(),
        dashboard.exchange_count.bright_yellow(),
        "Accounts:".bright_black(),
        dashboard.account_count.bright_yellow(),
    );
    println!(
        "   {} ${:.2}   {} ${:.2}   {} ${:.2}",
        "Funding:".bright_black(),
        dashboard.total_funding,
        "Balance:".bright_black(),
        dashboard.total_balance,
        "Payments:".bright_black(),
        dashboard.total_payment,
    );
    println!(
        "   {} {} (${:.2})",
        "Pending payments:".bright_black(),
        dashboard.pending_payment_count.bright_yellow(),
        dashboard.pending_payment_total,
    );
}

pub fn print_clients(clients: &[ClientRecord]) {
    let mut table = base_table(vec!["ID", "Name", "Phone", "Email"]);
    for client in clients {
        table.add_row(vec![
            Cell::from(client.id),
            Cell::new(&client.name),
            Cell::new(client.phone.as_deref().unwrap_or("-")),
            Cell::new(client.email.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    println!("{} clients", clients.len());
}

pub fn print_exchanges(exchanges: &[Exchange]) {
    let mut table = base_table(vec!["ID", "Name", "Website"]);
    for exchange in exchanges {
        table.add_row(vec![
            Cell::from(exchange.id),
            Cell::new(&exchange.name),
            Cell::new(exchange.website.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    println!("{} exchanges", exchanges.len());
}

pub fn print_accounts(accounts: &[Account]) {
    let mut table = base_table(vec!["ID", "Account", "Balance", "Loss %", "Profit %"]);
    for account in accounts {
        table.add_row(vec![
            Cell::new(account.id),
            Cell::new(account.label()),
            Cell::new(format!("${:.2}", account.balance)),
            Cell::new(format!("{:.2}", account.loss_share_percentage)),
            Cell::new(format!("{:.2}", account.profit_share_percentage)),
        ]);
    }
    println!("{table}");
    println!("{} accounts", accounts.len());
}

pub fn print_account_detail(account: &Account) {
    println!("{}", account.label().bright_white());
    println!("   {} {}", "Account ID:".bright_black(), account.id.bright_yellow());
    println!("   {} ${:.2}", "Balance:".bright_black(), account.balance);
    println!(
        "   {} {:.2}%   {} {:.2}%",
        "Loss share:".bright_black(),
        account.loss_share_percentage,
        "Profit share:".bright_black(),
        account.profit_share_percentage,
    );
}

pub fn print_transactions(transactions: &[Transaction]) {
    let mut table = base_table(vec!["ID", "Account", "Type", "Amount", "Date", "Note"]);
    for tx in transactions {
        let date = tx
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::from(tx.id),
            Cell::new(
                tx.account_name
                    .clone()
                    .unwrap_or_else(|| tx.account.to_string()),
            ),
            Cell::new(tx.kind),
            Cell::new(format!("${:.2}", tx.amount)),
            Cell::new(date),
            Cell::new(tx.note.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    println!("{} transactions", transactions.len());
}

pub fn print_pending_payments(pending: &[PendingPayment]) {
    let mut table = base_table(vec!["ID", "Account", "Amount", "Due"]);
    for payment in pending {
        let due = payment
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::from(payment.id),
            Cell::new(
                payment
                    .account_name
                    .clone()
                    .unwrap_or_else(|| payment.account.to_string()),
            ),
            Cell::new(format!("${:.2}", payment.amount)),
            Cell::new(due),
        ]);
    }
    println!("{table}");
    println!("{} pending payments", pending.len());
}

pub fn print_recorded(tx: &Transaction) {
    let kind = match tx.kind {
        TransactionKind::Funding => "Funding".bright_cyan().to_string(),
        TransactionKind::Balance => "Balance".bright_cyan().to_string(),
        TransactionKind::Payment => "Payment".bright_cyan().to_string(),
    };
    println!(
        "{} {} recorded: ${:.2} (transaction {})",
        "✓".bright_green(),
        kind,
        tx.amount,
        tx.id.bright_yellow(),
    );
}

/// Render the validity line in its tone color
pub fn validity_line(validity: &Validity) -> String {
    let message = validity.message();
    match validity.tone() {
        Tone::Neutral => message.bright_black().to_string(),
        Tone::Success => message.bright_green().to_string(),
        Tone::Error => message.bright_red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_filter_case_insensitive() {
        assert!(matches_filter(&["Binance", "spot"], Some("NANCE")));
        assert!(!matches_filter(&["Binance"], Some("kraken")));
        assert!(matches_filter(&["anything"], None));
    }

    #[test]
    fn test_validity_line_carries_message() {
        let line = validity_line(&Validity::Invalid { difference: 20.0 });
        assert!(line.contains("20.00"));
    }
}
