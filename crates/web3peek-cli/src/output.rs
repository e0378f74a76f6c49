//! Output formatting utilities.
//!
//! Every renderer returns a `String` so commands can be tested without
//! capturing stdout; `main` does the printing.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};
use web3peek_client::ProbeReport;
use web3peek_types::{units, Address, Block, U256};

const RULE_WIDTH: usize = 50;

/// Chain facts shown by `web3peek network`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub client_version: String,
    pub chain_id: u64,
    pub network_id: String,
    pub block_number: u64,
}

/// One row of `web3peek accounts --balances`.
#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub address: Address,
    pub balance: U256,
}

/// Pretty JSON for `--json`.
pub fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

/// Connectivity line.
pub fn render_connected(url: &str, connected: bool) -> String {
    let flag = if connected {
        "true".green()
    } else {
        "false".red()
    };
    format!("Connected:    {} ({})\n", flag, url)
}

/// Format a unix timestamp with its UTC calendar time.
pub fn format_timestamp(ts: u64) -> String {
    match i64::try_from(ts)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
    {
        Some(dt) => format!("{} ({})", ts, dt.format("%Y-%m-%d %H:%M:%S UTC")),
        None => ts.to_string(),
    }
}

/// Block info.
pub fn render_block(block: &Block) -> String {
    let mut out = String::new();
    heading(&mut out, "Block Information");

    let number = block
        .number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "pending".to_string());
    let _ = writeln!(out, "Number:       {}", number.bright_green());

    if let Some(hash) = &block.hash {
        let _ = writeln!(out, "Hash:         {}", hash.to_string().bright_cyan());
    }
    let _ = writeln!(out, "Parent Hash:  {}", block.parent_hash);
    if let Some(miner) = &block.miner {
        let _ = writeln!(out, "Miner:        {}", miner);
    }
    let _ = writeln!(
        out,
        "Timestamp:    {}",
        format_timestamp(block.timestamp).bright_yellow()
    );
    let _ = writeln!(
        out,
        "Gas Used:     {} / {} ({:.2}%)",
        block.gas_used,
        block.gas_limit,
        block.gas_used_ratio()
    );
    if let Some(base_fee) = &block.base_fee_per_gas {
        let _ = writeln!(
            out,
            "Base Fee:     {} gwei",
            units::format_units(base_fee, units::GWEI_DECIMALS)
        );
    }
    let _ = writeln!(out, "Difficulty:   {}", block.difficulty);
    if let Some(size) = block.size {
        let _ = writeln!(out, "Size:         {} bytes", size);
    }
    let _ = writeln!(out, "State Root:   {}", block.state_root);
    let _ = writeln!(
        out,
        "Transactions: {}",
        block.transaction_count().to_string().bright_magenta()
    );
    for hash in block.transactions.hashes() {
        let _ = writeln!(out, "  - {}", hash);
    }
    if !block.uncles.is_empty() {
        let _ = writeln!(out, "Uncles:       {}", block.uncles.len());
    }

    out
}

/// Account address list.
pub fn render_accounts(accounts: &[Address]) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Accounts ({})", accounts.len()));

    if accounts.is_empty() {
        let _ = writeln!(out, "{}", "No accounts exposed by the node".yellow());
    }
    for (i, account) in accounts.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", i, account.to_string().bright_cyan());
    }

    out
}

/// Balance table.
pub fn render_balances(balances: &[AccountBalance]) -> String {
    #[derive(Tabled)]
    struct BalanceRow {
        #[tabled(rename = "#")]
        index: usize,
        address: String,
        #[tabled(rename = "balance (ETH)")]
        balance: String,
    }

    let rows: Vec<BalanceRow> = balances
        .iter()
        .enumerate()
        .map(|(index, row)| BalanceRow {
            index,
            address: row.address.to_string(),
            balance: units::format_ether(&row.balance),
        })
        .collect();

    format!("{}\n", Table::new(rows))
}

/// Network info.
pub fn render_network(info: &NetworkInfo) -> String {
    let mut out = String::new();
    heading(&mut out, "Network Information");
    let _ = writeln!(out, "Client:        {}", info.client_version);
    let _ = writeln!(out, "Chain ID:      {}", info.chain_id.to_string().bright_green());
    let _ = writeln!(out, "Network ID:    {}", info.network_id);
    let _ = writeln!(out, "Block Number:  {}", info.block_number.to_string().bright_cyan());
    out
}

/// Full probe output: connectivity, head block, accounts.
pub fn render_probe(url: &str, report: &ProbeReport) -> String {
    let mut out = render_connected(url, report.connected);
    out.push('\n');
    out.push_str(&render_block(&report.block));
    out.push('\n');
    out.push_str(&render_accounts(&report.accounts));
    out
}

/// Success line.
pub fn success(msg: &str) -> String {
    format!("{}\n", format!("✓ {}", msg).green())
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("Error: {}", msg).red());
}
