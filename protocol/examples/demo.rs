//! Walkthrough of the SPECIE protocol lifecycle.
//!
//! Sets up a tiny game economy — a player wallet, a village shop, a guild
//! treasury — and narrates deposits, a purchase, a refused overdraft, and
//! the audit trail the executor leaves behind.
//!
//! Run with:
//!   cargo run --example demo

use std::sync::Arc;

use rust_decimal::Decimal;

use specie_protocol::account::{AccessLevel, Account};
use specie_protocol::asset::Asset;
use specie_protocol::balance::{Ledger, Receiver, Total};
use specie_protocol::party::PartyId;
use specie_protocol::report::MemorySink;
use specie_protocol::transaction::{Executor, Transaction, Transfer};

fn section(title: &str) {
    println!();
    println!("=== {title} ===");
}

fn main() {
    let gold = Asset::currency("gold").expect("static asset name");
    let alice = PartyId::player("alice").expect("static party name");
    let shop = PartyId::system("village-shop").expect("static party name");

    let sink = Arc::new(MemorySink::new());
    let executor = Executor::new(sink.clone());

    section("Funding a wallet");
    let wallet = Ledger::new();
    let receipt = executor.execute(
        &wallet,
        Transaction::give(gold.count(100), [alice.clone()]).with_note("quest reward"),
    );
    println!("{} -> success={}", receipt.transaction(), receipt.is_success());

    section("Buying a sword");
    let till = Ledger::new();
    let price = gold
        .worth(Decimal::new(275, 1))
        .expect("non-negative price"); // 27.5 gold
    match Transfer::new(&price, &wallet, &till).execute() {
        Ok(()) => println!("paid {price}"),
        Err(error) => println!("purchase failed: {error}"),
    }
    println!(
        "wallet now holds {}",
        wallet.total(&gold).expect("funded above")
    );

    section("An overdraft is refused");
    let receipt = executor.execute(
        &wallet,
        Transaction::take(gold.count(1_000), [alice.clone(), shop]),
    );
    println!(
        "{} -> success={} error={}",
        receipt.transaction(),
        receipt.is_success(),
        receipt.error().map(|e| e.to_string()).unwrap_or_default()
    );

    section("A guild treasury with graded access");
    let treasury = Account::new("guild-treasury", alice.clone()).expect("valid id");
    let recruit = PartyId::player("renn").expect("static party name");
    treasury
        .add(recruit.clone(), AccessLevel::Member)
        .expect("fresh participant");

    let recruit_view = treasury.view(&recruit).expect("enrolled above");
    recruit_view.give(&gold.count(10)).expect("members deposit");
    println!(
        "treasury holds {} after dues",
        recruit_view.total(&gold).expect("funded above")
    );

    let refused = executor.execute(&recruit_view, Transaction::take(gold.count(1), [recruit]));
    println!(
        "recruit withdrawal -> success={} ({})",
        refused.is_success(),
        refused.error().map(|e| e.to_string()).unwrap_or_default()
    );

    section("The audit trail");
    for receipt in sink.drain() {
        println!(
            "[{}] {} success={}",
            receipt.id(),
            receipt.transaction(),
            receipt.is_success()
        );
    }
}
