//! # Machine Simulator
//!
//! Runs a scripted session against a freshly configured machine and prints
//! what happened. Used during development to eyeball engine behaviour and
//! log output without a front end.
//!
//! ## Usage
//! ```bash
//! # Default machine, default script
//! cargo run -p vend-engine --bin simulate
//!
//! # Custom machine config, debug logging
//! cargo run -p vend-engine --bin simulate -- --config ./machine.toml --verbose
//!
//! # Print the final transaction summary as JSON
//! cargo run -p vend-engine --bin simulate -- --json
//! ```
//!
//! ## Script
//! 1. Load a float into the register
//! 2. Single sales (exact, with change, with rejected change)
//! 3. Named and custom bundles, including a refused lone ingredient
//! 4. Restock, collect, summary

use std::env;
use std::path::PathBuf;

use vend_core::{Denomination, Item, Money, SaleReceipt, SaleResult, Tender};
use vend_engine::{BundleCatalog, BundleEngine, BundleOrder, InventoryEngine, MachineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut json = false;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" | "-j" => json = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                println!("Halo Vend Machine Simulator");
                println!();
                println!("Usage: simulate [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Machine config file (default: platform config dir)");
                println!("  -j, --json           Print the final summary as JSON");
                println!("  -v, --verbose        Debug logging (unless RUST_LOG is set)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    vend_engine::logging::init(verbose);

    let mut config = MachineConfig::load(config_path)?;
    if config.float.is_empty() {
        config.set_float(Denomination::ONE, 20);
        config.set_float(Denomination::FIVE, 10);
        config.set_float(Denomination::TEN, 10);
        config.set_float(Denomination::TWENTY, 5);
    }

    let mut machine = InventoryEngine::from_config(&config)?;
    let catalog = BundleCatalog::standard();

    println!("Halo Vend Simulator");
    println!("===================");
    println!("Float: {}", machine.register().balance());
    println!();
    print_slots(&machine);

    // Single sales
    println!();
    println!("Single sales");
    println!("------------");
    if let Some(slot) = machine.find_slot_by_name("Red Bean") {
        let due = machine.quote(slot, 2)?;
        report("2 × Red Bean, exact", machine.sell(slot, 2, due, due));
    }
    if let Some(slot) = machine.find_slot_by_name("Banana") {
        let tender = Tender::new().with(Denomination::TWENTY, 1);
        report("1 × Banana, PHP 20 bill", machine.purchase(slot, 1, &tender));
    }
    if let Some(slot) = machine.find_slot_by_name("Ube Ice Cream") {
        let tender = Tender::new().with(Denomination::FIVE_HUNDRED, 1);
        report("1 × Ube Ice Cream, PHP 500 bill", machine.purchase(slot, 1, &tender));
    }

    // Bundles
    println!();
    println!("Bundles");
    println!("-------");
    {
        let mut bundles = BundleEngine::new(&mut machine, &catalog);

        let tender = Tender::new().with(Denomination::ONE_HUNDRED, 1).with(Denomination::TWENTY, 2);
        report(
            "halo halo, PHP 140",
            bundles.checkout_with_tender(&BundleOrder::Named("halo halo".into()), &tender),
        );
        report(
            "red bean milk tea, exact",
            bundles.checkout_named("red bean milk tea", Money::from_pesos(20)),
        );
        report("sinigang", bundles.checkout_named("sinigang", Money::from_pesos(100)));
    }
    if let (Some(jackfruit), Some(banana)) = (
        machine.find_slot_by_name("Jackfruit"),
        machine.find_slot_by_name("Banana"),
    ) {
        let mut bundles = BundleEngine::new(&mut machine, &catalog);
        report(
            "custom: Jackfruit × 2",
            bundles.checkout_custom(&[jackfruit, jackfruit], Money::from_pesos(20)),
        );
        let due = bundles.quote(&BundleOrder::Custom(vec![jackfruit, banana]))?;
        report(
            "custom: Jackfruit + Banana",
            bundles.checkout_custom(&[jackfruit, banana], due),
        );
    }

    // Maintenance
    println!();
    println!("Maintenance");
    println!("-----------");
    if let Some(slot) = machine.find_slot_by_name("Red Bean") {
        let item = Item::new("Red Bean", Money::from_pesos(5), 50.0);
        match machine.restock(slot, item.clone(), 5) {
            Ok(()) => println!("✓ Restocked Red Bean (+5)"),
            Err(e) => println!("✗ Restock Red Bean (+5): {}", e),
        }
        match machine.restock(slot, item, 5) {
            Ok(()) => println!("✓ Restocked Red Bean (+5)"),
            Err(e) => println!("✗ Restock Red Bean (+5): {}", e),
        }
    }
    println!("Collected: {}", machine.collect());
    println!("Register:  {}", machine.register().balance());
    println!("Lifetime:  {}", machine.ledger().lifetime_sales());

    // Summary
    println!();
    let summary = machine.transaction_summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Sold since start");
        println!("----------------");
        for line in &summary.lines {
            println!("{:<16} {:>3}", line.item_name, line.quantity_sold);
        }
        println!("Uncollected: {}", summary.total_sales);
    }

    Ok(())
}

fn print_slots(machine: &InventoryEngine) {
    for view in machine.list_slots() {
        match &view.item {
            Some(item) => println!(
                "[{}] {:<16} {:>12}  {:>2}/{}",
                view.index,
                item.name(),
                item.unit_price().to_string(),
                view.quantity,
                view.capacity
            ),
            None => println!("[{}] (empty)", view.index),
        }
    }
}

fn report(label: &str, result: SaleResult<SaleReceipt>) {
    match result {
        Ok(receipt) => {
            println!(
                "✓ {}: paid {}, total {}, change {}, {} kcal",
                label,
                receipt.amount_paid,
                receipt.total_price,
                receipt.change.total(),
                receipt.total_calories
            );
            for step in &receipt.preparation {
                println!("    {}", step);
            }
        }
        Err(e) => println!("✗ {}: {}", label, e),
    }
}
