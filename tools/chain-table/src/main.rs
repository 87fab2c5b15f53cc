//! chain-table: prints the per-hop damage schedule of chain abilities.
//!
//! Usage:
//!   chain-table
//!   chain-table --abilities abilities.json --ability forked_bolt

use std::path::PathBuf;
use std::process;

use tempest_chain::decay;
use tempest_core::config::AbilityTable;
use tempest_core::policy::ChainPolicy;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    let table = match parse_flag(&args, "--abilities").map(PathBuf::from) {
        Some(path) => match AbilityTable::load_from_file(&path) {
            Ok(table) => {
                log::info!("loaded {} abilities from {}", table.len(), path.display());
                table
            }
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => AbilityTable::builtin(),
    };

    match parse_flag(&args, "--ability") {
        Some(name) => match table.get(&name) {
            Some(policy) => print_schedule(&name, policy),
            None => {
                eprintln!("Error: unknown ability {name:?}");
                process::exit(1);
            }
        },
        None => {
            if table.is_empty() {
                eprintln!("Error: ability table is empty");
                process::exit(1);
            }
            for (name, policy) in table.iter() {
                print_schedule(name, policy);
            }
        }
    }
}

fn print_usage() {
    eprintln!(
        "chain-table: TEMPEST chain ability damage schedules\n\
         \n\
           --abilities <path>  Ability table JSON (default: built-in lightning abilities)\n\
           --ability <name>    Print only this ability\n\
         \n\
         Examples:\n\
         \n\
           chain-table\n\
           chain-table --abilities abilities.json --ability forked_bolt\n"
    );
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn print_schedule(name: &str, policy: &ChainPolicy) {
    let kind = if policy.is_flat() { "flat" } else { "decaying" };
    println!(
        "{name}: {} hops, base {:.2}, decay {:.2} ({kind})",
        policy.max_hops, policy.base_damage, policy.decay_factor
    );
    for (hop, damage) in decay::schedule(policy).iter().enumerate() {
        println!("  hop {hop}: {damage:.4}");
    }
    println!("  total: {:.4}", decay::total_damage(policy));
}
