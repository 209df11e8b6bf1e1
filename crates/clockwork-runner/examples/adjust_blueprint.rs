//! Adjust clock speeds in a blueprint file pair on disk.
//!
//! Run with:
//! `cargo run -p clockwork-runner --example adjust_blueprint -- <dir> <name> "Refinery:2,Manufacturer:3.66" [output_name]`
//!
//! Set `CLOCKWORK_LOG=clockwork_core=debug` to see every machine touched.

use clockwork_runner::report::{describe_inventory, describe_machine, describe_report};
use clockwork_runner::{RunConfig, init_tracing, run};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("usage: adjust_blueprint <dir> <blueprint-name> <specs> [output-name]");
        std::process::exit(2);
    }

    let mut config = RunConfig::new(&args[0], &args[1], &args[2]);
    config.output_name = args.get(3).cloned();

    match run(&config) {
        Ok(summary) => {
            println!("Machines found:");
            for line in describe_inventory(&summary.adjustment) {
                println!("    {line}");
            }
            println!("Machine states:");
            for machine in &summary.adjustment.inventory {
                println!("    {}", describe_machine(machine));
            }
            println!("Adjustments:");
            for line in describe_report(&summary.adjustment) {
                println!("    {line}");
            }
            println!(
                "Wrote {} and {}",
                summary.output_main.display(),
                summary.output_config.display()
            );
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
