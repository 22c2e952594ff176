use base64::{engine::general_purpose, Engine};
use clap::Parser;
use collector::{commands::Commands, system::run_collector};
use log::info;

mod collector;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML collector
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Base64 encoded TOML file
    #[clap(short, long, value_parser)]
    data: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let args = Args::parse();
    println!("[ishinobu] Starting ishinobu collection!");

    // Stop walking on interrupt but still finish any output already written
    if let Err(err) = ctrlc::set_handler(|| {
        println!("[ishinobu] Interrupt received, stopping collection");
        ishinobu_core::core::cancel_collection();
    }) {
        println!("[ishinobu] Failed to set interrupt handler: {err:?}");
    }

    if let Some(toml) = args.toml {
        if !toml.is_empty() {
            let collection_results = ishinobu_core::core::parse_toml_file(&toml);
            match collection_results {
                Ok(_) => info!("[ishinobu] Collection success"),
                Err(err) => {
                    println!("[ishinobu] Failed to collect artifacts: {err:?}");
                    return;
                }
            }
        }
    } else if let Some(data) = args.data {
        if !data.is_empty() {
            let toml_data = match general_purpose::STANDARD.decode(&data) {
                Ok(results) => results,
                Err(err) => {
                    println!(
                        "[ishinobu] Failed to base64 decode TOML collector {data}, error: {err:?}",
                    );
                    return;
                }
            };
            let collection_results = ishinobu_core::core::parse_toml_data(&toml_data);
            match collection_results {
                Ok(_) => info!("[ishinobu] Collection success"),
                Err(err) => {
                    println!("[ishinobu] Failed to collect artifacts: {err:?}");
                    return;
                }
            }
        }
    } else if let Some(command) = args.command {
        if let Err(err) = run_collector(&command) {
            println!("[ishinobu] Failed to collect artifacts: {err:?}");
            return;
        }
    } else {
        println!("[ishinobu] No TOML file, data, or command provided!");
        return;
    }
    println!("[ishinobu] Finished ishinobu collection!");
}
