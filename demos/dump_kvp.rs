//! Parse KVP files named on the command line and dump their entries.
//!
//! The character encoding is sniffed from the file bytes (accepted above
//! 0.9 confidence, UTF-8 otherwise).
//!
//! Run with: cargo run --example dump_kvp -- settings.kvp

use kvp_text::from_file;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: dump_kvp <file>...");
        std::process::exit(2);
    }

    for path in paths {
        println!("##### {path}");
        let map = from_file(&path, None)?;
        for (key, value) in map.iter() {
            println!("{key} = {value}");
        }
    }

    Ok(())
}
