//! CLI tool for xltab - decodes XLSX files and outputs render grids
//!
//! Usage:
//!   xltab_cli <input.xlsx>                    # Render grids as JSON to stdout
//!   xltab_cli <input.xlsx> --html             # Standalone HTML document to stdout
//!   xltab_cli <input.xlsx> --html -o out.html # Write output to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use xltab::grid::normalize;
use xltab::parser::decode;
use xltab::view::document_html;
use xltab::RenderGrid;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: xltab_cli <input.xlsx> [--html] [-o output]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let html = args.iter().any(|a| a == "--html");
    let output_path = args
        .iter()
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 1));

    // Read input file
    let data = match fs::read(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Decode and normalize
    let workbook = match decode(&data) {
        Ok(wb) => wb,
        Err(e) => {
            eprintln!("Error decoding {}: {}", input_path, e);
            std::process::exit(1);
        }
    };
    let grids: Vec<RenderGrid> = workbook.sheets.iter().map(normalize).collect();

    let output = if html {
        document_html(&grids, 0)
    } else {
        match serde_json::to_string_pretty(&grids) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing JSON: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(output.as_bytes()).unwrap();
            println!();
        }
    }
}
