//! Print the error classification tables

use anyhow::Result;
use clap::Parser;
use dbnorm_core::{Driver, ErrorKind};
use serde::Serialize;

#[derive(Parser, Debug)]
pub struct CodesArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CodeRow {
    driver: Driver,
    code: &'static str,
    kind: ErrorKind,
}

/// `driver` limits output to one driver; `None` prints all of them.
pub fn run_codes(driver: Option<&str>, args: CodesArgs) -> Result<()> {
    let drivers = match driver {
        Some(name) => vec![name.parse::<Driver>()?],
        None => Driver::ALL.to_vec(),
    };

    let rows: Vec<CodeRow> = drivers
        .into_iter()
        .flat_map(|driver| {
            driver
                .error_codes()
                .iter()
                .map(move |&(code, kind)| CodeRow { driver, code, kind })
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<10} {:<8} KIND", "DRIVER", "CODE");
    for row in &rows {
        println!("{:<10} {:<8} {}", row.driver, row.code, row.kind.as_str());
    }
    println!("(any other database error code: {})", ErrorKind::Other.as_str());
    Ok(())
}
