//! Show command - read a cached matrix back

use crate::cli::args::{OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::MatcacheResult;
use crate::matrix::MatrixRecord;
use crate::store::{read_matrix, CacheKeys, RedisConnector, StoreConnector};
use console::style;
use serde_json::json;

/// Execute the show command
pub async fn execute(args: ShowArgs, config: &Config) -> MatcacheResult<()> {
    let connector = RedisConnector::new(&args.cache.resolve(config))?;
    let store = connector.connect().await?;

    let keys = CacheKeys::from_data_key(args.key);
    let matrix = read_matrix(store.as_ref(), &keys).await?;

    match args.format {
        OutputFormat::Table => print_table(&keys, &matrix),
        OutputFormat::Json => print_json(&keys, &matrix)?,
        OutputFormat::Plain => print_plain(&matrix),
    }

    Ok(())
}

fn print_table(keys: &CacheKeys, matrix: &MatrixRecord) {
    println!(
        "{} {}",
        style(&keys.data).bold(),
        style(format!("({})", matrix.shape())).dim()
    );

    let width = matrix
        .data()
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    for row in matrix.iter_rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>width$}", v)).collect();
        println!("  {}", cells.join(" "));
    }
}

fn print_json(keys: &CacheKeys, matrix: &MatrixRecord) -> MatcacheResult<()> {
    let rows: Vec<&[i64]> = matrix.iter_rows().collect();
    let value = json!({
        "key": keys.data,
        "rows": matrix.rows(),
        "cols": matrix.cols(),
        "data": rows,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_plain(matrix: &MatrixRecord) {
    for row in matrix.iter_rows() {
        let cells: Vec<String> = row.iter().map(i64::to_string).collect();
        println!("{}", cells.join(" "));
    }
}
