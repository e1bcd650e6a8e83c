pub mod config;
pub mod info;
pub mod render;

use anyhow::{bail, Context, Result};

/// Parse exactly `N` comma-separated numbers, e.g. `10,20` or `0,0,50,60`.
pub fn parse_numbers<const N: usize>(value: &str, what: &str) -> Result<[f64; N]> {
    let parsed = value
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid {what} format: {value}"))?;
    match <[f64; N]>::try_from(parsed) {
        Ok(numbers) => Ok(numbers),
        Err(v) => bail!("Expected {N} values for {what}, got {}", v.len()),
    }
}
