//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod display;
pub mod formatters;
pub mod json;
pub mod table;

/// Render API models in the requested format.
///
/// Tables show the display row `D` of each model; JSON keeps the models
/// whole, custom fields included.
pub fn render<T, D>(items: &[T], format: OutputFormat) -> Result<String>
where
    T: Serialize,
    D: Tabled + for<'a> From<&'a T>,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<D> = items.iter().map(D::from).collect();
            Ok(table::format_table(&rows))
        }
        OutputFormat::Json => Ok(json::format_json(items)?),
    }
}

/// Render and print to stdout
pub fn print<T, D>(items: &[T], format: OutputFormat) -> Result<()>
where
    T: Serialize,
    D: Tabled + for<'a> From<&'a T>,
{
    println!("{}", render::<T, D>(items, format)?);
    Ok(())
}
