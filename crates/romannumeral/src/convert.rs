use crate::prelude::{println, *};
use colored::Colorize;
use romannumeral_core::convert_input;

#[derive(Debug, clap::Parser)]
#[command(name = "convert")]
#[command(about = "Convert a number to its Roman numeral")]
pub struct App {
    /// Number to convert (1 to 3999)
    #[arg(value_name = "NUMBER")]
    pub number: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Converting {}...", app.number);
    }

    let result = convert_input(&app.number).map_err(Error::Validation)?;

    if app.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let mut table = new_table();
        table.add_row(prettytable::row!["Input".bold(), result.input]);
        table.add_row(prettytable::row!["Output".bold(), result.output]);
        table.printstd();
    }

    Ok(())
}
