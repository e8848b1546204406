//! Command-line configuration.

use std::path::PathBuf;

/// Immutable startup options parsed from argv.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the instruction listing to load.
    pub listing_path: PathBuf,
    /// Function to set as main before the first draw, as if the user had
    /// typed `main <name>` in the console.
    pub main_function: Option<String>,
}

impl Config {
    /// Parse `<listing> [--main <function>]`. Returns a usage message on
    /// missing or unknown arguments.
    pub fn from_args<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let listing_path = match args.next() {
            Some(path) => PathBuf::from(path),
            None => return Err("no input file provided".to_string()),
        };

        let mut main_function = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--main" => match args.next() {
                    Some(name) => main_function = Some(name),
                    None => return Err("--main requires a function name".to_string()),
                },
                other => return Err(format!("unknown argument '{}'", other)),
            }
        }

        Ok(Config {
            listing_path,
            main_function,
        })
    }
}
