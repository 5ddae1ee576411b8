//! Output formatting for the eco CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Compact text format
    Text,
}

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format as a table row
    fn table_headers() -> Vec<String>;
    fn table_row(&self) -> Vec<String>;

    /// Format as key-value pairs for detailed view
    fn key_value_pairs(&self) -> Vec<(String, String)>;
}

/// Output formatter
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// JSON and YAML print one document per command
    pub fn is_structured(&self) -> bool {
        matches!(self.format, OutputFormat::Json | OutputFormat::Yaml)
    }

    /// Print any serializable value in a machine format.
    ///
    /// Human formats fall back to pretty JSON.
    pub fn print_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        match self.format {
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
            _ => println!("{}", serde_json::to_string_pretty(value)?),
        }
        Ok(())
    }

    /// Format and print a single item
    pub fn print_item<T>(&self, item: &T) -> Result<()>
    where
        T: Serialize + Formattable,
    {
        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => self.print_value(item)?,
            OutputFormat::Table => {
                for (key, value) in item.key_value_pairs() {
                    println!("{}: {}", key.bold().cyan(), value);
                }
            }
            OutputFormat::Text => {
                for (key, value) in item.key_value_pairs() {
                    println!("{}: {}", key, value);
                }
            }
        }
        Ok(())
    }

    /// Format and print a list of items
    pub fn print_list<T>(&self, items: &[T]) -> Result<()>
    where
        T: Serialize + Formattable,
    {
        if items.is_empty() {
            match self.format {
                OutputFormat::Json | OutputFormat::Yaml => println!("[]"),
                OutputFormat::Table | OutputFormat::Text => {
                    println!("{}", "No items found".dimmed());
                }
            }
            return Ok(());
        }

        match self.format {
            OutputFormat::Json | OutputFormat::Yaml => self.print_value(items)?,
            OutputFormat::Table => self.print_table(items),
            OutputFormat::Text => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    for (key, value) in item.key_value_pairs() {
                        println!("{}: {}", key, value);
                    }
                }
            }
        }
        Ok(())
    }

    fn print_table<T: Formattable>(&self, items: &[T]) {
        let mut table = styled_table();
        table.set_header(header_cells(&T::table_headers()));

        for item in items {
            table.add_row(item.table_row());
        }

        println!("{}", table);
    }

    /// Print a labelled square matrix; `None` cells render as `n/a`
    pub fn print_matrix(&self, labels: &[&str], rows: &[[Option<f64>; 3]]) {
        let render = |cell: &Option<f64>| match cell {
            Some(v) => format!("{:.3}", v),
            None => "n/a".to_string(),
        };

        match self.format {
            OutputFormat::Table => {
                let mut headers = vec![String::new()];
                headers.extend(labels.iter().map(|l| l.to_string()));

                let mut table = styled_table();
                table.set_header(header_cells(&headers));
                for (label, row) in labels.iter().zip(rows) {
                    let mut cells = vec![label.to_string()];
                    cells.extend(row.iter().map(render));
                    table.add_row(cells);
                }
                println!("{}", table);
            }
            _ => {
                for (label, row) in labels.iter().zip(rows) {
                    let cells: Vec<String> = row.iter().map(render).collect();
                    println!("{}: {}", label, cells.join(" "));
                }
            }
        }
    }

    /// Print a section heading (human formats only)
    pub fn print_heading(&self, title: &str) {
        match self.format {
            OutputFormat::Table => println!("\n{}", title.bold().underline()),
            OutputFormat::Text => println!("\n== {} ==", title),
            _ => {}
        }
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let result = serde_json::json!({
                    "status": "success",
                    "message": message
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Yaml => {
                println!("status: success");
                println!("message: {}", message);
            }
            OutputFormat::Table | OutputFormat::Text => {
                println!("{} {}", "✓".green().bold(), message.green());
            }
        }
        Ok(())
    }

    /// Print a success message with the item it refers to.
    ///
    /// Structured formats emit one document carrying the item under `item`.
    pub fn print_success_with<T>(&self, message: &str, item: &T) -> Result<()>
    where
        T: Serialize + Formattable,
    {
        if self.is_structured() {
            return self.print_value(&success_document(message, item)?);
        }
        self.print_success(message)?;
        self.print_item(item)
    }

    /// Print an info message (human formats only)
    pub fn print_info(&self, message: &str) {
        if !self.is_structured() {
            println!("{} {}", "ℹ".blue().bold(), message.blue());
        }
    }
}

fn success_document<T: Serialize>(message: &str, item: &T) -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "status": "success",
        "message": message,
        "item": serde_json::to_value(item)?,
    }))
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cells(headers: &[String]) -> Vec<Cell> {
    headers
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect()
}

/// Format a value that is already a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a mass in grams, switching to kilograms at 1 kg
pub fn format_grams(grams: f64) -> String {
    if grams.abs() >= 1000.0 {
        format!("{:.3} kg", grams / 1000.0)
    } else {
        format!("{:.3} g", grams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestItem {
        name: String,
        value: i32,
    }

    impl Formattable for TestItem {
        fn table_headers() -> Vec<String> {
            vec!["Name".to_string(), "Value".to_string()]
        }

        fn table_row(&self) -> Vec<String> {
            vec![self.name.clone(), self.value.to_string()]
        }

        fn key_value_pairs(&self) -> Vec<(String, String)> {
            vec![
                ("Name".to_string(), self.name.clone()),
                ("Value".to_string(), self.value.to_string()),
            ]
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_structured_formats() {
        assert!(OutputFormatter::new(OutputFormat::Json).is_structured());
        assert!(OutputFormatter::new(OutputFormat::Yaml).is_structured());
        assert!(!OutputFormatter::new(OutputFormat::Table).is_structured());
        assert!(!OutputFormatter::new(OutputFormat::Text).is_structured());
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(25.0), "25.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
    }

    #[test]
    fn test_format_grams() {
        assert_eq!(format_grams(3.0), "3.000 g");
        assert_eq!(format_grams(120285.0), "120.285 kg");
    }

    #[test]
    fn test_print_paths_do_not_fail() {
        let items = vec![TestItem { name: "a".to_string(), value: 1 }];
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Yaml, OutputFormat::Text] {
            let formatter = OutputFormatter::new(format);
            assert!(formatter.print_list(&items).is_ok());
            assert!(formatter.print_item(&items[0]).is_ok());
            assert!(formatter.print_list::<TestItem>(&[]).is_ok());
        }
    }

    #[test]
    fn test_success_document_wraps_item() {
        let item = TestItem { name: "eco.yaml".to_string(), value: 7 };
        let doc = success_document("Configuration is valid", &item).unwrap();

        assert_eq!(doc["status"], "success");
        assert_eq!(doc["message"], "Configuration is valid");
        assert_eq!(doc["item"]["value"], 7);

        let formatter = OutputFormatter::new(OutputFormat::Json);
        assert!(formatter.print_success_with("ok", &item).is_ok());
    }

    #[test]
    fn test_formattable_trait() {
        let item = TestItem { name: "test".to_string(), value: 42 };
        assert_eq!(TestItem::table_headers(), vec!["Name", "Value"]);
        assert_eq!(item.table_row(), vec!["test", "42"]);
        assert_eq!(item.key_value_pairs()[0], ("Name".to_string(), "test".to_string()));
    }
}
