//! Output formatting for the CLI.

use console::style;
use grocer_core::cart::CartStore;
use grocer_core::catalog::{CatalogItem, StockState};
use grocer_core::orders::Order;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let template = ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(template);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// One catalog row: id, name, price (with the struck list price when on
    /// sale), category, then the stock badge.
    pub fn catalog_item(&self, item: &CatalogItem) {
        if self.json {
            return;
        }
        let price = match item.original_price {
            Some(list) if item.is_on_sale() => {
                format!("{} {}", item.price, style(list).dim().strikethrough())
            }
            _ => item.price.to_string(),
        };
        println!(
            "  {}  {:28}  {:10}  {:12}  {}",
            style(format!("{:14}", item.id.as_str())).cyan(),
            item.name,
            item.category.display_name(),
            price,
            stock_badge(item.stock)
        );
    }

    /// Lines, promotion and totals of a cart.
    pub fn cart(&self, cart: &CartStore) {
        if self.json {
            return;
        }
        if cart.is_empty() {
            self.info("Your cart is empty");
            return;
        }

        for line in cart.lines() {
            println!(
                "  {:28}  x{:<4}  {:16}  {}",
                line.item.name,
                line.quantity,
                style(line.substitution.display_name()).dim(),
                line.line_total()
            );
        }

        let totals = cart.totals();
        self.kv("subtotal", &totals.subtotal.to_string());
        if let Some(promo) = cart.promotion() {
            let label = format!("discount ({})", promo.code);
            self.kv(&label, &style(format!("-{}", totals.discount)).green().to_string());
        }
        let savings = totals.markdown_savings();
        if !savings.is_zero() {
            self.kv("you saved", &savings.to_string());
        }
        self.kv("total", &style(totals.total).bold().to_string());
    }

    /// A one-line order history entry.
    pub fn order(&self, order: &Order) {
        self.list_item(&format!(
            "{}  {}  {} item(s)  {}  {}  {}",
            style(order.short_ref()).cyan(),
            order.created_at().format("%Y-%m-%d %H:%M"),
            order.item_count(),
            order.total(),
            order.payment().display_name(),
            order.status().display_name()
        ));
    }
}

/// Colored stock label.
pub fn stock_badge(stock: StockState) -> String {
    let label = stock.display_name();
    match stock {
        StockState::Available => style(label).green().to_string(),
        StockState::Low => style(label).yellow().to_string(),
        StockState::Unavailable => style(label).red().to_string(),
    }
}
