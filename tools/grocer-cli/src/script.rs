//! Session script parsing.
//!
//! One action per line; blank lines and `#` comments are skipped.

use grocer_core::cart::SubstitutionPreference;
use grocer_core::orders::PaymentMethod;
use grocer_core::ItemId;
use thiserror::Error;

/// A storefront action issued by a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(ItemId),
    Remove(ItemId),
    Quantity(ItemId, i64),
    Substitute(ItemId, SubstitutionPreference),
    Promo(String),
    Unpromo,
    Clear,
    Wish(ItemId),
    Theme,
    Cart,
    Orders,
    Checkout(PaymentMethod),
    Ask(String),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    #[error("unknown action '{0}' (try 'help')")]
    UnknownAction(String),

    #[error("'{action}' expects {expected}")]
    MissingArgument {
        action: &'static str,
        expected: &'static str,
    },

    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    #[error("invalid substitution '{0}' (best-match, same-brand, none)")]
    InvalidSubstitution(String),

    #[error("invalid payment method '{0}' (card, upi, net-banking, wallet, cod)")]
    InvalidPayment(String),
}

pub const HELP: &[(&str, &str)] = &[
    ("add ID", "add one unit of an item"),
    ("remove ID", "remove an item's line"),
    ("qty ID N", "set quantity (0 or less removes)"),
    ("sub ID PREF", "best-match, same-brand or none"),
    ("promo CODE", "apply a promotion code"),
    ("unpromo", "remove the active promotion"),
    ("clear", "empty the cart"),
    ("wish ID", "toggle an item on the wishlist"),
    ("theme", "toggle dark mode"),
    ("cart", "show the cart"),
    ("orders", "show order history"),
    ("checkout [PAY]", "pay by card, upi, net-banking, wallet or cod"),
    ("ask TEXT", "message the support assistant"),
    ("quit", "end the session"),
];

/// Parse one line. Returns `Ok(None)` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<Action>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let action = match verb.to_ascii_lowercase().as_str() {
        "add" => Action::Add(item_arg(args.next(), "add")?),
        "remove" | "rm" => Action::Remove(item_arg(args.next(), "remove")?),
        "qty" => {
            let id = item_arg(args.next(), "qty")?;
            let raw = args.next().ok_or(ScriptError::MissingArgument {
                action: "qty",
                expected: "an item id and a quantity",
            })?;
            let qty = raw
                .parse::<i64>()
                .map_err(|_| ScriptError::InvalidQuantity(raw.to_string()))?;
            Action::Quantity(id, qty)
        }
        "sub" => {
            let id = item_arg(args.next(), "sub")?;
            let raw = args.next().ok_or(ScriptError::MissingArgument {
                action: "sub",
                expected: "an item id and a preference",
            })?;
            let pref = SubstitutionPreference::parse(raw)
                .ok_or_else(|| ScriptError::InvalidSubstitution(raw.to_string()))?;
            Action::Substitute(id, pref)
        }
        "promo" => {
            let code = args.next().ok_or(ScriptError::MissingArgument {
                action: "promo",
                expected: "a code",
            })?;
            Action::Promo(code.to_string())
        }
        "unpromo" => Action::Unpromo,
        "clear" => Action::Clear,
        "wish" => Action::Wish(item_arg(args.next(), "wish")?),
        "theme" => Action::Theme,
        "cart" => Action::Cart,
        "orders" => Action::Orders,
        "checkout" | "pay" => {
            let payment = match args.next() {
                Some(raw) => PaymentMethod::parse(raw)
                    .ok_or_else(|| ScriptError::InvalidPayment(raw.to_string()))?,
                None => PaymentMethod::default(),
            };
            Action::Checkout(payment)
        }
        "ask" => {
            if rest.is_empty() {
                return Err(ScriptError::MissingArgument {
                    action: "ask",
                    expected: "a message",
                });
            }
            Action::Ask(rest.to_string())
        }
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => return Err(ScriptError::UnknownAction(other.to_string())),
    };

    Ok(Some(action))
}

fn item_arg(arg: Option<&str>, action: &'static str) -> Result<ItemId, ScriptError> {
    arg.map(ItemId::from).ok_or(ScriptError::MissingArgument {
        action,
        expected: "an item id",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blanks_and_comments() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# warm-up"), Ok(None));
    }

    #[test]
    fn test_parses_actions() {
        assert_eq!(
            parse_line("add apple-1").unwrap(),
            Some(Action::Add(ItemId::new("apple-1")))
        );
        assert_eq!(
            parse_line("QTY milk -2").unwrap(),
            Some(Action::Quantity(ItemId::new("milk"), -2))
        );
        assert_eq!(
            parse_line("sub milk same-brand").unwrap(),
            Some(Action::Substitute(ItemId::new("milk"), SubstitutionPreference::SameBrand))
        );
        assert_eq!(
            parse_line("checkout").unwrap(),
            Some(Action::Checkout(PaymentMethod::Card))
        );
        assert_eq!(
            parse_line("pay cod").unwrap(),
            Some(Action::Checkout(PaymentMethod::CashOnDelivery))
        );
        assert_eq!(
            parse_line("ask  where is my   order?").unwrap(),
            Some(Action::Ask("where is my   order?".to_string()))
        );
    }

    #[test]
    fn test_reports_errors() {
        assert_eq!(
            parse_line("dance"),
            Err(ScriptError::UnknownAction("dance".to_string()))
        );
        assert!(matches!(
            parse_line("qty milk"),
            Err(ScriptError::MissingArgument { action: "qty", .. })
        ));
        assert_eq!(
            parse_line("qty milk lots"),
            Err(ScriptError::InvalidQuantity("lots".to_string()))
        );
        assert!(matches!(parse_line("sub milk any"), Err(ScriptError::InvalidSubstitution(_))));
        assert_eq!(
            parse_line("checkout iou"),
            Err(ScriptError::InvalidPayment("iou".to_string()))
        );
    }
}
