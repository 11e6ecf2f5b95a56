//! Shopping sessions.
//!
//! A session owns one storefront for its lifetime. Actions come from a
//! script file or an interactive prompt; each one mutates a store and the
//! session re-renders from the store's published snapshot.

use anyhow::{Context as _, Result};
use dialoguer::Input;
use grocer_core::cart::{CartLine, CartSnapshot};
use grocer_core::checkout::{CheckoutSimulator, GatewayStep, Pacing};
use grocer_core::orders::{Order, PaymentMethod};
use grocer_core::support::ChatMessage;
use grocer_core::{ItemId, Storefront};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use super::SessionArgs;
use crate::context::Context;
use crate::script::{self, Action, HELP};

/// Whether the session keeps reading actions.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Serialize)]
struct SessionSummary<'a> {
    cart: CartSnapshot,
    orders: Vec<&'a Order>,
    wishlist: &'a [ItemId],
    dark_theme: bool,
    transcript: &'a [ChatMessage],
}

struct Session<'a> {
    ctx: &'a Context,
    store: Storefront,
    checkout: CheckoutSimulator,
    cart_rx: watch::Receiver<CartSnapshot>,
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let pacing = if args.fast {
        Pacing::instant()
    } else {
        ctx.config.pacing()
    };
    let mut session = Session::new(ctx, pacing)?;

    match args.script {
        Some(path) => session.run_script(&ctx.resolve_path(&path), args.strict).await?,
        None => session.run_interactive().await?,
    }

    if ctx.output.is_json() {
        ctx.output.json(&session.summary());
    }

    Ok(())
}

impl<'a> Session<'a> {
    fn new(ctx: &'a Context, pacing: Pacing) -> Result<Self> {
        let store = ctx.storefront()?;
        let cart_rx = store.cart().subscribe();
        Ok(Self {
            ctx,
            store,
            checkout: CheckoutSimulator::new(pacing),
            cart_rx,
        })
    }

    async fn run_script(&mut self, path: &std::path::Path, strict: bool) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        info!(script = %path.display(), strict, "running session script");

        for (idx, line) in content.lines().enumerate() {
            let lineno = idx + 1;
            match self.step(line).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) if strict => {
                    return Err(e.context(format!("{}:{}", path.display(), lineno)));
                }
                Err(e) => self
                    .ctx
                    .output
                    .warn(&format!("line {}: {:#}", lineno, e)),
            }
        }

        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        self.ctx
            .output
            .info("Type 'help' for actions, 'quit' to leave");

        loop {
            let line: String = Input::new()
                .with_prompt("grocer")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read input")?;

            match self.step(&line).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) => self.ctx.output.error(&format!("{:#}", e)),
            }
        }

        Ok(())
    }

    async fn step(&mut self, line: &str) -> Result<Flow> {
        let Some(action) = script::parse_line(line)? else {
            return Ok(Flow::Continue);
        };
        debug!(?action, "applying action");
        let flow = self.apply(action).await?;
        self.observe_cart();
        Ok(flow)
    }

    async fn apply(&mut self, action: Action) -> Result<Flow> {
        let ctx = self.ctx;
        let out = &ctx.output;

        match action {
            Action::Add(id) => {
                let qty = self.store.add_to_cart(&id)?;
                out.success(&format!("{} x{}", self.item_name(&id), qty));
            }
            Action::Remove(id) => {
                if self.store.cart_mut().remove_item(&id) {
                    out.success(&format!("Removed {}", self.item_name(&id)));
                } else {
                    out.warn(&format!("{} is not in the cart", id));
                }
            }
            Action::Quantity(id, qty) => {
                if self.store.cart_mut().set_quantity(&id, qty) {
                    let name = self.item_name(&id);
                    out.success(&quantity_feedback(&name, self.store.cart().line(&id)));
                } else {
                    out.warn(&format!("{} is not in the cart", id));
                }
            }
            Action::Substitute(id, pref) => {
                if self.store.cart_mut().set_substitution(&id, pref) {
                    out.success(&format!("{}: {}", self.item_name(&id), pref.display_name()));
                } else {
                    out.warn(&format!("{} is not in the cart", id));
                }
            }
            Action::Promo(code) => {
                if self.store.cart_mut().apply_promotion(&code) {
                    if let Some(promo) = self.store.cart().promotion() {
                        out.success(&format!("Applied {}: {}", promo.code, promo.description));
                    }
                } else {
                    out.warn(&format!("Promo code not recognized: {}", code));
                }
            }
            Action::Unpromo => {
                self.store.cart_mut().clear_promotion();
                out.success("Promotion removed");
            }
            Action::Clear => {
                self.store.cart_mut().clear();
                out.success("Cart cleared");
            }
            Action::Wish(id) => {
                let present = self.store.toggle_wishlist(&id)?;
                let name = self.item_name(&id);
                if present {
                    out.success(&format!("Saved {} to wishlist", name));
                } else {
                    out.success(&format!("Removed {} from wishlist", name));
                }
            }
            Action::Theme => {
                let dark = self.store.theme_mut().toggle();
                out.info(if dark { "Dark mode on" } else { "Dark mode off" });
            }
            Action::Cart => self.show_cart(),
            Action::Orders => self.show_orders(),
            Action::Checkout(payment) => self.place_order(payment).await?,
            Action::Ask(text) => {
                if let Some(reply) = self.store.support_mut().send(&text) {
                    out.info(&format!("Orbit AI: {}", reply.text));
                }
            }
            Action::Help => {
                for &(usage, what) in HELP {
                    out.table_row(&[usage, what], &[14, 40]);
                }
            }
            Action::Quit => return Ok(Flow::Stop),
        }

        Ok(Flow::Continue)
    }

    async fn place_order(&mut self, payment: PaymentMethod) -> Result<()> {
        let total = self.store.cart().totals().total;
        let spinner = self
            .ctx
            .output
            .spinner(&format!("Paying {} by {}", total, payment.display_name()));

        let steps = GatewayStep::ALL.len();
        let result = self
            .checkout
            .clone()
            .with_payment(payment)
            .run(&mut self.store, |step| {
                spinner.set_message(format!("[{}/{}] {}", step.number(), steps, step.label()));
            })
            .await;
        spinner.finish_and_clear();

        let order = result?;
        self.ctx.output.success(&format!(
            "Order {} placed: {} item(s), {}",
            order.short_ref(),
            order.item_count(),
            order.total()
        ));
        Ok(())
    }

    fn show_cart(&self) {
        self.ctx.output.header("Cart");
        self.ctx.output.cart(self.store.cart());
    }

    fn show_orders(&self) {
        let out = &self.ctx.output;
        out.header("Orders");
        if self.store.orders().is_empty() {
            out.info("No orders yet");
            return;
        }
        for order in self.store.orders().orders() {
            out.order(order);
        }
    }

    /// Report the latest cart snapshot when it changed since the last action.
    fn observe_cart(&mut self) {
        if !self.cart_rx.has_changed().unwrap_or(false) {
            return;
        }
        let snapshot = self.cart_rx.borrow_and_update();
        self.ctx.output.debug(&format!(
            "cart: {} line(s), total {}",
            snapshot.lines.len(),
            snapshot.totals.total
        ));
    }

    fn item_name(&self, id: &ItemId) -> String {
        self.store
            .catalog()
            .get(id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn summary(&self) -> SessionSummary<'_> {
        SessionSummary {
            cart: self.store.cart().snapshot(),
            orders: self.store.orders().orders().iter().map(|o| o.as_ref()).collect(),
            wishlist: self.store.wishlist().ids(),
            dark_theme: self.store.theme().is_dark(),
            transcript: self.store.support().messages(),
        }
    }
}

/// Report the stored quantity, which may differ from the request after clamping.
fn quantity_feedback(name: &str, line: Option<&CartLine>) -> String {
    match line {
        Some(line) => format!("{} quantity set to {}", name, line.quantity),
        None => format!("Removed {}", name),
    }
}
