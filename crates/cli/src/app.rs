//! Shop session: one cart engine plus the notifications it publishes.

use std::io::Write;
use std::sync::Arc;

use slumber_cart::{CartEngine, CheckoutOutcome, Effect, NoChange, NotificationEnvelope, Outcome};
use slumber_catalog::{CatalogLookup, StaticCatalog};
use slumber_core::Locale;
use slumber_events::{EventBus, InMemoryEventBus, Subscription};
use slumber_storage::FileStore;

use crate::cli::Command;
use crate::config::Config;
use crate::render;

type NotificationBus = Arc<InMemoryEventBus<NotificationEnvelope>>;

/// Cart engine wired the way the CLI runs it.
pub type ShopEngine = CartEngine<StaticCatalog, FileStore, NotificationBus>;

pub struct Shop {
    engine: ShopEngine,
    notifications: Subscription<NotificationEnvelope>,
    locale: Locale,
    load_issue_reported: bool,
}

impl Shop {
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let catalog = config.load_catalog()?;
        tracing::debug!(data_dir = ?config.data_dir, products = catalog.len(), "opening shop");
        Ok(Self::new(catalog, FileStore::new(&config.data_dir), config.locale))
    }

    pub fn new(catalog: StaticCatalog, storage: FileStore, locale: Locale) -> Self {
        let bus: NotificationBus = Arc::new(InMemoryEventBus::new());
        let notifications = bus.subscribe();
        Self {
            engine: CartEngine::open(catalog, storage, bus),
            notifications,
            locale,
            load_issue_reported: false,
        }
    }

    pub fn engine(&self) -> &ShopEngine {
        &self.engine
    }

    /// Execute one command, writing everything the user should see to `out`.
    ///
    /// `confirm` is asked before destructive operations unless `--yes` was given.
    pub fn run<W>(&mut self, command: &Command, out: &mut W, confirm: &mut dyn FnMut(&str) -> bool) -> anyhow::Result<()>
    where
        W: Write,
    {
        if !self.load_issue_reported {
            self.load_issue_reported = true;
            if let Some(issue) = self.engine.load_issue() {
                writeln!(out, "warning: {issue}")?;
            }
        }

        match command {
            Command::Products { category } => {
                let products = self.engine.catalog().filter_by_category(*category);
                if products.is_empty() {
                    writeln!(out, "No products")?;
                }
                for product in products {
                    writeln!(out, "{}", render::product_row(product, self.locale))?;
                }
            }
            Command::Show { id } => {
                let product = self.engine.catalog().require(*id)?;
                write!(out, "{}", render::product_detail(product, self.locale))?;
            }
            Command::Add { id } => {
                let outcome = self.engine.add_to_cart(*id);
                report(&outcome, out)?;
            }
            Command::Remove { id } => {
                let outcome = self.engine.remove_from_cart(*id);
                report(&outcome, out)?;
            }
            Command::Cart => {
                let panel = render::cart_panel(
                    &self.engine.items(),
                    self.engine.count(),
                    self.engine.total(),
                    self.locale,
                );
                write!(out, "{panel}")?;
            }
            Command::Clear { yes } => {
                let yes = *yes;
                let outcome = self.engine.clear_cart(|prompt| yes || confirm(prompt));
                report(&outcome, out)?;
            }
            Command::Checkout { yes } => {
                let yes = *yes;
                match self.engine.checkout(|prompt| yes || confirm(prompt)) {
                    CheckoutOutcome::EmptyCart => writeln!(out, "Cart is empty")?,
                    CheckoutOutcome::Declined => writeln!(out, "Order cancelled")?,
                    CheckoutOutcome::Completed { receipt, .. } => {
                        write!(out, "{}", render::receipt(&receipt, self.locale))?;
                    }
                }
            }
        }

        for envelope in self.notifications.drain() {
            let notification = envelope.payload();
            if notification.is_warning() {
                writeln!(out, "warning: {}", notification.message(self.locale))?;
            } else {
                writeln!(out, "{}", notification.message(self.locale))?;
            }
        }

        Ok(())
    }
}

/// Explain no-ops; changes are announced by their notifications.
fn report<W: Write>(outcome: &Outcome, out: &mut W) -> std::io::Result<()> {
    let Effect::Unchanged(reason) = &outcome.effect else {
        return Ok(());
    };

    match reason {
        NoChange::UnknownProduct(id) => writeln!(out, "Unknown product #{id}"),
        NoChange::NotInCart(id) => writeln!(out, "Product #{id} is not in the cart"),
        NoChange::AlreadyEmpty => writeln!(out, "Cart is already empty"),
        NoChange::Declined => writeln!(out, "Cart kept"),
        NoChange::QuantityLimit(id) => writeln!(out, "Cannot add more of product #{id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slumber_core::ProductId;
    use tempfile::{TempDir, tempdir};

    fn shop(dir: &TempDir) -> Shop {
        Shop::new(StaticCatalog::bundled(), FileStore::new(dir.path()), Locale::En)
    }

    fn run(shop: &mut Shop, command: Command, answer: bool) -> String {
        let mut out = Vec::new();
        shop.run(&command, &mut out, &mut |_| answer).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_prints_notification_and_cart_shows_total() {
        let dir = tempdir().unwrap();
        let mut shop = shop(&dir);

        assert_eq!(run(&mut shop, Command::Add { id: ProductId::new(3) }, false), "Item added to cart!\n");
        run(&mut shop, Command::Add { id: ProductId::new(3) }, false);

        let panel = run(&mut shop, Command::Cart, false);
        assert!(panel.contains("× 2 = 3,000 $"));
        assert!(panel.ends_with("Items: 2\nTotal: 3,000 $\n"));
    }

    #[test]
    fn unknown_product_is_reported_without_notification() {
        let dir = tempdir().unwrap();
        let mut shop = shop(&dir);
        assert_eq!(
            run(&mut shop, Command::Add { id: ProductId::new(999) }, false),
            "Unknown product #999\n"
        );
    }

    #[test]
    fn show_of_missing_product_is_an_error() {
        let dir = tempdir().unwrap();
        let mut shop = shop(&dir);
        let mut out = Vec::new();
        let result = shop.run(&Command::Show { id: ProductId::new(999) }, &mut out, &mut |_| true);
        assert!(result.is_err());
    }

    #[test]
    fn clear_respects_confirmation_and_yes_flag() {
        let dir = tempdir().unwrap();
        let mut shop = shop(&dir);

        assert_eq!(run(&mut shop, Command::Clear { yes: false }, true), "Cart is already empty\n");

        run(&mut shop, Command::Add { id: ProductId::new(1) }, false);
        assert_eq!(run(&mut shop, Command::Clear { yes: false }, false), "Cart kept\n");
        assert_eq!(run(&mut shop, Command::Clear { yes: true }, false), "Cart cleared\n");
        assert!(shop.engine().is_empty());
    }

    #[test]
    fn checkout_prints_receipt_and_empties_cart() {
        let dir = tempdir().unwrap();
        let mut shop = shop(&dir);
        assert_eq!(run(&mut shop, Command::Checkout { yes: false }, true), "Cart is empty\n");

        run(&mut shop, Command::Add { id: ProductId::new(5) }, false);
        let output = run(&mut shop, Command::Checkout { yes: false }, true);

        assert!(output.starts_with("Thank you for your order!"));
        assert!(output.contains("Total: 25,000 $\n"));
        assert!(output.ends_with("Cart cleared\n"));
        assert!(shop.engine().is_empty());
    }

    #[test]
    fn products_filter_by_category() {
        let dir = tempdir().unwrap();
        let mut shop = shop(&dir);
        let category = "mattresses".parse().unwrap();

        let output = run(&mut shop, Command::Products { category }, false);
        assert!(output.lines().all(|line| line.contains("[Mattress]")));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn corrupted_saved_cart_warns_once() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("cart.json"), "garbage").unwrap();
        let mut shop = shop(&dir);

        let first = run(&mut shop, Command::Cart, false);
        assert!(first.starts_with("warning: saved cart is malformed"));

        let second = run(&mut shop, Command::Cart, false);
        assert!(!second.contains("warning"));
    }

    #[test]
    fn stale_saved_lines_are_reported_and_dropped() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("cart.json"),
            r#"[{"productId":1,"quantity":1},{"productId":42,"quantity":5}]"#,
        )
        .unwrap();
        let mut shop = shop(&dir);

        let panel = run(&mut shop, Command::Cart, false);
        assert!(panel.starts_with("warning: saved cart listed products no longer in the catalog (42)"));
        assert!(panel.ends_with("Items: 1\nTotal: 3,500 $\n"));
    }

    #[test]
    fn notifications_use_the_configured_locale() {
        let dir = tempdir().unwrap();
        let mut shop = Shop::new(StaticCatalog::bundled(), FileStore::new(dir.path()), Locale::Ru);

        assert_eq!(
            run(&mut shop, Command::Add { id: ProductId::new(1) }, false),
            "Товар добавлен в корзину!\n"
        );
        assert_eq!(
            run(&mut shop, Command::Remove { id: ProductId::new(1) }, false),
            "Товар удален из корзины\n"
        );
    }

    #[test]
    fn cart_persists_between_sessions() {
        let dir = tempdir().unwrap();
        run(&mut shop(&dir), Command::Add { id: ProductId::new(2) }, false);

        let mut reopened = shop(&dir);
        assert_eq!(reopened.engine().count(), 1);
        assert!(run(&mut reopened, Command::Cart, false).contains("4,200 $"));
    }
}
