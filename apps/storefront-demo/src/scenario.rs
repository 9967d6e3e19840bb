//! # Scenario
//!
//! Describes a catalog, a customer and a scripted list of order steps, and
//! runs them against storefront-core while rendering the transcript.
//!
//! ## Step Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each step                                                          │
//! │                                                                         │
//! │   orders[step.order].create(customer, product, qty)                     │
//! │        │                                                                │
//! │        ├── Ok  ──► apply_discount? ──► complete_with(render receipt)    │
//! │        │                                   │                            │
//! │        │                                   └─► [EVENT] line (if empty)  │
//! │        │                                                                │
//! │        └── InsufficientStock ──► "Insufficient stock for ..."           │
//! │                                  + step.on_failure (if set)             │
//! │                                                                         │
//! │  Order slots are reused by name, so one order can serve several steps.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The default scenario is the canonical demo: a 10% laptop order, a $50-off
//! smartphone order that sells the phone out, and a laptop re-order that
//! fails for lack of stock.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use storefront_core::validation::{
    validate_name, validate_percentage, validate_price_cents, validate_quantity, validate_stock,
    ValidationResult,
};
use storefront_core::{
    CoreError, Customer, Discount, FixedDiscount, Money, Order, OrderReceipt, PercentageDiscount,
    Product, ProductKind, ValidationError,
};
use tracing::{debug, info};

use crate::error::DemoResult;
use crate::transcript::Transcript;

// =============================================================================
// Scenario Description
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSpec {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Identifier steps use to refer to this product.
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub kind: ProductKind,
    pub price_cents: i64,
    /// Starting stock; ignored for digital products.
    #[serde(default)]
    pub stock: i64,
}

impl ProductSpec {
    fn build(&self) -> Product {
        let price = Money::from_cents(self.price_cents);
        match self.kind {
            ProductKind::Physical => Product::physical(self.name.as_str(), price, self.stock),
            ProductKind::Digital => Product::digital(self.name.as_str(), price),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountSpec {
    Percentage { percent: u32 },
    Fixed { amount_cents: i64 },
}

impl DiscountSpec {
    pub fn to_discount(self) -> Box<dyn Discount> {
        match self {
            DiscountSpec::Percentage { percent } => Box::new(PercentageDiscount::new(percent)),
            DiscountSpec::Fixed { amount_cents } => {
                Box::new(FixedDiscount::new(Money::from_cents(amount_cents)))
            }
        }
    }

    fn validate(&self) -> ValidationResult<()> {
        match *self {
            DiscountSpec::Percentage { percent } => validate_percentage(percent),
            DiscountSpec::Fixed { amount_cents } => validate_price_cents("amount_cents", amount_cents),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Order slot name; steps sharing a slot reuse the same `Order`.
    pub order: String,
    /// Key of the product to order.
    pub product: String,
    pub quantity: i64,
    #[serde(default)]
    pub discount: Option<DiscountSpec>,
    /// Extra line printed after the stock diagnostic when the order fails.
    #[serde(default)]
    pub on_failure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub customer: CustomerSpec,
    pub products: Vec<ProductSpec>,
    pub steps: Vec<StepSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            customer: CustomerSpec {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
            },
            products: vec![
                ProductSpec {
                    key: "laptop".to_string(),
                    name: "Laptop".to_string(),
                    kind: ProductKind::Physical,
                    price_cents: 100_000,
                    stock: 5,
                },
                ProductSpec {
                    key: "smartphone".to_string(),
                    name: "Smartphone".to_string(),
                    kind: ProductKind::Physical,
                    price_cents: 70_000,
                    stock: 2,
                },
            ],
            steps: vec![
                StepSpec {
                    order: "laptop_order".to_string(),
                    product: "laptop".to_string(),
                    quantity: 3,
                    discount: Some(DiscountSpec::Percentage { percent: 10 }),
                    on_failure: None,
                },
                StepSpec {
                    order: "smartphone_order".to_string(),
                    product: "smartphone".to_string(),
                    quantity: 2,
                    discount: Some(DiscountSpec::Fixed { amount_cents: 5_000 }),
                    on_failure: None,
                },
                StepSpec {
                    order: "laptop_order".to_string(),
                    product: "laptop".to_string(),
                    quantity: 3,
                    discount: None,
                    on_failure: Some(
                        "Failed to create second laptop order due to insufficient stock."
                            .to_string(),
                    ),
                },
            ],
        }
    }
}

impl Scenario {
    /// Checks names, amounts, quantities and cross references.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("customer.first_name", &self.customer.first_name)?;
        validate_name("customer.last_name", &self.customer.last_name)?;

        let mut keys = HashSet::new();
        for product in &self.products {
            validate_name("products.key", &product.key)?;
            if !keys.insert(product.key.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "products.key".to_string(),
                    value: product.key.clone(),
                });
            }
            validate_name("products.name", &product.name)?;
            validate_price_cents("products.price_cents", product.price_cents)?;
            if product.kind == ProductKind::Physical {
                validate_stock(product.stock)?;
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            validate_name(&format!("steps[{index}].order"), &step.order)?;
            if !keys.contains(step.product.as_str()) {
                return Err(ValidationError::UnknownReference {
                    field: format!("steps[{index}].product"),
                    value: step.product.clone(),
                });
            }
            validate_quantity(step.quantity)?;
            if let Some(discount) = &step.discount {
                discount.validate()?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Runner
// =============================================================================

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub receipts: Vec<OrderReceipt>,
    pub failed_steps: usize,
}

/// Runs every step in order, writing the transcript as it goes.
///
/// Insufficient stock is part of the script and lands in the transcript;
/// any other core failure aborts the run.
pub fn run(
    scenario: &Scenario,
    transcript: &Transcript,
    show_catalog: bool,
) -> DemoResult<ScenarioOutcome> {
    scenario.validate()?;

    let customer = Customer::new(
        scenario.customer.first_name.as_str(),
        scenario.customer.last_name.as_str(),
    );

    let mut catalog: Vec<(&str, Product)> = scenario
        .products
        .iter()
        .map(|spec| (spec.key.as_str(), spec.build()))
        .collect();

    for (_, product) in catalog.iter_mut() {
        let events = transcript.clone();
        product.on_out_of_stock(move |event| events.line(format!("[EVENT] {}", event)));
    }
    debug!(products = catalog.len(), "Catalog ready");

    if show_catalog {
        render_catalog(transcript, "Catalog:", &catalog);
        transcript.blank();
    }

    let mut orders: HashMap<&str, Order<'_>> = HashMap::new();
    let mut outcome = ScenarioOutcome::default();

    for (index, step) in scenario.steps.iter().enumerate() {
        if index > 0 {
            transcript.blank();
        }

        let product = catalog
            .iter()
            .find(|(key, _)| *key == step.product)
            .map(|(_, product)| product)
            .ok_or_else(|| ValidationError::UnknownReference {
                field: format!("steps[{index}].product"),
                value: step.product.clone(),
            })?;

        let order = orders.entry(step.order.as_str()).or_default();

        match order.create(&customer, product, step.quantity) {
            Ok(()) => {
                if let Some(discount) = step.discount {
                    order.apply_boxed_discount(discount.to_discount());
                }
                let receipt = order.complete_with(|receipt| render_receipt(transcript, receipt))?;
                outcome.receipts.push(receipt);
            }
            Err(err @ CoreError::InsufficientStock { .. }) => {
                transcript.line(err.to_string());
                if let Some(message) = &step.on_failure {
                    transcript.line(message.as_str());
                }
                outcome.failed_steps += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if show_catalog {
        transcript.blank();
        render_catalog(transcript, "Catalog after orders:", &catalog);
    }

    info!(
        completed = outcome.receipts.len(),
        failed = outcome.failed_steps,
        "Scenario finished"
    );
    Ok(outcome)
}

fn render_receipt(transcript: &Transcript, receipt: &OrderReceipt) {
    transcript.line(format!(
        "Order created for {} unit(s) of {}.",
        receipt.quantity, receipt.product_name
    ));
    if receipt.is_discounted() {
        transcript.line(format!("Discount applied. Final price: {}", receipt.final_price));
    } else {
        transcript.line(format!("Final price: {}", receipt.final_price));
    }
    transcript.line(format!(
        "Order completed for {}. Product shipped.",
        receipt.customer_name
    ));
}

fn render_catalog(transcript: &Transcript, heading: &str, catalog: &[(&str, Product)]) {
    transcript.line(heading);
    for (_, product) in catalog {
        transcript.line(format!("  {}", product.display_details()));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DemoError;

    const CANONICAL: &[&str] = &[
        "Order created for 3 unit(s) of Laptop.",
        "Discount applied. Final price: $2700.00",
        "Order completed for John Doe. Product shipped.",
        "",
        "Order created for 2 unit(s) of Smartphone.",
        "Discount applied. Final price: $1350.00",
        "Order completed for John Doe. Product shipped.",
        "[EVENT] Smartphone is now out of stock!",
        "",
        "Insufficient stock for Laptop. Available: 2",
        "Failed to create second laptop order due to insufficient stock.",
    ];

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logs_for_default_scenario(filter: &str) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            run(&Scenario::default(), &Transcript::new(), false).unwrap();
        });

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_scripted_outcomes_stay_below_default_log_level() {
        assert_eq!(logs_for_default_scenario("warn"), "");

        let info = logs_for_default_scenario("info");
        assert!(info.contains("Insufficient stock"));
        assert!(info.contains("Product is out of stock"));
        assert!(!info.contains("WARN"));
    }

    #[test]
    fn test_default_scenario_transcript() {
        let transcript = Transcript::new();
        let outcome = run(&Scenario::default(), &transcript, false).unwrap();

        assert_eq!(transcript.lines(), CANONICAL);
        assert_eq!(outcome.receipts.len(), 2);
        assert_eq!(outcome.failed_steps, 1);
        assert_eq!(outcome.receipts[0].final_price, Money::from_cents(270_000));
        assert_eq!(outcome.receipts[1].final_price, Money::from_cents(135_000));
    }

    #[test]
    fn test_show_catalog_wraps_transcript() {
        let transcript = Transcript::new();
        run(&Scenario::default(), &transcript, true).unwrap();
        let lines = transcript.lines();

        assert_eq!(
            &lines[..4],
            &[
                "Catalog:",
                "  Laptop - $1000.00 - Stock: 5",
                "  Smartphone - $700.00 - Stock: 2",
                "",
            ]
        );
        assert_eq!(
            &lines[lines.len() - 3..],
            &[
                "Catalog after orders:",
                "  Laptop - $1000.00 - Stock: 2",
                "  Smartphone - $700.00 - Stock: 0",
            ]
        );
    }

    #[test]
    fn test_undiscounted_digital_order() {
        let scenario = Scenario {
            customer: CustomerSpec {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            products: vec![ProductSpec {
                key: "ebook".to_string(),
                name: "E-Book".to_string(),
                kind: ProductKind::Digital,
                price_cents: 1_250,
                stock: 0,
            }],
            steps: vec![StepSpec {
                order: "o1".to_string(),
                product: "ebook".to_string(),
                quantity: 4,
                discount: None,
                on_failure: None,
            }],
        };

        let transcript = Transcript::new();
        run(&scenario, &transcript, true).unwrap();

        assert_eq!(
            transcript.lines(),
            vec![
                "Catalog:",
                "  E-Book (Digital) - $12.50 - Unlimited Stock",
                "",
                "Order created for 4 unit(s) of E-Book.",
                "Final price: $50.00",
                "Order completed for Ada Lovelace. Product shipped.",
                "",
                "Catalog after orders:",
                "  E-Book (Digital) - $12.50 - Unlimited Stock",
            ]
        );
    }

    #[test]
    fn test_failure_without_message_prints_only_diagnostic() {
        let mut scenario = Scenario::default();
        scenario.steps = vec![StepSpec {
            order: "o1".to_string(),
            product: "smartphone".to_string(),
            quantity: 3,
            discount: None,
            on_failure: None,
        }];

        let transcript = Transcript::new();
        let outcome = run(&scenario, &transcript, false).unwrap();

        assert_eq!(transcript.lines(), vec!["Insufficient stock for Smartphone. Available: 2"]);
        assert!(outcome.receipts.is_empty());
    }

    #[test]
    fn test_validate_rejects_unknown_product() {
        let mut scenario = Scenario::default();
        scenario.steps[0].product = "tablet".to_string();

        let err = run(&scenario, &Transcript::new(), false).unwrap_err();
        assert!(matches!(
            err,
            DemoError::Validation(ValidationError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys_and_bad_discounts() {
        let mut scenario = Scenario::default();
        scenario.products[1].key = "laptop".to_string();
        assert!(matches!(
            scenario.validate(),
            Err(ValidationError::Duplicate { .. })
        ));

        let mut scenario = Scenario::default();
        scenario.steps[0].discount = Some(DiscountSpec::Percentage { percent: 120 });
        assert!(scenario.validate().is_err());

        let mut scenario = Scenario::default();
        scenario.steps[0].quantity = 0;
        assert!(scenario.validate().is_err());
    }
}
