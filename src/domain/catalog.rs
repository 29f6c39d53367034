//! Static reference data: categories, installment providers, and subscription templates.

use std::{fs, path::Path};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::errors::Result;
use crate::domain::category::{Category, InstallmentProvider, SubscriptionTemplate};
use crate::domain::common::NamedEntity;

/// Category that subscription charges are filed under.
pub const SUBSCRIPTION_CATEGORY_ID: &str = "bills";

/// Description used for subscription charges whose template is unknown.
pub const FALLBACK_SUBSCRIPTION_NAME: &str = "Subscription";

const ICON_CLASS_PREFIX: &str = "fa-";

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    categories: vec![
        Category::new("groceries", "Groceries", 400.0, "#4caf50").with_icon("fa-cart-shopping"),
        Category::new("dining", "Eating Out", 150.0, "#ff9800").with_icon("fa-utensils"),
        Category::new("transport", "Transport", 100.0, "#2196f3").with_icon("fa-bus"),
        Category::new(SUBSCRIPTION_CATEGORY_ID, "Bills", 300.0, "#9c27b0")
            .with_icon("fa-file-invoice"),
        Category::new("entertainment", "Entertainment", 80.0, "#e91e63").with_icon("fa-film"),
        Category::new("shopping", "Shopping", 120.0, "#00bcd4").with_icon("fa-bag-shopping"),
        Category::new("health", "Health", 50.0, "#f44336").with_icon("fa-heart-pulse"),
        Category::new("other", "Other", 0.0, "#607d8b").with_icon("fa-ellipsis"),
    ],
    providers: vec![
        provider("none", "None", None),
        provider("klarna", "Klarna", Some("assets/providers/klarna.svg")),
        provider("paypal", "PayPal", Some("fa-paypal")),
        provider("afterpay", "Afterpay", Some("assets/providers/afterpay.svg")),
    ],
    templates: vec![
        template("netflix", "Netflix", Some(13.99)),
        template("spotify", "Spotify", Some(10.99)),
        template("disney-plus", "Disney+", Some(8.99)),
        template("amazon-prime", "Amazon Prime", Some(8.99)),
        template("gym", "Gym", None),
        template("phone", "Phone Plan", None),
        template("internet", "Internet", None),
    ],
});

fn provider(id: &str, name: &str, icon: Option<&str>) -> InstallmentProvider {
    InstallmentProvider {
        id: id.into(),
        name: name.into(),
        icon: icon.map(Into::into),
    }
}

fn template(id: &str, name: &str, default_amount: Option<f64>) -> SubscriptionTemplate {
    SubscriptionTemplate {
        id: id.into(),
        name: name.into(),
        icon: Some(format!("assets/subscriptions/{id}.svg")),
        default_amount,
    }
}

/// Reference lists the ledger records point into by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub providers: Vec<InstallmentProvider>,
    #[serde(default)]
    pub templates: Vec<SubscriptionTemplate>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The reference data shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn provider(&self, id: &str) -> Option<&InstallmentProvider> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&SubscriptionTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Name used as the description of a subscription's generated charges.
    pub fn subscription_label(&self, template_id: &str) -> String {
        self.template(template_id)
            .map(display_name)
            .unwrap_or_else(|| FALLBACK_SUBSCRIPTION_NAME.to_string())
    }
}

/// Trimmed display name, used when a catalog entry's name is copied onto a record.
pub fn display_name<T: NamedEntity>(entity: &T) -> String {
    entity.name().trim().to_string()
}

/// Returns `true` when `icon` names an icon-font class rather than an image path.
pub fn is_icon_class(icon: Option<&str>) -> bool {
    icon.is_some_and(|value| value.starts_with(ICON_CLASS_PREFIX))
}
