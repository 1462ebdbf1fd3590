use core::str::FromStr;

use serde::{Deserialize, Serialize};

use slumber_core::{DomainError, Entity, Locale, Price, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pillows,
    Mattresses,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Pillows, Category::Mattresses];

    /// Singular display label shown on product cards.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Category::Pillows, Locale::Ru) => "Подушка",
            (Category::Mattresses, Locale::Ru) => "Матрас",
            (Category::Pillows, Locale::En) => "Pillow",
            (Category::Mattresses, Locale::En) => "Mattress",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pillows" | "pillow" => Ok(Category::Pillows),
            "mattresses" | "mattress" => Ok(Category::Mattresses),
            other => Err(DomainError::validation(format!("unknown category '{other}'"))),
        }
    }
}

/// Catalog filter: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

/// Immutable catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    price: Price,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    /// Short image reference (an emoji glyph in the bundled catalog).
    #[serde(default)]
    image: String,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, category: Category, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            price,
            description: String::new(),
            features: Vec::new(),
            image: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub(crate) fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
