use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, CategorySection, CommentEntry, Product};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryLink {
    pub id: i32,
    pub name: String,
    pub path: Option<String>,
}

impl From<Category> for CategoryLink {
    fn from(category: Category) -> Self {
        let path = CategorySection::ALL
            .into_iter()
            .find(|section| section.category_id() == category.id)
            .map(|section| section.path().to_string());
        Self {
            id: category.id,
            name: category.name,
            path,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub username: Option<String>,
    pub categories: Vec<CategoryLink>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage {
    pub section: CategorySection,
    pub category_id: i32,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CommentForm {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub product: Product,
    /// Newest first.
    pub comments: Vec<CommentEntry>,
    pub comment_form: CommentForm,
}
