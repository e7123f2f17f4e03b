//! Template model.
//!
//! Maps to the `templates` collection. Only `tags` is an array field.

use serde::{Deserialize, Serialize};

use super::{Collection, Entity};
use crate::query::Filter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the user that owns the template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_shareable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Entity for Template {
    const COLLECTION: Collection = Collection::Templates;

    fn to_filter(&self) -> Filter {
        Filter::new()
            .equals_opt("id", self.id.as_deref())
            .equals_opt("name", self.name.as_deref())
            .equals_opt("owner", self.owner.as_deref())
            .equals_opt("publisher", self.publisher.as_deref())
            .equals_opt("description", self.description.as_deref())
            .equals_opt("isShareable", self.is_shareable)
            .contains_all_opt("tags", self.tags.as_deref())
    }
}
