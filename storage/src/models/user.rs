//! User model.
//!
//! Maps to the `users` collection; `team` and `org` are matched with contains-all.

use serde::{Deserialize, Serialize};

use super::{Collection, Entity};
use crate::query::Filter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Subject identifier issued by the identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<Vec<String>>,
}

impl Entity for User {
    const COLLECTION: Collection = Collection::Users;

    fn to_filter(&self) -> Filter {
        Filter::new()
            .equals_opt("id", self.id.as_deref())
            .equals_opt("authId", self.auth_id.as_deref())
            .equals_opt("issuer", self.issuer.as_deref())
            .contains_all_opt("team", self.team.as_deref())
            .contains_all_opt("org", self.org.as_deref())
    }
}
