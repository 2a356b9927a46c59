use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `agent_id` is a plain column: packages may reference agents that do not
/// exist, so no relation is declared.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub recipient: Option<String>,
    pub address: String,
    pub agent_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
