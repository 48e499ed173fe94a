use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "single_changes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub batch_change_id: String,
    /// Zero-based position within the batch; submission order.
    pub position: i32,
    pub change_type: String,
    pub input_name: String,
    pub record_type: String,
    pub ttl: Option<i64>,
    /// JSON record payload, absent for deletes.
    pub record_data: Option<String>,
    pub zone_id: String,
    pub zone_name: String,
    pub record_name: String,
    pub status: String,
    pub system_message: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
