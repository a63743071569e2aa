use entity::company::{self, Entity as Company};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub async fn find_by_tax_id<C: ConnectionTrait>(
    db: &C,
    tax_id: &str,
) -> Result<Option<company::Model>, DbErr> {
    Company::find()
        .filter(company::Column::TaxId.eq(tax_id))
        .one(db)
        .await
}
