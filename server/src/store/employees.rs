use entity::employee::{self, Entity as Employee};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<employee::Model>, DbErr> {
    Employee::find_by_id(id).one(db).await
}

pub async fn find_by_tax_id<C: ConnectionTrait>(
    db: &C,
    tax_id: &str,
) -> Result<Option<employee::Model>, DbErr> {
    Employee::find()
        .filter(employee::Column::TaxId.eq(tax_id))
        .one(db)
        .await
}

pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<employee::Model>, DbErr> {
    Employee::find()
        .filter(employee::Column::Email.eq(email))
        .one(db)
        .await
}
