use entity::time_entry::{self, Entity as TimeEntry};
use platform_api::Page;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder,
};

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<Option<time_entry::Model>, DbErr> {
    TimeEntry::find_by_id(id).one(db).await
}

pub async fn page_by_employee<C: ConnectionTrait>(
    db: &C,
    employee_id: i64,
    page: u64,
    page_size: u64,
    sort: time_entry::Column,
    order: Order,
) -> Result<Page<time_entry::Model>, DbErr> {
    let paginator = TimeEntry::find()
        .filter(time_entry::Column::EmployeeId.eq(employee_id))
        .order_by(sort, order)
        .paginate(db, page_size);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page).await?;
    Ok(Page {
        items,
        page,
        page_size,
        total_elements: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

pub async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<u64, DbErr> {
    let result = TimeEntry::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}
