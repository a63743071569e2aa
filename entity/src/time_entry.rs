use crate::employee;
use sea_orm::prelude::{DateTime, DateTimeWithTimeZone, *};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "time_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recorded_at: DateTime,
    pub kind: EntryKind,
    pub description: Option<String>,
    pub location: Option<String>,
    #[sea_orm(indexed)]
    pub employee_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))", enum_name = "entry_kind")]
pub enum EntryKind {
    #[sea_orm(string_value = "SHIFT_START")]
    ShiftStart,
    #[sea_orm(string_value = "SHIFT_END")]
    ShiftEnd,
    #[sea_orm(string_value = "LUNCH_START")]
    LunchStart,
    #[sea_orm(string_value = "LUNCH_END")]
    LunchEnd,
}

impl EntryKind {
    /// Case-sensitive match against the wire values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SHIFT_START" => Some(EntryKind::ShiftStart),
            "SHIFT_END" => Some(EntryKind::ShiftEnd),
            "LUNCH_START" => Some(EntryKind::LunchStart),
            "LUNCH_END" => Some(EntryKind::LunchEnd),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::ShiftStart => "SHIFT_START",
            EntryKind::ShiftEnd => "SHIFT_END",
            EntryKind::LunchStart => "LUNCH_START",
            EntryKind::LunchEnd => "LUNCH_END",
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Employee,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Employee => Entity::belongs_to(employee::Entity)
                .from(Column::EmployeeId)
                .to(employee::Column::Id)
                .into(),
        }
    }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::EntryKind;

    #[test]
    fn parse_accepts_every_wire_value() {
        for kind in [
            EntryKind::ShiftStart,
            EntryKind::ShiftEnd,
            EntryKind::LunchStart,
            EntryKind::LunchEnd,
        ] {
            assert_eq!(EntryKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(EntryKind::parse("shift_start"), None);
        assert_eq!(EntryKind::parse("INVALID_KIND"), None);
    }
}
