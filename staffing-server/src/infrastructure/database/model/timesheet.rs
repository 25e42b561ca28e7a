use domain_timesheet::model::{
    entity::{Timesheet, TimesheetStatus},
    vo::SignatureRef,
};
use num_traits::{FromPrimitive, ToPrimitive};
use sea_orm::{entity::prelude::*, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timesheet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub shift_id: Uuid,
    pub status: i32,
    pub submitted_by: Uuid,
    pub submitted_at: DateTimeUtc,
    pub client_signature: Option<String>,
    pub client_approved_by: Option<Uuid>,
    pub client_approved_at: Option<DateTimeUtc>,
    pub manager_signature: Option<String>,
    pub manager_approved_by: Option<Uuid>,
    pub manager_approved_at: Option<DateTimeUtc>,
    pub rejection_reason: Option<String>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTimeUtc>,
    pub hour_totals: Json,
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Timesheet> for Model {
    type Error = anyhow::Error;

    fn try_from(t: &Timesheet) -> Result<Self, Self::Error> {
        Ok(Self {
            id: t.id,
            shift_id: t.shift_id,
            status: t
                .status
                .to_i32()
                .ok_or(anyhow::anyhow!("Wrong timesheet status."))?,
            submitted_by: t.submitted_by,
            submitted_at: t.submitted_at,
            client_signature: t.client_signature.as_ref().map(|s| s.0.to_owned()),
            client_approved_by: t.client_approved_by,
            client_approved_at: t.client_approved_at,
            manager_signature: t.manager_signature.as_ref().map(|s| s.0.to_owned()),
            manager_approved_by: t.manager_approved_by,
            manager_approved_at: t.manager_approved_at,
            rejection_reason: t.rejection_reason.to_owned(),
            rejected_by: t.rejected_by,
            rejected_at: t.rejected_at,
            hour_totals: serde_json::to_value(&t.hour_totals)?,
            version: t.version,
        })
    }
}

impl TryFrom<Model> for Timesheet {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            shift_id: m.shift_id,
            status: FromPrimitive::from_i32(m.status)
                .ok_or(anyhow::anyhow!("Wrong timesheet status: {}.", m.status))?,
            submitted_by: m.submitted_by,
            submitted_at: m.submitted_at,
            client_signature: m.client_signature.map(SignatureRef),
            client_approved_by: m.client_approved_by,
            client_approved_at: m.client_approved_at,
            manager_signature: m.manager_signature.map(SignatureRef),
            manager_approved_by: m.manager_approved_by,
            manager_approved_at: m.manager_approved_at,
            rejection_reason: m.rejection_reason,
            rejected_by: m.rejected_by,
            rejected_at: m.rejected_at,
            hour_totals: serde_json::from_value(m.hour_totals)?,
            version: m.version,
        })
    }
}

impl Model {
    pub fn into_set(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            shift_id: Set(self.shift_id),
            status: Set(self.status),
            submitted_by: Set(self.submitted_by),
            submitted_at: Set(self.submitted_at),
            client_signature: Set(self.client_signature),
            client_approved_by: Set(self.client_approved_by),
            client_approved_at: Set(self.client_approved_at),
            manager_signature: Set(self.manager_signature),
            manager_approved_by: Set(self.manager_approved_by),
            manager_approved_at: Set(self.manager_approved_at),
            rejection_reason: Set(self.rejection_reason),
            rejected_by: Set(self.rejected_by),
            rejected_at: Set(self.rejected_at),
            hour_totals: Set(self.hour_totals),
            version: Set(self.version),
        }
    }
}
