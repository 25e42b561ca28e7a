use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::TimesheetResult,
    model::{
        entity::{AssignedPersonnel, Shift, Timesheet, UserAccess},
        vo::{ApprovalType, Capability, SignatureRef, TimesheetEvent},
    },
    repository::{AssignedPersonnelRepo, ReadOnlyRepository, ShiftRepo, TimesheetRepo, UserRepo},
    service::{Notifier, PermissionService, SignatureStore, TimeSource},
};

mock! {
    pub ShiftRepo {}
    #[async_trait]
    impl ReadOnlyRepository<Shift> for ShiftRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Shift>>;
    }
    impl ShiftRepo for ShiftRepo {}
}

mock! {
    pub AssignedPersonnelRepo {}
    #[async_trait]
    impl ReadOnlyRepository<AssignedPersonnel> for AssignedPersonnelRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<AssignedPersonnel>>;
    }
    #[async_trait]
    impl AssignedPersonnelRepo for AssignedPersonnelRepo {
        async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Vec<AssignedPersonnel>>;
        async fn update_with_lock(&self, entity: &AssignedPersonnel) -> anyhow::Result<bool>;
    }
}

mock! {
    pub TimesheetRepo {}
    #[async_trait]
    impl ReadOnlyRepository<Timesheet> for TimesheetRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Timesheet>>;
    }
    #[async_trait]
    impl TimesheetRepo for TimesheetRepo {
        async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Option<Timesheet>>;
        async fn insert_for_shift(&self, entity: &Timesheet) -> anyhow::Result<bool>;
        async fn update_with_lock(&self, entity: &Timesheet) -> anyhow::Result<bool>;
    }
}

mock! {
    pub UserRepo {}
    #[async_trait]
    impl UserRepo for UserRepo {
        async fn get_access(&self, user_id: Uuid) -> anyhow::Result<Option<UserAccess>>;
    }
}

mock! {
    pub PermissionService {}
    #[async_trait]
    impl PermissionService for PermissionService {
        async fn authorize(
            &self,
            user_id: Uuid,
            shift: &Shift,
            capability: Capability,
        ) -> TimesheetResult<UserAccess>;
    }
}

mock! {
    pub SignatureStore {}
    #[async_trait]
    impl SignatureStore for SignatureStore {
        async fn put(
            &self,
            timesheet_id: Uuid,
            kind: ApprovalType,
            image: &[u8],
        ) -> anyhow::Result<SignatureRef>;
        async fn get(&self, reference: &SignatureRef) -> anyhow::Result<Vec<u8>>;
        async fn delete(&self, reference: &SignatureRef) -> anyhow::Result<()>;
    }
}

mock! {
    pub Notifier {}
    #[async_trait]
    impl Notifier for Notifier {
        async fn notify(&self, event: TimesheetEvent) -> anyhow::Result<()>;
    }
}

mock! {
    pub TimeSource {}
    impl TimeSource for TimeSource {
        fn now(&self) -> DateTime<Utc>;
    }
}
