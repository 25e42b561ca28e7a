use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use domain_timesheet::{
    model::entity::{AssignedPersonnel, Shift, Timesheet, UserAccess},
    repository::{AssignedPersonnelRepo, ReadOnlyRepository, ShiftRepo, TimesheetRepo, UserRepo},
};
use serde::Deserialize;
use uuid::Uuid;

/// Fixture the memory database starts from.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserAccess>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub assignments: Vec<SeedAssignment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAssignment {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub role_code: String,
}

impl From<SeedAssignment> for AssignedPersonnel {
    fn from(s: SeedAssignment) -> Self {
        Self {
            id: s.id,
            shift_id: s.shift_id,
            employee_id: s.employee_id,
            employee_name: s.employee_name,
            role_code: s.role_code,
            time_entries: vec![],
            ended_at: None,
            version: 0,
        }
    }
}

impl SeedData {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub async fn load(path: &str) -> anyhow::Result<Self> {
        let yaml = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&yaml)
    }
}

/// In-process implementation of every timesheet repository.
///
/// Versioned writes compare and swap while holding the shard lock of the row.
#[derive(Default)]
pub struct MemoryRepo {
    users: DashMap<Uuid, UserAccess>,
    shifts: DashMap<Uuid, Shift>,
    assignments: DashMap<Uuid, AssignedPersonnel>,
    timesheets: DashMap<Uuid, Timesheet>,
    timesheet_by_shift: DashMap<Uuid, Uuid>,
}

impl MemoryRepo {
    pub fn new(seed: SeedData) -> Self {
        let repo = Self::default();
        for user in seed.users {
            repo.users.insert(user.user_id, user);
        }
        for shift in seed.shifts {
            repo.shifts.insert(shift.id, shift);
        }
        for assignment in seed.assignments {
            repo.assignments.insert(assignment.id, assignment.into());
        }
        repo
    }

    pub fn insert_user(&self, user: UserAccess) {
        self.users.insert(user.user_id, user);
    }

    pub fn insert_shift(&self, shift: Shift) {
        self.shifts.insert(shift.id, shift);
    }

    pub fn insert_assignment(&self, assignment: AssignedPersonnel) {
        self.assignments.insert(assignment.id, assignment);
    }
}

#[async_trait]
impl ReadOnlyRepository<Shift> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Shift>> {
        Ok(self.shifts.get(&id).map(|s| s.value().clone()))
    }
}

impl ShiftRepo for MemoryRepo {}

#[async_trait]
impl ReadOnlyRepository<AssignedPersonnel> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<AssignedPersonnel>> {
        Ok(self.assignments.get(&id).map(|a| a.value().clone()))
    }
}

#[async_trait]
impl AssignedPersonnelRepo for MemoryRepo {
    async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Vec<AssignedPersonnel>> {
        let mut roster = self
            .assignments
            .iter()
            .filter(|a| a.shift_id == shift_id)
            .map(|a| a.value().clone())
            .collect::<Vec<_>>();
        roster.sort_by(|a, b| a.employee_name.cmp(&b.employee_name));
        Ok(roster)
    }

    async fn update_with_lock(&self, entity: &AssignedPersonnel) -> anyhow::Result<bool> {
        let Some(mut stored) = self.assignments.get_mut(&entity.id) else {
            anyhow::bail!("There is no assigned personnel with id: {}", entity.id);
        };
        if stored.version != entity.version {
            return Ok(false);
        }
        *stored = AssignedPersonnel {
            version: entity.version + 1,
            ..entity.clone()
        };
        Ok(true)
    }
}

#[async_trait]
impl ReadOnlyRepository<Timesheet> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Timesheet>> {
        Ok(self.timesheets.get(&id).map(|t| t.value().clone()))
    }
}

#[async_trait]
impl TimesheetRepo for MemoryRepo {
    async fn get_by_shift_id(&self, shift_id: Uuid) -> anyhow::Result<Option<Timesheet>> {
        let Some(id) = self.timesheet_by_shift.get(&shift_id).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.timesheets.get(&id).map(|t| t.value().clone()))
    }

    async fn insert_for_shift(&self, entity: &Timesheet) -> anyhow::Result<bool> {
        match self.timesheet_by_shift.entry(entity.shift_id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                self.timesheets.insert(entity.id, entity.clone());
                slot.insert(entity.id);
                Ok(true)
            }
        }
    }

    async fn update_with_lock(&self, entity: &Timesheet) -> anyhow::Result<bool> {
        let Some(mut stored) = self.timesheets.get_mut(&entity.id) else {
            anyhow::bail!("There is no timesheet with id: {}", entity.id);
        };
        if stored.version != entity.version {
            return Ok(false);
        }
        *stored = Timesheet {
            version: entity.version + 1,
            ..entity.clone()
        };
        Ok(true)
    }
}

#[async_trait]
impl UserRepo for MemoryRepo {
    async fn get_access(&self, user_id: Uuid) -> anyhow::Result<Option<UserAccess>> {
        Ok(self.users.get(&user_id).map(|u| u.value().clone()))
    }
}
