use domain_timesheet::{
    model::entity::{GrantScope, UserAccess},
    repository::UserRepo,
};
use num_traits::FromPrimitive;
use sea_orm::{prelude::*, QueryFilter};

use crate::infrastructure::database::{model::prelude::*, OrmRepo};

#[async_trait::async_trait]
impl UserRepo for OrmRepo {
    async fn get_access(&self, user_id: Uuid) -> anyhow::Result<Option<UserAccess>> {
        let Some(user) = UserEntity::find_by_id(user_id)
            .one(self.db.get_connection())
            .await?
        else {
            return Ok(None);
        };
        let grants = CrewChiefGrantEntity::find()
            .filter(CrewChiefGrantColumn::UserId.eq(user_id))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(GrantScope::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Some(UserAccess {
            user_id: user.id,
            name: user.name,
            role: FromPrimitive::from_i32(user.role)
                .ok_or(anyhow::anyhow!("Wrong role: {} of user: {user_id}.", user.role))?,
            company_id: user.company_id,
            grants,
        }))
    }
}
