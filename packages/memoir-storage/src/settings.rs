use uuid::Uuid;

use crate::{Result, db::Db, models::OwnerSettings};

pub async fn fetch_owner_settings(db: &Db, owner_id: Uuid) -> Result<Option<OwnerSettings>> {
	let row = sqlx::query_as::<_, OwnerSettings>("SELECT * FROM owner_settings WHERE owner_id = $1")
		.bind(owner_id)
		.fetch_optional(&db.pool)
		.await?;

	Ok(row)
}
