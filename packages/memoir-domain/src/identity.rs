use uuid::Uuid;

use crate::kind::SourceKind;

/// Deterministic vector-point id for a record.
///
/// The name string must stay `"{kind}-record-{id}"` under `NAMESPACE_OID` so
/// that any reimplementation upserts the same point instead of duplicating it.
pub fn point_id(kind: SourceKind, record_id: Uuid) -> Uuid {
	let name = format!("{kind}-record-{record_id}");

	Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

/// Per-owner vector collection name.
pub fn collection_name(owner_id: Uuid) -> String {
	format!("index-user-{owner_id}")
}
