use std::collections::HashMap;

use qdrant_client::{
	Qdrant,
	client::Payload,
	qdrant::{
		CountPointsBuilder, CreateCollectionBuilder, DeletePointsBuilder, Distance,
		GetCollectionInfoResponse, PointStruct, PointsIdsList, UpsertPointsBuilder,
		VectorParamsBuilder, vectors_config,
	},
};
use uuid::Uuid;

use memoir_domain::{SourceKind, collection_name};

use crate::{Error, Result};

pub struct VectorStore {
	pub client: Qdrant,
}
impl VectorStore {
	pub fn new(cfg: &memoir_config::Qdrant) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client })
	}

	/// Makes sure the owner's collection exists with the given dimensionality.
	///
	/// Collections are created lazily with cosine distance on first write. An
	/// existing collection with a different dimension is an error; it is never
	/// resized in place.
	pub async fn ensure_collection(&self, owner_id: Uuid, dimension: u64) -> Result<()> {
		let name = collection_name(owner_id);

		if self.client.collection_exists(&name).await? {
			let info = self.client.collection_info(&name).await?;

			if let Some(existing) = existing_dimension(&info)
				&& existing != dimension
			{
				return Err(Error::DimensionMismatch { existing, requested: dimension });
			}

			return Ok(());
		}

		let create = CreateCollectionBuilder::new(&name)
			.vectors_config(VectorParamsBuilder::new(dimension, Distance::Cosine));

		match self.client.create_collection(create).await {
			Ok(_) => Ok(()),
			// Two overlapping first writes can race on creation.
			Err(err) if is_already_exists(&err) => Ok(()),
			Err(err) => Err(err.into()),
		}
	}

	/// Upserts the record's vector point. The deterministic point id makes
	/// repeated runs overwrite rather than duplicate.
	pub async fn upsert_point(
		&self,
		owner_id: Uuid,
		point_id: Uuid,
		vector: Vec<f32>,
		kind: SourceKind,
		record_id: Uuid,
		text: &str,
	) -> Result<()> {
		let mut payload_map = HashMap::new();

		payload_map.insert("text".to_string(), qdrant_client::qdrant::Value::from(text));
		payload_map
			.insert("source_kind".to_string(), qdrant_client::qdrant::Value::from(kind.as_str()));
		payload_map.insert(
			"record_id".to_string(),
			qdrant_client::qdrant::Value::from(record_id.to_string()),
		);

		let payload = Payload::from(payload_map);
		let point = PointStruct::new(point_id.to_string(), vector, payload);
		let upsert = UpsertPointsBuilder::new(collection_name(owner_id), vec![point]).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	pub async fn delete_point(&self, owner_id: Uuid, point_id: Uuid) -> Result<()> {
		let delete = DeletePointsBuilder::new(collection_name(owner_id))
			.points(PointsIdsList { ids: vec![point_id.to_string().into()] })
			.wait(true);

		self.client.delete_points(delete).await?;

		Ok(())
	}

	pub async fn count_points(&self, owner_id: Uuid) -> Result<u64> {
		let count = self
			.client
			.count(CountPointsBuilder::new(collection_name(owner_id)).exact(true))
			.await?;

		Ok(count.result.map(|result| result.count).unwrap_or(0))
	}
}

fn existing_dimension(info: &GetCollectionInfoResponse) -> Option<u64> {
	let config = info.result.as_ref()?.config.as_ref()?;
	let vectors = config.params.as_ref()?.vectors_config.as_ref()?;

	match vectors.config.as_ref()? {
		vectors_config::Config::Params(params) => Some(params.size),
		vectors_config::Config::ParamsMap(_) => None,
	}
}

fn is_already_exists(err: &qdrant_client::QdrantError) -> bool {
	let message = err.to_string().to_lowercase();

	message.contains("already exists")
}
