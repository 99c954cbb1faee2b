pub mod worker;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = memoir_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = memoir_storage::db::Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let vectors = memoir_storage::qdrant::VectorStore::new(&config.storage.qdrant)?;
	let pipeline = memoir_pipeline::Pipeline::new(config, db, vectors);

	worker::run_worker(pipeline).await
}
