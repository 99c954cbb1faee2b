use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	memoir_worker::run(memoir_worker::Args::parse()).await
}
