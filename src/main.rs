use anyhow::Result;

use chatbridge::{config::Config, logging, supervisor};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env()?;
    supervisor::start(config).await
}
