mod tests;

use aupa::prelude::*;
use aupa_link_twincat::TwinCAT;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let aupa = Controller::builder()
        .add_device(AUTD3::new(Vector3::zeros()))
        .open_with(TwinCAT::builder())?;

    tests::run(aupa)
}
