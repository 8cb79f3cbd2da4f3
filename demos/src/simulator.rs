mod tests;

use aupa::prelude::*;
use aupa_link_simulator::Simulator;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let aupa = Controller::builder()
        .add_device(AUTD3::new(Vector3::zeros()))
        .add_device(AUTD3::new(Vector3::new(AUTD3::DEVICE_WIDTH, 0., 0.)))
        .open_with(Simulator::builder("127.0.0.1:8080".parse()?))?;

    tests::run(aupa)
}
