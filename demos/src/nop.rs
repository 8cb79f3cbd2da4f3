mod tests;

use aupa::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let aupa = Controller::builder()
        .add_device(AUTD3::new(Vector3::zeros()))
        .add_device(AUTD3::new(Vector3::new(AUTD3::DEVICE_WIDTH, 0., 0.)))
        .open_with(Nop::builder())?;

    tests::run(aupa)
}
