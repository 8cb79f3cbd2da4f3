mod tests;

use aupa::prelude::*;
use aupa_link_ethercat::{EtherCAT, Status};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let aupa = Controller::builder()
        .add_device(AUTD3::new(Vector3::zeros()))
        .open_with(
            EtherCAT::builder()
                .with_on_lost(|msg| {
                    eprintln!("Unrecoverable error occurred: {}", msg);
                    std::process::exit(-1);
                })
                .with_on_err(|slave, status| match status {
                    Status::Error => eprintln!("Error [{}]: {}", slave, status),
                    Status::Lost => {
                        eprintln!("Lost [{}]: {}", slave, status);
                        std::process::exit(-1);
                    }
                    Status::StateChanged | Status::Resumed => {
                        eprintln!("StateChanged [{}]: {}", slave, status)
                    }
                }),
        )?;

    tests::run(aupa)
}
