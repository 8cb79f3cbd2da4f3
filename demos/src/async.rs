use aupa::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let aupa: AsyncController<_> = Controller::builder()
        .add_device(AUTD3::new(Vector3::zeros()))
        .open_with(Nop::builder())?
        .into();

    aupa.firmware_infos().await?.iter().for_each(|info| {
        println!("{}", info);
    });

    let center = aupa.lock().await.geometry().center() + Vector3::new(0., 0., 150.0 * MILLIMETER);

    let tasks = (0..4).map(|i| {
        let aupa = aupa.clone();
        tokio::spawn(async move {
            aupa.send((Sine::new(150 + 50 * i), Focus::new(center)))
                .await
        })
    });
    for task in tasks {
        println!("sent: {}", task.await??);
    }

    aupa.send(Stop::new()).await?;
    aupa.close().await?;

    Ok(())
}
