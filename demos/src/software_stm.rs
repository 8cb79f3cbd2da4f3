use std::time::Duration;

use aupa::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut aupa = Controller::builder()
        .add_device(AUTD3::new(Vector3::zeros()))
        .open_with(Nop::builder())?;

    aupa.send(Silencer::default())?;
    aupa.send(Sine::new(150))?;

    let center = aupa.geometry().center() + Vector3::new(0., 0., 150.0 * MILLIMETER);
    let point_num = 200;
    let radius = 30.0 * MILLIMETER;

    let handle = aupa
        .software_stm(move |aupa, i, elapsed| {
            let theta = 2.0 * PI * (i % point_num) as f64 / point_num as f64;
            let p = center + Vector3::new(theta.cos(), theta.sin(), 0.0) * radius;
            match aupa.send(Focus::new(p)) {
                Ok(_) => elapsed < Duration::from_secs(5),
                Err(e) => {
                    tracing::error!("{}", e);
                    false
                }
            }
        })
        .with_timer_strategy(TimerStrategy::Sleep)
        .start(Duration::from_millis(1))?;

    while !handle.is_finished() {
        std::thread::sleep(Duration::from_millis(100));
    }

    let mut aupa = handle.finish()?;
    aupa.send(Stop::new())?;
    aupa.close()?;

    Ok(())
}
