use aupa::prelude::*;

pub fn flag<L: Link>(aupa: &mut Controller<L>) -> anyhow::Result<bool> {
    aupa.geometry_mut()
        .devices_mut()
        .for_each(|dev| {
            dev.reads_fpga_info = true;
            dev.force_fan = true;
        });

    println!("press any key to run fan...");
    let mut _s = String::new();
    std::io::stdin().read_line(&mut _s)?;

    if !aupa.send(UpdateFlags::new())? {
        return Ok(false);
    }

    aupa.fpga_state()?
        .iter()
        .enumerate()
        .for_each(|(i, state)| match state {
            Some(state) => println!("[{}]: thermal assert = {}", i, state.is_thermal_assert()),
            None => println!("[{}]: -", i),
        });

    aupa.geometry_mut().devices_mut().for_each(|dev| {
        dev.reads_fpga_info = false;
        dev.force_fan = false;
    });
    Ok(aupa.send(UpdateFlags::new())?)
}
