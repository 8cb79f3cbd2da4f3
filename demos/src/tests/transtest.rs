use aupa::prelude::*;

pub fn transtest<L: Link>(aupa: &mut Controller<L>) -> anyhow::Result<bool> {
    aupa.send(Silencer::default())?;

    let m = Static::new();
    let g = TransducerTest::new(|dev, tr| match (dev.idx(), tr.idx()) {
        (0, 0) | (0, 248) => Some(Drive::new(Phase::ZERO, EmitIntensity::MAX)),
        _ => None,
    });

    Ok(aupa.send((m, g))?)
}
