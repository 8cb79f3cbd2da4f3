use aupa::prelude::*;

pub fn bessel<L: Link>(aupa: &mut Controller<L>) -> anyhow::Result<bool> {
    aupa.send(Silencer::default())?;

    let center = aupa.geometry().center();
    let dir = Vector3::z();

    let g = Bessel::new(center, dir, 18. / 180. * PI);
    let m = Sine::new(150);

    Ok(aupa.send((m, g))?)
}
