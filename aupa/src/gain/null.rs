use aupa_driver::derive::*;

/// Gain to output nothing
#[derive(Gain, Default, Clone, PartialEq, Eq, Debug)]
pub struct Null {}

impl Null {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Gain for Null {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        Ok(Self::transform(geometry, filter, |_, _| Drive::null()))
    }
}
