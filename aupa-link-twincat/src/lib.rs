//! Link using the ADS router of TwinCAT3.

mod error;

#[cfg(windows)]
mod win;
#[cfg(windows)]
pub use win::TwinCAT;

#[cfg(not(windows))]
mod other;
#[cfg(not(windows))]
pub use other::TwinCAT;

pub use error::AdsError;

/// Builder of [`TwinCAT`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TwinCATBuilder {}

impl TwinCAT {
    pub const fn builder() -> TwinCATBuilder {
        TwinCATBuilder {}
    }
}

#[cfg(test)]
mod tests {
    use aupa_driver::{
        autd3_device::AUTD3,
        error::AUPAInternalError,
        geometry::{GeometryBuilder, Vector3},
        link::LinkBuilder,
    };

    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn open_unsupported() -> Result<(), AUPAInternalError> {
        let mut builder = GeometryBuilder::new();
        builder.add_device(AUTD3::new(Vector3::zeros()));
        let geometry = builder.build()?;

        assert_eq!(
            Err(AUPAInternalError::LinkError(
                "TwinCAT is only supported on Windows".to_owned()
            )),
            TwinCAT::builder().open(&geometry).map(|_| ())
        );
        Ok(())
    }
}
