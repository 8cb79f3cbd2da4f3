use aupa_driver::{
    autd3_device::AUTD3,
    datagram::{Clear, Synchronize},
    fpga::TransMode,
    geometry::GeometryBuilder,
    link::LinkBuilder,
};

use super::Controller;
use crate::error::AUPAError;

/// Builder for [`Controller`]
#[derive(Default)]
pub struct ControllerBuilder {
    builder: GeometryBuilder,
}

impl ControllerBuilder {
    pub(crate) fn new() -> ControllerBuilder {
        Self {
            builder: GeometryBuilder::new(),
        }
    }

    /// Add device
    pub fn add_device(mut self, dev: AUTD3) -> Self {
        self.builder.add_device(dev);
        self
    }

    /// Use legacy mode (8-bit phase and duty in a single frame)
    pub fn legacy(self) -> Self {
        Self {
            builder: self.builder.with_mode(TransMode::Legacy),
        }
    }

    /// Use advanced mode (16-bit phase and duty)
    pub fn advanced(self) -> Self {
        Self {
            builder: self.builder.with_mode(TransMode::Advanced),
        }
    }

    /// Use advanced mode with phase only; duty is set by [`Amplitudes`]
    ///
    /// [`Amplitudes`]: aupa_driver::datagram::Amplitudes
    pub fn advanced_phase(self) -> Self {
        Self {
            builder: self.builder.with_mode(TransMode::AdvancedPhase),
        }
    }

    /// Open controller
    ///
    /// The geometry is built before the link is opened, so a geometry error leaves no link open.
    pub fn open_with<B: LinkBuilder>(self, link_builder: B) -> Result<Controller<B::L>, AUPAError> {
        let geometry = self.builder.build()?;
        tracing::info!(
            "open controller with {} devices ({:?} mode)",
            geometry.num_devices(),
            geometry.mode()
        );
        let link = link_builder.open(&geometry)?;

        let mut cnt = Controller::new(link, geometry);
        cnt.send(Clear::new())?;
        cnt.send(Synchronize::new())?;
        Ok(cnt)
    }
}

#[cfg(test)]
mod tests {
    use aupa_driver::{autd3_device::AUTD3, error::AUPAInternalError, geometry::Vector3};

    use super::*;
    use crate::link::Audit;

    #[test]
    fn open_with_audit() -> anyhow::Result<()> {
        let autd = Controller::builder()
            .add_device(AUTD3::new(Vector3::zeros()))
            .add_device(AUTD3::new(Vector3::new(AUTD3::DEVICE_WIDTH, 0., 0.)))
            .open_with(Audit::builder())?;

        assert_eq!(2, autd.geometry().num_devices());
        assert_eq!(TransMode::Legacy, autd.geometry().mode());
        assert!(autd.link().iter().all(|cpu| cpu.synchronized()));
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(TransMode::Legacy, ControllerBuilder::legacy)]
    #[case(TransMode::Advanced, ControllerBuilder::advanced)]
    #[case(TransMode::AdvancedPhase, ControllerBuilder::advanced_phase)]
    fn open_with_mode(
        #[case] expect: TransMode,
        #[case] f: fn(ControllerBuilder) -> ControllerBuilder,
    ) -> anyhow::Result<()> {
        let autd =
            f(Controller::builder().add_device(AUTD3::new(Vector3::zeros()))).open_with(Audit::builder())?;
        assert_eq!(expect, autd.geometry().mode());
        Ok(())
    }

    #[test]
    fn open_without_devices() {
        assert_eq!(
            Some(AUPAError::Internal(AUPAInternalError::GeometryBuild(
                "no device was added".to_owned()
            ))),
            Controller::builder().open_with(Audit::builder()).err()
        );
    }
}
