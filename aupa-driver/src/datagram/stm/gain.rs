use std::time::Duration;

use super::STMProps;
use crate::{
    common::SamplingConfig,
    datagram::{BodyDatagram, Datagram, Gain},
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{GainSTMMode, GainSTMOp, NullOp},
};

/// GainSTM is an STM switching arbitrary gains
pub struct GainSTM<G: Gain> {
    gains: Vec<G>,
    mode: GainSTMMode,
    props: STMProps,
}

impl<G: Gain> GainSTM<G> {
    pub const fn from_props(props: STMProps) -> Self {
        Self {
            gains: Vec::new(),
            mode: GainSTMMode::PhaseDutyFull,
            props,
        }
    }

    pub const fn from_freq(freq: f64) -> Self {
        Self::from_props(STMProps::from_freq(freq))
    }

    pub const fn from_period(period: Duration) -> Self {
        Self::from_props(STMProps::from_period(period))
    }

    pub const fn from_sampling_config(config: SamplingConfig) -> Self {
        Self::from_props(STMProps::from_sampling_config(config))
    }

    pub fn add_gain(mut self, gain: G) -> Self {
        self.gains.push(gain);
        self
    }

    pub fn add_gains_from_iter(mut self, iter: impl IntoIterator<Item = G>) -> Self {
        self.gains.extend(iter);
        self
    }

    /// Set the encoding of gain data
    pub fn with_mode(self, mode: GainSTMMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_start_idx(self, start_idx: Option<u16>) -> Self {
        Self {
            props: self.props.with_start_idx(start_idx),
            ..self
        }
    }

    pub fn with_finish_idx(self, finish_idx: Option<u16>) -> Self {
        Self {
            props: self.props.with_finish_idx(finish_idx),
            ..self
        }
    }

    pub const fn mode(&self) -> GainSTMMode {
        self.mode
    }

    pub fn start_idx(&self) -> Option<u16> {
        self.props.start_idx()
    }

    pub fn finish_idx(&self) -> Option<u16> {
        self.props.finish_idx()
    }

    pub fn gains(&self) -> &[G] {
        &self.gains
    }

    pub fn clear(&mut self) -> Vec<G> {
        std::mem::take(&mut self.gains)
    }

    pub fn frequency(&self) -> Result<f64, AUPAInternalError> {
        self.props.frequency(self.gains.len())
    }

    pub fn period(&self) -> Result<Duration, AUPAInternalError> {
        self.props.period(self.gains.len())
    }

    pub fn sampling_config(&self) -> Result<SamplingConfig, AUPAInternalError> {
        self.props.sampling_config(self.gains.len())
    }
}

impl<G: Gain> std::ops::Index<usize> for GainSTM<G> {
    type Output = G;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.gains[idx]
    }
}

impl<G: Gain> Datagram for GainSTM<G> {
    type O1 = NullOp;
    type O2 = GainSTMOp<G>;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        let freq_div = self
            .props
            .sampling_config(self.gains.len().max(1))?
            .frequency_division();
        Ok((
            Self::O1::default(),
            Self::O2::new(
                self.gains,
                self.mode,
                freq_div,
                self.props.start_idx(),
                self.props.finish_idx(),
            ),
        ))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

impl<G: Gain> BodyDatagram for GainSTM<G> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::{Drive, EmitIntensity, Phase},
        datagram::gain::tests::TestGain,
        fpga::TransMode,
        geometry::tests::create_autd3_geometry,
        operation::Operation,
    };

    #[test]
    fn gain_stm() -> anyhow::Result<()> {
        let d = Drive::new(Phase::ZERO, EmitIntensity::MAX);
        let stm = GainSTM::from_freq(1.)
            .add_gain(TestGain::new(d))
            .add_gains_from_iter((0..9).map(|_| TestGain::new(Drive::null())))
            .with_mode(GainSTMMode::PhaseFull);

        assert_eq!(10, stm.gains().len());
        assert_eq!(d, stm[0].d);
        assert_eq!(GainSTMMode::PhaseFull, stm.mode());
        assert_eq!(16_384_000, stm.sampling_config()?.frequency_division());
        assert_eq!(1., stm.frequency()?);
        assert_eq!(Some(DEFAULT_TIMEOUT), stm.timeout());
        Ok(())
    }

    #[test]
    fn gain_stm_operation() -> anyhow::Result<()> {
        let geometry = create_autd3_geometry(1, TransMode::Legacy);

        let stm = GainSTM::from_sampling_config(SamplingConfig::from_frequency_division(1612)?)
            .add_gains_from_iter((0..2).map(|_| TestGain::new(Drive::null())))
            .with_finish_idx(Some(1));
        assert_eq!(Some(1), stm.finish_idx());

        let (_, mut op) = stm.operation()?;
        op.init(&geometry)?;
        assert_eq!(3, op.remains(&geometry[0]));
        Ok(())
    }

    #[test]
    fn gain_stm_clear() {
        let mut stm = GainSTM::from_freq(1.).add_gain(TestGain::new(Drive::null()));
        assert_eq!(1, stm.clear().len());
        assert!(stm.gains().is_empty());
    }
}
