use std::time::Duration;

use super::STMProps;
use crate::{
    common::SamplingConfig,
    datagram::{BodyDatagram, Datagram},
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{ControlPoint, FocusSTMOp, NullOp},
};

/// FocusSTM is an STM for moving a single focal point
///
/// The sampling rate is derived from the number of points, so add all points
/// before reading `frequency` or `sampling_config`.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusSTM {
    control_points: Vec<ControlPoint>,
    props: STMProps,
}

impl FocusSTM {
    pub const fn from_props(props: STMProps) -> Self {
        Self {
            control_points: Vec::new(),
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

    /// Add a control point
    pub fn add_focus(mut self, point: impl Into<ControlPoint>) -> Self {
        self.control_points.push(point.into());
        self
    }

    /// Add control points
    pub fn add_foci_from_iter<C: Into<ControlPoint>>(
        mut self,
        iter: impl IntoIterator<Item = C>,
    ) -> Self {
        self.control_points
            .extend(iter.into_iter().map(Into::into));
        self
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

    pub fn start_idx(&self) -> Option<u16> {
        self.props.start_idx()
    }

    pub fn finish_idx(&self) -> Option<u16> {
        self.props.finish_idx()
    }

    pub fn foci(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn clear(&mut self) -> Vec<ControlPoint> {
        std::mem::take(&mut self.control_points)
    }

    pub fn frequency(&self) -> Result<f64, AUPAInternalError> {
        self.props.frequency(self.control_points.len())
    }

    pub fn period(&self) -> Result<Duration, AUPAInternalError> {
        self.props.period(self.control_points.len())
    }

    pub fn sampling_config(&self) -> Result<SamplingConfig, AUPAInternalError> {
        self.props.sampling_config(self.control_points.len())
    }
}

impl std::ops::Index<usize> for FocusSTM {
    type Output = ControlPoint;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.control_points[idx]
    }
}

impl Datagram for FocusSTM {
    type O1 = NullOp;
    type O2 = FocusSTMOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        let freq_div = self
            .props
            .sampling_config(self.control_points.len().max(1))?
            .frequency_division();
        Ok((
            Self::O1::default(),
            Self::O2::new(
                self.control_points,
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

impl BodyDatagram for FocusSTM {}
