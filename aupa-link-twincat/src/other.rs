use aupa_driver::{
    cpu::{RxMessage, TxDatagram},
    error::AUPAInternalError,
    geometry::Geometry,
    link::{Link, LinkBuilder},
};

use crate::TwinCATBuilder;

const UNSUPPORTED: &str = "TwinCAT is only supported on Windows";

pub struct TwinCAT {}

impl LinkBuilder for TwinCATBuilder {
    type L = TwinCAT;

    fn open(self, _: &Geometry) -> Result<Self::L, AUPAInternalError> {
        Err(AUPAInternalError::LinkError(UNSUPPORTED.to_owned()))
    }
}

impl Link for TwinCAT {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        Ok(())
    }

    fn send(&mut self, _: &TxDatagram) -> Result<bool, AUPAInternalError> {
        Err(AUPAInternalError::LinkError(UNSUPPORTED.to_owned()))
    }

    fn receive(&mut self, _: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        Err(AUPAInternalError::LinkError(UNSUPPORTED.to_owned()))
    }

    fn is_open(&self) -> bool {
        false
    }
}
