use std::ffi::c_void;

use libloading::Library;
use zerocopy::IntoBytes;

use aupa_driver::{
    cpu::{RxMessage, TxDatagram},
    error::AUPAInternalError,
    geometry::Geometry,
    link::{Link, LinkBuilder},
};

use crate::{error::AdsError, TwinCATBuilder};

#[repr(C)]
#[derive(Copy, Clone)]
struct AmsNetId {
    b: [u8; 6],
}

#[repr(C)]
#[derive(Copy, Clone)]
struct AmsAddr {
    net_id: AmsNetId,
    port: u16,
}

const INDEX_GROUP: u32 = 0x0304_0030;
const INDEX_OFFSET_BASE: u32 = 0x8100_0000;
const INDEX_OFFSET_BASE_READ: u32 = 0x8000_0000;
const PORT: u16 = 301;

/// Link using TwinCAT3
///
/// TwinCAT3 must be installed and the AUTD server must be running.
pub struct TwinCAT {
    port: i32,
    send_addr: AmsAddr,
    dll: Library,
}

impl LinkBuilder for TwinCATBuilder {
    type L = TwinCAT;

    fn open(self, _: &Geometry) -> Result<Self::L, AUPAInternalError> {
        let dll = unsafe { Library::new("TcAdsDll") }.map_err(|_| AdsError::DllNotFound)?;

        let port = unsafe {
            dll.get::<unsafe extern "C" fn() -> i32>(b"AdsPortOpenEx")
                .map_err(|_| AdsError::FunctionNotFound("AdsPortOpenEx".to_owned()))?()
        };
        if port == 0 {
            return Err(AdsError::OpenPort.into());
        }

        let mut ams_addr = AmsAddr {
            net_id: AmsNetId { b: [0; 6] },
            port: 0,
        };
        let n_err = unsafe {
            dll.get::<unsafe extern "C" fn(i32, *mut AmsAddr) -> i32>(b"AdsGetLocalAddressEx")
                .map_err(|_| AdsError::FunctionNotFound("AdsGetLocalAddressEx".to_owned()))?(
                port,
                &mut ams_addr as *mut _,
            )
        };
        if n_err != 0 {
            return Err(AdsError::GetLocalAddress(n_err).into());
        }
        tracing::info!("ADS port {} opened", port);

        Ok(TwinCAT {
            port,
            send_addr: AmsAddr {
                net_id: ams_addr.net_id,
                port: PORT,
            },
            dll,
        })
    }
}

impl Link for TwinCAT {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        if !self.is_open() {
            return Ok(());
        }
        unsafe {
            self.dll
                .get::<unsafe extern "C" fn(i32) -> i32>(b"AdsPortCloseEx")
                .map_err(|_| AdsError::FunctionNotFound("AdsPortCloseEx".to_owned()))?(
                self.port
            );
        }
        self.port = 0;
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        if !self.is_open() {
            return Err(AUPAInternalError::LinkClosed);
        }
        let data = tx.as_bytes();
        let n_err = unsafe {
            self.dll
                .get::<unsafe extern "C" fn(i32, *const AmsAddr, u32, u32, u32, *const c_void) -> i32>(
                    b"AdsSyncWriteReqEx",
                )
                .map_err(|_| AdsError::FunctionNotFound("AdsSyncWriteReqEx".to_owned()))?(
                self.port,
                &self.send_addr as *const _,
                INDEX_GROUP,
                INDEX_OFFSET_BASE,
                data.len() as u32,
                data.as_ptr() as *const c_void,
            )
        };
        match n_err {
            0 => Ok(true),
            // ADS port not connected
            0x748 => Ok(false),
            _ => Err(AdsError::SendData(n_err).into()),
        }
    }

    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        if !self.is_open() {
            return Err(AUPAInternalError::LinkClosed);
        }
        let buf = rx.as_mut_bytes();
        let mut read_bytes: u32 = 0;
        let n_err = unsafe {
            self.dll
                .get::<unsafe extern "C" fn(i32, *const AmsAddr, u32, u32, u32, *mut c_void, *mut u32) -> i32>(
                    b"AdsSyncReadReqEx2",
                )
                .map_err(|_| AdsError::FunctionNotFound("AdsSyncReadReqEx2".to_owned()))?(
                self.port,
                &self.send_addr as *const _,
                INDEX_GROUP,
                INDEX_OFFSET_BASE_READ,
                buf.len() as u32,
                buf.as_mut_ptr() as *mut c_void,
                &mut read_bytes as *mut u32,
            )
        };
        match n_err {
            0 => Ok(true),
            0x748 => Ok(false),
            _ => Err(AdsError::ReadData(n_err).into()),
        }
    }

    fn is_open(&self) -> bool {
        self.port > 0
    }
}

impl Drop for TwinCAT {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("failed to close ADS port: {}", e);
        }
    }
}
