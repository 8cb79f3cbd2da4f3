use derive_more::{Deref, DerefMut};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::Header;
use crate::{autd3_device::AUTD3, fpga::FPGAState};

/// Output frame of a single device
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
pub struct TxMessage {
    pub header: Header,
    pub body: [u16; AUTD3::NUM_TRANS_IN_UNIT],
}

impl TxMessage {
    pub fn new() -> Self {
        Self {
            header: Header::default(),
            body: [0; AUTD3::NUM_TRANS_IN_UNIT],
        }
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }

    pub fn body_bytes_mut(&mut self) -> &mut [u8] {
        self.body.as_mut_bytes()
    }
}

impl Default for TxMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// Output frames of all devices
///
/// The frames persist between sends so that FPGA flags carry over.
#[derive(Clone, Debug, Deref, DerefMut)]
pub struct TxDatagram {
    data: Vec<TxMessage>,
}

impl TxDatagram {
    pub fn new(num_devices: usize) -> Self {
        Self {
            data: vec![TxMessage::new(); num_devices],
        }
    }

    pub fn num_devices(&self) -> usize {
        self.data.len()
    }

    pub fn headers(&self) -> impl Iterator<Item = &Header> {
        self.data.iter().map(|m| &m.header)
    }

    pub fn header_mut(&mut self, idx: usize) -> &mut Header {
        &mut self.data[idx].header
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice().as_bytes()
    }
}

/// Input frame of a single device
#[repr(C)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, IntoBytes, FromBytes, KnownLayout, Immutable,
)]
pub struct RxMessage {
    ack: u8,
    msg_id: u8,
}

impl RxMessage {
    pub const fn new(ack: u8, msg_id: u8) -> Self {
        Self { ack, msg_id }
    }

    pub const fn ack(&self) -> u8 {
        self.ack
    }

    pub const fn msg_id(&self) -> u8 {
        self.msg_id
    }
}

impl From<&RxMessage> for FPGAState {
    fn from(msg: &RxMessage) -> Self {
        FPGAState::new(msg.ack)
    }
}

/// Yields whether each device has processed the frame last sent to it
pub fn check_if_msg_is_processed<'a>(
    tx: &'a TxDatagram,
    rx: &'a [RxMessage],
) -> impl Iterator<Item = bool> + 'a {
    tx.headers()
        .zip(rx.iter())
        .map(|(h, r)| h.msg_id == r.msg_id())
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::cpu::EC_OUTPUT_FRAME_SIZE;

    #[test]
    fn tx_datagram_bytes() {
        let mut tx = TxDatagram::new(2);
        tx.header_mut(1).msg_id = 0x42;
        tx[1].body[0] = 0x1234;

        let bytes = tx.as_bytes();
        assert_eq!(2 * EC_OUTPUT_FRAME_SIZE, bytes.len());
        assert_eq!(0x42, bytes[EC_OUTPUT_FRAME_SIZE]);
        assert_eq!(0x34, bytes[EC_OUTPUT_FRAME_SIZE + 128]);
        assert_eq!(0x12, bytes[EC_OUTPUT_FRAME_SIZE + 129]);
    }

    #[test]
    fn rx_message_size() {
        assert_eq!(2, std::mem::size_of::<RxMessage>());
        let msg = RxMessage::new(0x01, 0x02);
        assert_eq!([0x01, 0x02], msg.as_bytes());
    }

    #[test]
    fn test_check_if_msg_is_processed() {
        let mut tx = TxDatagram::new(3);
        tx.header_mut(0).msg_id = 1;
        tx.header_mut(1).msg_id = 2;
        tx.header_mut(2).msg_id = 3;

        let rx = vec![
            RxMessage::new(0, 1),
            RxMessage::new(0, 2),
            RxMessage::new(0, 3),
        ];
        assert!(check_if_msg_is_processed(&tx, &rx).all(|b| b));

        tx.header_mut(0).msg_id = 2;
        let rx = vec![
            RxMessage::new(0, 1),
            RxMessage::new(0, 2),
            RxMessage::new(0, 2),
        ];
        let processed = check_if_msg_is_processed(&tx, &rx).collect_vec();
        assert_eq!(vec![false, true, false], processed);
    }
}
