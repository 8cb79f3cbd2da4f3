use aupa_driver::cpu::{RxMessage, TxMessage, EC_INPUT_FRAME_SIZE};
use zerocopy::IntoBytes;

/// Copy the output frame of one device into its process data image
pub(crate) fn write_output(tx: &TxMessage, output: &mut [u8]) {
    let src = tx.as_bytes();
    let n = src.len().min(output.len());
    output[..n].copy_from_slice(&src[..n]);
}

/// Decode the concatenated input frames of every device
pub(crate) fn read_inputs(inputs: &[u8], rx: &mut [RxMessage]) {
    inputs
        .chunks_exact(EC_INPUT_FRAME_SIZE)
        .zip(rx.iter_mut())
        .for_each(|(src, dst)| *dst = RxMessage::new(src[0], src[1]));
}

#[cfg(test)]
mod tests {
    use aupa_driver::cpu::EC_OUTPUT_FRAME_SIZE;

    use super::*;

    #[test]
    fn write_output_frame() {
        let mut tx = TxMessage::new();
        tx.header.msg_id = 0x12;
        tx.body[0] = 0xABCD;

        let mut output = vec![0u8; EC_OUTPUT_FRAME_SIZE];
        write_output(&tx, &mut output);
        assert_eq!(0x12, output[0]);
        assert_eq!(0xCD, output[128]);
        assert_eq!(0xAB, output[129]);
    }

    #[test]
    fn write_output_short_image() {
        let mut tx = TxMessage::new();
        tx.header.msg_id = 0x34;

        let mut output = vec![0u8; 4];
        write_output(&tx, &mut output);
        assert_eq!(0x34, output[0]);
    }

    #[test]
    fn read_input_frames() {
        let inputs = [0x01, 0x05, 0x00, 0x06];
        let mut rx = vec![RxMessage::default(); 2];
        read_inputs(&inputs, &mut rx);
        assert_eq!(vec![RxMessage::new(0x01, 0x05), RxMessage::new(0x00, 0x06)], rx);
    }
}
