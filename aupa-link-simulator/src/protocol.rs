use aupa_driver::{
    cpu::{RxMessage, EC_INPUT_FRAME_SIZE, MSG_SIMULATOR_CLOSE, MSG_SIMULATOR_INIT},
    geometry::Geometry,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Frames larger than this are treated as a broken stream
const MAX_FRAME_SIZE: usize = 1 << 24;

/// Geometry message: init id, number of devices (u32), then per device the origin (3 x f32, mm)
/// and the rotation quaternion (w, i, j, k as f32)
pub(crate) fn geometry_message(geometry: &Geometry) -> Vec<u8> {
    let mut msg = vec![MSG_SIMULATOR_INIT];
    msg.extend_from_slice(&(geometry.num_devices() as u32).to_le_bytes());
    geometry.iter().for_each(|dev| {
        if let Some(tr) = dev.first() {
            let p = tr.position();
            let q = tr.rotation();
            [p.x, p.y, p.z, q.w, q.i, q.j, q.k]
                .into_iter()
                .for_each(|v| msg.extend_from_slice(&(v as f32).to_le_bytes()));
        }
    });
    msg
}

pub(crate) fn close_message() -> Vec<u8> {
    vec![MSG_SIMULATOR_CLOSE]
}

pub(crate) fn decode_rx(frame: &[u8], rx: &mut [RxMessage]) {
    frame
        .chunks_exact(EC_INPUT_FRAME_SIZE)
        .zip(rx.iter_mut())
        .for_each(|(src, dst)| *dst = RxMessage::new(src[0], src[1]));
}

pub(crate) async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> std::io::Result<()> {
    writer
        .write_all(&(payload.len() as u32).to_le_bytes())
        .await?;
    writer.write_all(payload).await?;
    writer.flush().await
}

/// Read a frame, `None` at the end of the stream
pub(crate) async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> std::io::Result<Option<Vec<u8>>> {
    let mut len = [0u8; 4];
    match reader.read_exact(&mut len).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }
    let len = u32::from_le_bytes(len) as usize;
    if len > MAX_FRAME_SIZE {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("frame too large: {} bytes", len),
        ));
    }
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}
