use bytes::{Buf, BytesMut};
use std::io::Cursor;
use tokio_util::codec::Decoder;

use crate::frame::{self, Frame};
use crate::Error;

/// Decodes request frames, refusing to buffer more than `max_frame_size` bytes.
pub struct FrameCodec {
    max_frame_size: usize,
}

impl FrameCodec {
    pub fn new(max_frame_size: usize) -> FrameCodec {
        FrameCodec { max_frame_size }
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut cursor = Cursor::new(&src[..]);
        let frame = match Frame::parse(&mut cursor) {
            Ok(frame) => frame,
            Err(frame::Error::Incomplete) => {
                // Not enough data yet. Bail out if the pending frame is already too large.
                if src.len() > self.max_frame_size {
                    return Err(format!(
                        "frame size exceeds limit of {} bytes",
                        self.max_frame_size
                    )
                    .into());
                }
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let position = usize::try_from(cursor.position())?;

        // Remove the parsed frame from the buffer.
        src.advance(position);

        Ok(Some(frame))
    }
}
