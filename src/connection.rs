use futures::StreamExt;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::FramedRead;
use uuid::Uuid;

use crate::codec::FrameCodec;
use crate::frame::Frame;
use crate::Error;

pub struct Connection {
    pub id: Uuid,
    pub client_address: SocketAddr,
    // Bytes read from the socket are buffered by the codec until a full frame is available.
    reader: FramedRead<OwnedReadHalf, FrameCodec>,
    writer: OwnedWriteHalf,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        client_address: SocketAddr,
        max_frame_size: usize,
    ) -> Connection {
        let (reader, writer) = stream.into_split();

        Connection {
            id: Uuid::new_v4(),
            client_address,
            reader: FramedRead::new(reader, FrameCodec::new(max_frame_size)),
            writer,
        }
    }

    /// Reads the next frame. Returns `None` once the peer has closed the connection.
    pub async fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        self.reader.next().await.transpose()
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.writer.write_all(bytes).await?;
        Ok(())
    }
}
