use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const CRLF: &[u8] = b"\r\n";

pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());

    // Status line
    buf.put_slice(resp.version.as_str().as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.as_u16().to_string().as_bytes());
    buf.put_u8(b' ');
    buf.put_slice(resp.status.reason_phrase().as_bytes());
    buf.put_slice(CRLF);

    // Headers
    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(CRLF);
    }

    // Header/body separator
    buf.put_slice(CRLF);

    // Body
    buf.put_slice(&resp.body);

    if resp.trailer {
        buf.put_slice(b"\r\n\r\n");
    }

    buf.freeze()
}

/// Writes one serialized response, retrying partial writes until every byte
/// has gone out.
pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::Version;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn partial_writes_are_completed() {
        let body = vec![b'z'; 10_000];
        let response = Response::success(Version::Http11, false, "text/plain", body, true);
        let mut writer = ResponseWriter::new(&response);
        let expected = writer.len();

        // A tiny pipe forces many short writes
        let (mut client, mut server) = tokio::io::duplex(64);
        let reader = tokio::spawn(async move {
            let mut received = Vec::new();
            client.read_to_end(&mut received).await.unwrap();
            received
        });

        writer.write_to_stream(&mut server).await.unwrap();
        drop(server);

        let received = reader.await.unwrap();
        assert_eq!(received.len(), expected);
        assert!(received.ends_with(b"zz\r\n\r\n"));
    }

    #[tokio::test]
    async fn closed_peer_is_an_error() {
        let response = Response::success(Version::Http10, false, "text/plain", vec![0; 4096], false);
        let mut writer = ResponseWriter::new(&response);

        let (client, mut server) = tokio::io::duplex(16);
        drop(client);

        assert!(writer.write_to_stream(&mut server).await.is_err());
    }
}
