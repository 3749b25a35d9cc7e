use std::{fmt::Display, io};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{instrument, trace};

/// Reads lines from `reader` in a background task.
///
/// Lines are queued one at a time, the reader waits until the previous line has been received.
pub fn lines<R>(reader: R) -> (mpsc::Receiver<String>, JoinHandle<io::Result<()>>)
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    let handle = tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            trace!(%line);
            if tx.send(line).await.is_err() {
                break;
            }
        }

        Ok(())
    });

    (rx, handle)
}

/// Writes `msg` followed by a line break.
#[instrument(level = "trace", skip(writer, msg), err, fields(%msg))]
pub async fn send<W, T>(writer: &mut W, msg: T) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Display,
{
    writer.write_all(format!("{}\n", msg).as_bytes()).await?;
    writer.flush().await
}
