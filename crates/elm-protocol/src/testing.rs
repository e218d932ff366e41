//! Test doubles for the transport

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream, ReadBuf};

/// One scripted read outcome
pub enum Chunk {
    Data(Vec<u8>),
    Fail(io::ErrorKind),
}

impl Chunk {
    pub fn data(bytes: &[u8]) -> Self {
        Chunk::Data(bytes.to_vec())
    }
}

/// Transport that hands out pre-queued chunks, one per read
///
/// Once the queue is empty, reads stay pending forever, like an adapter
/// that never sends its prompt.
#[derive(Default)]
pub struct ScriptedTransport {
    chunks: VecDeque<Chunk>,
    pub written: Vec<u8>,
    pub reads: usize,
    pub fail_writes: bool,
}

impl ScriptedTransport {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks: chunks.into(),
            ..Default::default()
        }
    }

    /// Each response is delivered as a single chunk
    pub fn replies(responses: &[&[u8]]) -> Self {
        Self::new(responses.iter().map(|r| Chunk::data(r)).collect())
    }

    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

impl AsyncRead for ScriptedTransport {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.chunks.pop_front() {
            Some(Chunk::Data(mut bytes)) => {
                self.reads += 1;
                if bytes.len() > buf.remaining() {
                    let rest = bytes.split_off(buf.remaining());
                    self.chunks.push_front(Chunk::Data(rest));
                }
                buf.put_slice(&bytes);
                Poll::Ready(Ok(()))
            }
            Some(Chunk::Fail(kind)) => {
                self.reads += 1;
                Poll::Ready(Err(io::Error::new(kind, "scripted read failure")))
            }
            None => Poll::Pending,
        }
    }
}

impl AsyncWrite for ScriptedTransport {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if self.fail_writes {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted write failure",
            )));
        }
        self.written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Something observed on the wire by [`Recording`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireEvent {
    Sent(String),
    Prompt,
}

/// Wraps a transport and logs writes and prompt-terminated reads
pub struct Recording<T> {
    inner: T,
    events: Arc<Mutex<Vec<WireEvent>>>,
}

impl<T> Recording<T> {
    pub fn new(inner: T) -> (Self, Arc<Mutex<Vec<WireEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recording = Self {
            inner,
            events: Arc::clone(&events),
        };
        (recording, events)
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for Recording<T> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = poll {
            if buf.filled().len() > before && buf.filled().last() == Some(&b'>') {
                self.events.lock().unwrap().push(WireEvent::Prompt);
            }
        }
        poll
    }
}

impl<T: AsyncWrite + Unpin> AsyncWrite for Recording<T> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let poll = Pin::new(&mut self.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = poll {
            let text = String::from_utf8_lossy(&buf[..n]).into_owned();
            self.events.lock().unwrap().push(WireEvent::Sent(text));
        }
        poll
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

/// A scripted reply: the command it answers and the chunks it is sent in
pub struct Reply {
    pub command: &'static str,
    pub chunks: Vec<&'static [u8]>,
    pub delay: Duration,
}

impl Reply {
    pub fn new(command: &'static str, chunks: &[&'static [u8]]) -> Self {
        Self::delayed(command, Duration::ZERO, chunks)
    }

    /// Reply that only starts arriving after `delay`, like a protocol search
    pub fn delayed(command: &'static str, delay: Duration, chunks: &[&'static [u8]]) -> Self {
        Self {
            command,
            chunks: chunks.to_vec(),
            delay,
        }
    }
}

/// Spawn a fake adapter on the far end of an in-memory duplex pipe
///
/// Replies are consumed in order by matching command text; anything
/// unscripted gets the adapter's `?` answer. Returns the near end and
/// the log of commands the adapter received.
pub fn spawn_adapter(replies: Vec<Reply>) -> (DuplexStream, Arc<Mutex<Vec<String>>>) {
    let (client, mut adapter) = tokio::io::duplex(1024);
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&received);

    tokio::spawn(async move {
        let mut replies: VecDeque<Reply> = replies.into();
        let mut pending = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match adapter.read(&mut byte).await {
                Ok(0) | Err(_) => break,
                Ok(_) => pending.push(byte[0]),
            }
            if !pending.ends_with(b"\r\n") {
                continue;
            }

            let command = String::from_utf8_lossy(&pending[..pending.len() - 2]).into_owned();
            pending.clear();
            log.lock().unwrap().push(command.clone());

            let position = replies.iter().position(|r| r.command == command);
            let (delay, chunks): (Duration, Vec<Vec<u8>>) =
                match position.and_then(|i| replies.remove(i)) {
                    Some(reply) => (
                        reply.delay,
                        reply.chunks.iter().map(|c| c.to_vec()).collect(),
                    ),
                    None => (
                        Duration::ZERO,
                        vec![format!("{command}\r?\r\r>").into_bytes()],
                    ),
                };

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            for chunk in chunks {
                if adapter.write_all(&chunk).await.is_err() {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        }
    });

    (client, received)
}
