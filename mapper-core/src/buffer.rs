//! Rolling byte buffer that cuts NMEA frames out of a raw bus stream.

use heapless::Vec;
use log::{debug, warn};
use nmea_proto::{RawFrame, END_MARKER, START_MARKER};

/// Bytes requested from the bus per read.
pub const READ_CHUNK_LEN: usize = 64;

/// Size above which a buffer without any start marker is thrown away.
pub const BUFFER_CEILING: usize = 4096;

/// Storage for the buffer: the ceiling plus one chunk of headroom.
pub const BUFFER_CAPACITY: usize = BUFFER_CEILING + READ_CHUNK_LEN;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Accumulates bus reads and yields complete sentence frames.
///
/// Idle receivers pad their output with line feeds, so runs of LF at either
/// end of a chunk are dropped. A single LF is kept when it closes a CR LF
/// pair, even one split across two chunks, so the result does not depend on
/// how the stream was chunked.
pub struct AcquisitionBuffer {
    bytes: Vec<u8, BUFFER_CAPACITY>,
}

impl AcquisitionBuffer {
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Buffered bytes not yet consumed by a frame.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Append one bus read, trimming line-feed padding.
    ///
    /// Chunks longer than [`READ_CHUNK_LEN`] are accepted but may force older
    /// bytes out.
    pub fn append(&mut self, chunk: &[u8]) {
        let lead = chunk.iter().take_while(|&&b| b == LF).count();
        let body = &chunk[lead..];
        let trail = body.iter().rev().take_while(|&&b| b == LF).count();
        let body = &body[..body.len() - trail];

        let closes_pending_cr = lead > 0 && self.bytes.last() == Some(&CR);
        let closes_own_cr = trail > 0 && body.last() == Some(&CR);

        let needed = body.len() + usize::from(closes_pending_cr) + usize::from(closes_own_cr);
        self.make_room(needed);

        if closes_pending_cr {
            self.push(&[LF]);
        }
        self.push(body);
        if closes_own_cr {
            self.push(&[LF]);
        }
    }

    /// Cut the next complete frame out of the buffer.
    ///
    /// The frame runs from the talker ID after `$` up to the CR LF; everything
    /// before and including the CR LF is discarded. Returns `None` while no
    /// complete frame is buffered. Without any start marker and with more than
    /// [`BUFFER_CEILING`] bytes buffered, the buffer is cleared.
    pub fn take_frame(&mut self) -> Option<RawFrame> {
        loop {
            let Some(start) = find(&self.bytes, START_MARKER) else {
                if self.bytes.len() > BUFFER_CEILING {
                    warn!("{} bytes without a sentence start, clearing", self.bytes.len());
                    self.bytes.clear();
                }
                return None;
            };

            let search_from = start + START_MARKER.len();
            let end = find(&self.bytes[search_from..], END_MARKER)? + search_from;

            let frame = RawFrame::from_slice(&self.bytes[start + 1..end]);
            self.discard(end + END_MARKER.len());

            match frame {
                Ok(frame) => return Some(frame),
                Err(e) => debug!("dropping sentence: {}", e),
            }
        }
    }

    /// Drop the first `count` bytes.
    fn discard(&mut self, count: usize) {
        let count = count.min(self.bytes.len());
        let remaining = self.bytes.len() - count;
        self.bytes.copy_within(count.., 0);
        self.bytes.truncate(remaining);
    }

    /// Ensure `needed` more bytes fit, giving up old data if required.
    fn make_room(&mut self, needed: usize) {
        if self.bytes.len() + needed <= BUFFER_CAPACITY {
            return;
        }

        // Keep a partial sentence if one is pending, drop what precedes it
        if let Some(start) = find(&self.bytes, START_MARKER).filter(|&start| start > 0) {
            self.discard(start);
        }

        if self.bytes.len() + needed > BUFFER_CAPACITY {
            warn!("acquisition buffer full, clearing {} bytes", self.bytes.len());
            self.bytes.clear();
        }
    }

    fn push(&mut self, data: &[u8]) {
        let room = BUFFER_CAPACITY - self.bytes.len();
        let data = &data[data.len().saturating_sub(room)..];
        // Cannot fail: `data` was cut to the remaining room
        let _ = self.bytes.extend_from_slice(data);
    }
}

impl Default for AcquisitionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of the first occurrence of `needle` in `haystack`.
#[inline]
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
