use crate::network::protocol::Protocol;
use crate::reply::ReplyUnit;
use alloc::collections::VecDeque;
use bytes::BytesMut;

/// Memory limits of the response buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryParameters {
    /// Pre allocated size of the buffer for unparsed data
    pub buffer_size: usize,

    /// Pre allocated number of parsed reply units
    pub unit_capacity: usize,

    /// Max. size of unparsed data. None for no limit.
    pub memory_limit: Option<usize>,
}

impl Default for MemoryParameters {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            unit_capacity: 4,
            memory_limit: None,
        }
    }
}

/// Buffer for unparsed/incomplete data and parsed/complete reply units
pub(crate) struct ResponseBuffer<P: Protocol> {
    decoder: P,

    /// Unparsed data buffer
    buffer: BytesMut,

    /// Parsed units in receive order
    units: VecDeque<ReplyUnit>,

    /// Max. size of unparsed data
    limit: Option<usize>,

    /// Received unknown message prefix
    faulty: bool,
}

impl<P: Protocol> ResponseBuffer<P> {
    pub fn new(protocol: P, memory: MemoryParameters) -> ResponseBuffer<P> {
        Self {
            decoder: protocol,
            buffer: BytesMut::with_capacity(memory.buffer_size),
            units: VecDeque::with_capacity(memory.unit_capacity),
            limit: memory.memory_limit,
            faulty: false,
        }
    }

    /// Appends data to buffer
    pub fn append(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
        self.parse_frames();
    }

    /// Takes the oldest complete unit
    pub fn take_unit(&mut self) -> Option<ReplyUnit> {
        self.units.pop_front()
    }

    /// Parses buffer and extracts units
    /// Complete frames are split off, so the buffer only contains non-complete frames
    fn parse_frames(&mut self) {
        while !self.faulty && !self.buffer.is_empty() {
            match self.decoder.decode(&mut self.buffer) {
                Ok(Some(frame)) => {
                    if let Some(unit) = self.decoder.reply_unit(frame) {
                        self.units.push_back(unit);
                    }
                }
                // Frame is not complete yet
                Ok(None) => break,
                Err(_) => self.faulty = true,
            }
        }
    }

    /// If true, an protocol violation was detected
    /// Since the cause (e.g. Redis bug, network fault, etc.) is unclear, this is a fatal problem.
    /// The mapping of replies to calls can no longer be guaranteed from this point on.
    pub fn is_faulty(&self) -> bool {
        self.faulty
    }

    /// Returns true if the memory limit of unparsed data is reached
    pub fn is_full(&self) -> bool {
        match self.limit {
            None => false,
            Some(limit) => self.buffer.len() >= limit,
        }
    }

    /// Resets the buffer in case of fatal error
    pub fn clear(&mut self) {
        self.units.clear();
        self.buffer.clear();
        self.faulty = false;
    }

    pub fn pending_unit_count(&self) -> usize {
        self.units.len()
    }

    #[cfg(test)]
    pub fn unparsed_len(&self) -> usize {
        self.buffer.len()
    }
}
