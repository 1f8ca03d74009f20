#![allow(dead_code)]

use core::fmt::Write;

use bstr::BStr;
use bytescan::{ReadOutcome, ScanService, SessionId};

/// Everything one drain of a session produced.
#[derive(Debug, Default)]
pub struct Drained {
    /// Tokens reassembled from their chunks.
    pub tokens: Vec<Vec<u8>>,
    /// Every chunk, in order.
    pub chunks: Vec<Vec<u8>>,
    /// `TokenBoundary` outcomes seen.
    pub boundaries: usize,
}

impl Drained {
    pub fn token_strs(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|t| String::from_utf8_lossy(t).into_owned())
            .collect()
    }

    pub fn chunk_strs(&self) -> Vec<String> {
        self.chunks
            .iter()
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect()
    }
}

/// Reads `id` at `capacity` until `NoMoreData`.
pub fn drain(service: &mut ScanService, id: SessionId, capacity: usize) -> Drained {
    let mut out = Drained::default();
    let mut current = Vec::new();
    loop {
        match service.read(id, capacity).expect("session is open") {
            ReadOutcome::Chunk(bytes) => {
                assert!(!bytes.is_empty() && bytes.len() <= capacity);
                out.chunks.push(bytes.to_vec());
                current.extend_from_slice(bytes);
            }
            ReadOutcome::TokenBoundary => {
                out.boundaries += 1;
                out.tokens.push(std::mem::take(&mut current));
            }
            ReadOutcome::NoMoreData => break,
            ReadOutcome::NoProgress => panic!("no progress at capacity {capacity}"),
        }
    }
    assert!(current.is_empty(), "chunks after the last boundary");
    out
}

/// Renders the outcomes of draining `id`, one per line.
pub fn transcript(service: &mut ScanService, id: SessionId, capacity: usize) -> String {
    let mut out = String::new();
    loop {
        let outcome = service.read(id, capacity).expect("session is open");
        match outcome {
            ReadOutcome::Chunk(bytes) => {
                writeln!(out, "chunk {:?} ({})", BStr::new(bytes), outcome.wire_len()).unwrap();
            }
            ReadOutcome::TokenBoundary => writeln!(out, "end of token (0)").unwrap(),
            ReadOutcome::NoMoreData => {
                writeln!(out, "end of data ({})", outcome.wire_len()).unwrap();
                break;
            }
            ReadOutcome::NoProgress => panic!("no progress at capacity {capacity}"),
        }
    }
    out
}
