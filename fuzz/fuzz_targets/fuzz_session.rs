#![no_main]

use arbitrary::Arbitrary;
use bytescan::{ReadOutcome, ScanError, ScanService, ServiceOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Configure,
    Control(u32),
    Write(Vec<u8>),
    Read(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_buffer_len: Option<u8>,
    ops: Vec<Op>,
}

/// What the session should look like, tracked independently of the crate.
#[derive(Default)]
struct Model {
    separators: Vec<u8>,
    awaiting_separators: bool,
    buffer: Vec<u8>,
    /// Tokens finished since the last data write, and the one in progress.
    tokens: Vec<Vec<u8>>,
    partial: Vec<u8>,
    exhausted: bool,
    /// Separators unchanged since the last data write, so the reassembled
    /// tokens can be compared with a plain split.
    stable: bool,
}

impl Model {
    fn expected_tokens(&self) -> Vec<Vec<u8>> {
        self.buffer
            .split(|b| self.separators.contains(b))
            .filter(|token| !token.is_empty())
            .map(<[u8]>::to_vec)
            .collect()
    }
}

fn run(input: Input) {
    let options = ServiceOptions {
        max_buffer_len: input.max_buffer_len.map(usize::from),
        ..Default::default()
    };
    let mut model = Model {
        separators: options.defaults.separators().to_vec(),
        ..Default::default()
    };
    let mut service = ScanService::new(options);
    let id = service.open().expect("first session always opens");

    for op in input.ops {
        match op {
            Op::Configure => {
                service.configure(id).expect("session is open");
                model.awaiting_separators = true;
                model.separators.clear();
                model.stable = false;
            }
            Op::Control(code) => match service.control(id, code) {
                Ok(()) => {
                    assert_eq!(code, 0);
                    model.awaiting_separators = true;
                    model.separators.clear();
                    model.stable = false;
                }
                Err(err) => assert_eq!(err, ScanError::InvalidRequest(code)),
            },
            Op::Write(bytes) => match service.write(id, &bytes) {
                Ok(written) => {
                    assert_eq!(written, bytes.len());
                    if model.awaiting_separators {
                        model.separators = bytes;
                        model.awaiting_separators = false;
                    } else {
                        model.buffer = bytes;
                        model.tokens.clear();
                        model.partial.clear();
                        model.exhausted = false;
                        model.stable = true;
                    }
                }
                Err(err) => {
                    assert!(matches!(err, ScanError::ResourceExhausted { .. }));
                    assert!(input.max_buffer_len.is_some_and(|max| bytes.len() > usize::from(max)));
                }
            },
            Op::Read(capacity) => {
                let capacity = usize::from(capacity);
                let outcome = service.read(id, capacity).expect("session is open");
                if model.exhausted {
                    assert_eq!(outcome, ReadOutcome::NoMoreData);
                }
                match outcome {
                    ReadOutcome::Chunk(chunk) => {
                        assert!(!chunk.is_empty());
                        assert!(chunk.len() <= capacity);
                        model.partial.extend_from_slice(chunk);
                    }
                    ReadOutcome::TokenBoundary => {
                        assert!(!model.partial.is_empty());
                        model.tokens.push(std::mem::take(&mut model.partial));
                    }
                    ReadOutcome::NoProgress => {
                        assert_eq!(capacity, 0);
                    }
                    ReadOutcome::NoMoreData => {
                        assert!(model.partial.is_empty());
                        if model.stable && !model.exhausted {
                            assert_eq!(model.tokens, model.expected_tokens());
                        }
                        model.exhausted = true;
                    }
                }
            }
        }
    }

    service.close(id).expect("session is open");
    assert!(service.is_empty());
}

fuzz_target!(|input: Input| run(input));
