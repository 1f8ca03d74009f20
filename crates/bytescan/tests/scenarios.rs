#![allow(missing_docs)]
//! End-to-end scenarios: one open/configure/write/read/close sequence each.

mod common;

use bytescan::{ReadOutcome, ReadStatus, ScanError, ScanService};
use common::drain;

#[test]
fn default_separators() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    let data = b"hello:world\tthis is \na test";
    assert_eq!(service.write(id, data).unwrap(), data.len());

    let drained = drain(&mut service, id, 128);
    assert_eq!(
        drained.token_strs(),
        ["hello", "world", "this", "is", "a", "test"]
    );
    assert_eq!(drained.boundaries, 6);
    service.close(id).unwrap();
}

#[test]
fn custom_separators() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.control(id, 0).unwrap();
    assert_eq!(service.write(id, b"-,").unwrap(), 2);
    service.write(id, b"hello-world,miguel-carrasco").unwrap();

    let drained = drain(&mut service, id, 128);
    assert_eq!(
        drained.token_strs(),
        ["hello", "world", "miguel", "carrasco"]
    );
    service.close(id).unwrap();
}

#[test]
fn non_cumulative_writes() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.write(id, b"first:test").unwrap();
    service.write(id, b"second:test").unwrap();

    let drained = drain(&mut service, id, 128);
    assert_eq!(drained.token_strs(), ["second", "test"]);
    assert_eq!(drained.boundaries, 2);
}

#[test]
fn partial_reads() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.write(id, b"verylongtoken:short").unwrap();

    let drained = drain(&mut service, id, 4);
    assert_eq!(
        drained.chunk_strs(),
        ["very", "long", "toke", "n", "shor", "t"]
    );
    assert_eq!(drained.token_strs(), ["verylongtoken", "short"]);
    assert_eq!(service.read(id, 4).unwrap(), ReadOutcome::NoMoreData);
}

#[test]
fn embedded_nul_is_data() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service
        .write(id, &[b'h', b'e', b'l', 0, b'l', b'o', b':', b'w', b'o', b'r', b'l', b'd'])
        .unwrap();

    let drained = drain(&mut service, id, 128);
    assert_eq!(drained.tokens, [b"hel\0lo".to_vec(), b"world".to_vec()]);
}

#[test]
fn empty_write_reads_no_more_data() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    assert_eq!(service.write(id, b"").unwrap(), 0);
    // Zero capacity, as the device harness reads with a null buffer.
    assert_eq!(service.read(id, 0).unwrap().wire_len(), -1);
    assert_eq!(service.read(id, 128).unwrap(), ReadOutcome::NoMoreData);
}

#[test]
fn only_separators() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.write(id, b":\t \n::  \t").unwrap();

    let drained = drain(&mut service, id, 128);
    assert!(drained.chunks.is_empty());
    assert_eq!(drained.boundaries, 0);
}

#[test]
fn two_sessions_with_their_own_separators() {
    let mut service = ScanService::default();
    let fd1 = service.open().unwrap();
    let fd2 = service.open().unwrap();

    service.configure(fd1).unwrap();
    service.write(fd1, b"-,").unwrap();
    service.configure(fd2).unwrap();
    service.write(fd2, b":").unwrap();

    service.write(fd1, b"hello-world,miguel-carrasco").unwrap();
    service.write(fd2, b"hola:mundo:hehe").unwrap();

    assert_eq!(drain(&mut service, fd1, 128).boundaries, 4);
    assert_eq!(
        drain(&mut service, fd2, 128).token_strs(),
        ["hola", "mundo", "hehe"]
    );
    service.close(fd1).unwrap();
    service.close(fd2).unwrap();
    assert!(service.is_empty());
}

#[test]
fn nul_as_separator() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.configure(id).unwrap();
    service.write(id, &[0, b':']).unwrap();
    service.write(id, b"he\0llo\0world:this:is:a:test").unwrap();

    let drained = drain(&mut service, id, 128);
    assert_eq!(
        drained.token_strs(),
        ["he", "llo", "world", "this", "is", "a", "test"]
    );
    assert_eq!(drained.boundaries, 7);
}

#[test]
fn no_separators() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.configure(id).unwrap();
    assert_eq!(service.write(id, b"").unwrap(), 0);
    service.write(id, b"test:no:separators").unwrap();

    let drained = drain(&mut service, id, 128);
    assert_eq!(drained.token_strs(), ["test:no:separators"]);
}

#[test]
fn repeated_open_close_reuses_one_slot() {
    let mut service = ScanService::default();
    for _ in 0..500 {
        let id = service.open().unwrap();
        service.write(id, b"leak:test:iteration").unwrap();
        assert_eq!(drain(&mut service, id, 128).boundaries, 3);
        service.close(id).unwrap();
    }
    assert!(service.is_empty());
    assert_eq!(service.allocated_slots(), 1);
}

#[test]
fn invalid_control_request() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    assert_eq!(service.control(id, 1), Err(ScanError::InvalidRequest(1)));

    // Still in data mode with the default separators.
    service.write(id, b"a:b").unwrap();
    assert_eq!(drain(&mut service, id, 8).token_strs(), ["a", "b"]);
}

#[test]
fn read_into_caller_buffer() {
    let mut service = ScanService::default();
    let id = service.open().unwrap();
    service.write(id, b"verylongtoken:short").unwrap();

    let mut buf = [0u8; 4];
    let mut lens = Vec::new();
    loop {
        let status = service.read_into(id, &mut buf).unwrap();
        lens.push(status.wire_len());
        if status == ReadStatus::NoMoreData {
            break;
        }
    }
    assert_eq!(lens, [4, 4, 4, 1, 0, 4, 1, 0, -1]);
}
