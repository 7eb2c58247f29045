use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{timeout, Duration};

use kache::config::DEFAULT_MAX_FRAME_SIZE;
use kache::server::run;
use kache::store::Store;

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(run(listener, Store::new(), DEFAULT_MAX_FRAME_SIZE));

    addr
}

async fn connect() -> TcpStream {
    let addr = start_server().await;
    TcpStream::connect(addr).await.unwrap()
}

/// Encodes `args` as a RESP array of bulk strings.
fn command(args: &[&[u8]]) -> Vec<u8> {
    let mut bytes = format!("*{}\r\n", args.len()).into_bytes();
    for arg in args {
        bytes.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        bytes.extend_from_slice(arg);
        bytes.extend_from_slice(b"\r\n");
    }
    bytes
}

/// Reads exactly `expected.len()` bytes and compares them with `expected`.
async fn expect_reply(stream: &mut TcpStream, expected: &[u8]) {
    let mut actual = vec![0; expected.len()];
    timeout(Duration::from_secs(5), stream.read_exact(&mut actual))
        .await
        .expect("timed out waiting for a reply")
        .unwrap();

    assert_eq!(
        String::from_utf8_lossy(&actual),
        String::from_utf8_lossy(expected)
    );
}

/// Reads a single-line reply, terminator included.
async fn read_line(stream: &mut TcpStream) -> Vec<u8> {
    let mut line = Vec::new();
    while !line.ends_with(b"\r\n") {
        line.push(stream.read_u8().await.unwrap());
    }
    line
}

async fn round_trip(stream: &mut TcpStream, args: &[&[u8]], expected: &[u8]) {
    stream.write_all(&command(args)).await.unwrap();
    expect_reply(stream, expected).await;
}

#[tokio::test]
async fn test_set_incr_get() {
    let mut stream = connect().await;

    round_trip(&mut stream, &[b"SET", b"x", b"10"], b"+OK\r\n").await;
    round_trip(&mut stream, &[b"INCR", b"x"], b":11\r\n").await;
    round_trip(&mut stream, &[b"GET", b"x"], b"$2\r\n11\r\n").await;
    round_trip(&mut stream, &[b"DECR", b"x"], b":10\r\n").await;
    round_trip(&mut stream, &[b"incr", b"fresh"], b":1\r\n").await;
}

#[tokio::test]
async fn test_get_missing_key() {
    let mut stream = connect().await;

    round_trip(&mut stream, &[b"GET", b"nope"], b"$-1\r\n").await;
}

#[tokio::test]
async fn test_exists_and_del() {
    let mut stream = connect().await;

    round_trip(&mut stream, &[b"EXISTS", b"k"], b":0\r\n").await;
    round_trip(&mut stream, &[b"DEL", b"k"], b":0\r\n").await;
    round_trip(&mut stream, &[b"SET", b"k", b"v"], b"+OK\r\n").await;
    round_trip(&mut stream, &[b"EXISTS", b"k"], b":1\r\n").await;
    round_trip(&mut stream, &[b"DEL", b"k", b"k", b"other"], b":1\r\n").await;
    round_trip(&mut stream, &[b"EXISTS", b"k"], b":0\r\n").await;
}

#[tokio::test]
async fn test_errors() {
    let mut stream = connect().await;

    round_trip(
        &mut stream,
        &[b"FROBNICATE"],
        b"-ERR:unknown command frobnicate\r\n",
    )
    .await;
    round_trip(
        &mut stream,
        &[b"EXISTS"],
        b"-WRONGTYP:exists has wrong number of arguments\r\n",
    )
    .await;
    round_trip(
        &mut stream,
        &[b"GET", b"a", b"b"],
        b"-WRONGTYP:get has wrong number of arguments\r\n",
    )
    .await;

    round_trip(&mut stream, &[b"SET", b"s", b"abc"], b"+OK\r\n").await;
    round_trip(
        &mut stream,
        &[b"INCR", b"s"],
        b"-ERR:error casting abc to int\r\n",
    )
    .await;

    round_trip(&mut stream, &[b"SADD", b"set", b"a"], b":1\r\n").await;
    round_trip(
        &mut stream,
        &[b"INCR", b"set"],
        b"-WRONGTYP:invalid operation against key holding invalid type of value\r\n",
    )
    .await;

    // The connection is still usable after errors.
    round_trip(&mut stream, &[b"PING"], b"+PONG\r\n").await;
}

#[tokio::test]
async fn test_inline_commands() {
    let mut stream = connect().await;

    stream.write_all(b"PING\r\n").await.unwrap();
    expect_reply(&mut stream, b"+PONG\r\n").await;

    stream.write_all(b"set greeting hello\r\n").await.unwrap();
    expect_reply(&mut stream, b"+OK\r\n").await;

    round_trip(&mut stream, &[b"GET", b"greeting"], b"$5\r\nhello\r\n").await;
}

#[tokio::test]
async fn test_pipelined_requests() {
    let mut stream = connect().await;

    let mut batch = command(&[b"SET", b"p", b"1"]);
    batch.extend(command(&[b"INCR", b"p"]));
    batch.extend(command(&[b"INCR", b"p"]));
    batch.extend(command(&[b"GET", b"p"]));
    stream.write_all(&batch).await.unwrap();

    expect_reply(&mut stream, b"+OK\r\n:2\r\n:3\r\n$1\r\n3\r\n").await;
}

#[tokio::test]
async fn test_value_with_crlf() {
    let mut stream = connect().await;

    round_trip(
        &mut stream,
        &[b"SET", b"multi", b"line one\r\nline two"],
        b"+OK\r\n",
    )
    .await;
    round_trip(
        &mut stream,
        &[b"GET", b"multi"],
        b"$18\r\nline one\r\nline two\r\n",
    )
    .await;
    round_trip(&mut stream, &[b"APPEND", b"multi", b"!"], b":19\r\n").await;
    round_trip(&mut stream, &[b"STRLEN", b"multi"], b":19\r\n").await;
}

#[tokio::test]
async fn test_invalid_request_keeps_connection_open() {
    let mut stream = connect().await;

    stream.write_all(b"*0\r\n").await.unwrap();
    expect_reply(&mut stream, b"-ERR:protocol error; empty request\r\n").await;

    round_trip(&mut stream, &[b"PING"], b"+PONG\r\n").await;
}

#[tokio::test]
async fn test_sets() {
    let mut stream = connect().await;

    round_trip(&mut stream, &[b"SADD", b"a", b"1", b"2", b"3"], b":3\r\n").await;
    round_trip(&mut stream, &[b"SADD", b"a", b"3", b"4"], b":1\r\n").await;
    round_trip(&mut stream, &[b"SADD", b"b", b"3", b"4", b"5"], b":3\r\n").await;
    round_trip(&mut stream, &[b"SCARD", b"a"], b":4\r\n").await;
    round_trip(&mut stream, &[b"SISMEMBER", b"a", b"2"], b":1\r\n").await;
    round_trip(&mut stream, &[b"SREM", b"a", b"2", b"9"], b":1\r\n").await;
    round_trip(&mut stream, &[b"TYPE", b"a"], b"+set\r\n").await;

    round_trip(
        &mut stream,
        &[b"SINTERSTORE", b"both", b"a", b"b"],
        b":2\r\n",
    )
    .await;
    round_trip(&mut stream, &[b"SUNIONSTORE", b"all", b"a", b"b"], b":4\r\n").await;
    round_trip(&mut stream, &[b"SDIFF", b"a", b"b"], b"*1\r\n$1\r\n1\r\n").await;

    round_trip(&mut stream, &[b"SMOVE", b"a", b"c", b"1"], b":1\r\n").await;
    round_trip(&mut stream, &[b"SMOVE", b"a", b"c", b"1"], b":0\r\n").await;
    round_trip(&mut stream, &[b"SMEMBERS", b"c"], b"*1\r\n$1\r\n1\r\n").await;
    round_trip(&mut stream, &[b"SINTER", b"a", b"missing"], b"*0\r\n").await;
}

#[tokio::test]
async fn test_clients_share_the_store() {
    let addr = start_server().await;
    let mut first = TcpStream::connect(addr).await.unwrap();
    let mut second = TcpStream::connect(addr).await.unwrap();

    round_trip(&mut first, &[b"SET", b"shared", b"1"], b"+OK\r\n").await;
    round_trip(&mut second, &[b"INCR", b"shared"], b":2\r\n").await;
    round_trip(&mut first, &[b"GET", b"shared"], b"$1\r\n2\r\n").await;
}

#[tokio::test]
async fn test_concurrent_incr() {
    let addr = start_server().await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        handles.push(tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            for _ in 0..50 {
                stream
                    .write_all(&command(&[b"INCR", b"ctr"]))
                    .await
                    .unwrap();
                let reply = read_line(&mut stream).await;
                assert_eq!(reply[0], b':', "{:?}", String::from_utf8_lossy(&reply));
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut stream = TcpStream::connect(addr).await.unwrap();
    round_trip(&mut stream, &[b"GET", b"ctr"], b"$3\r\n200\r\n").await;
}

#[tokio::test]
async fn test_deeply_nested_request_is_rejected() {
    let addr = start_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(&b"*1\r\n".repeat(64)).await.unwrap();
    expect_reply(
        &mut stream,
        b"-ERR:protocol error; arrays nested deeper than 32 levels\r\n",
    )
    .await;

    // The server keeps serving other clients.
    let mut other = TcpStream::connect(addr).await.unwrap();
    round_trip(&mut other, &[b"PING"], b"+PONG\r\n").await;
}
