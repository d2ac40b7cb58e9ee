//! Packet-level behavior: tagged aggregates, dispatch and buffer limits.

use bitwire::{
    Address, BitReader, BitWriter, Bounded, CodecError, Decode, Encode, FixedBlob, Tagged,
    WireEnum, from_bytes, to_bytes,
};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

#[derive(WireEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PacketKind {
    Handshake,
    Ping,
    Data,
    Close,
    Error,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = PacketKind::Handshake)]
struct Handshake {
    packet_id: u16,
    version: u8,
    flags: [bool; 4],
    session: u32,
    endpoint: Address,
    keepalive: Duration,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = PacketKind::Ping)]
struct Ping {
    packet_id: u16,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = PacketKind::Data)]
struct Data {
    packet_id: u16,
    sequence: Bounded<u32, 0, 1023>,
    payload: FixedBlob<16>,
}

#[derive(Debug, PartialEq)]
enum Packet {
    Handshake(Handshake),
    Ping(Ping),
    Data(Data),
}

fn dispatch(buf: &[u8]) -> bitwire::Result<Packet> {
    let mut reader = BitReader::new(buf);
    let kind: PacketKind = reader.read_enum()?;
    match kind {
        PacketKind::Handshake => Handshake::decode_body(&mut reader).map(Packet::Handshake),
        PacketKind::Ping => Ping::decode_body(&mut reader).map(Packet::Ping),
        PacketKind::Data => Data::decode_body(&mut reader).map(Packet::Data),
        _ => Err(CodecError::OutOfRange {
            reason: "no handler for packet kind",
        }),
    }
}

fn handshake() -> Handshake {
    Handshake {
        packet_id: 1,
        version: 3,
        flags: [true, false, false, true],
        session: 0xDEAD_BEEF,
        endpoint: Address::from(SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 20), 9000)),
        keepalive: Duration::from_secs(30),
    }
}

#[test]
fn packet_kind_width_counts_the_sentinel() {
    assert_eq!(PacketKind::COUNT, 4);
    assert_eq!(PacketKind::BITS, 3);
    assert_eq!(<Ping as Encode>::MIN_BITS, 19);
    assert_eq!(<Ping as Decode>::MIN_BITS, 19);
}

#[test]
fn ping_round_trip_uses_exact_bits() {
    let ping = Ping { packet_id: 11 };
    let mut buf = [0u8; 8];
    let mut writer = BitWriter::new(&mut buf);
    ping.encode(&mut writer).unwrap();
    assert_eq!(writer.bit_position(), PacketKind::BITS as usize + 16);
    assert_eq!(writer.written(), &[0x20, 0x01, 0x60]);

    let mut reader = BitReader::new(&buf);
    assert_eq!(Ping::decode(&mut reader).unwrap(), ping);
    assert_eq!(reader.bit_position(), 19);
}

#[test]
fn too_small_buffer_is_left_untouched() {
    let packet = handshake();
    assert!(<Handshake as Encode>::MIN_BITS > 24);

    let mut buf = [0xAAu8; 3];
    let mut writer = BitWriter::new(&mut buf);
    assert!(matches!(
        packet.encode(&mut writer),
        Err(CodecError::WriteOverflow { .. })
    ));
    assert_eq!(writer.bit_position(), 0);
    assert_eq!(buf, [0xAA; 3]);
}

#[test]
fn handshake_round_trip() {
    let packet = handshake();
    let mut buf = [0u8; 64];
    let used = to_bytes(&packet, &mut buf).unwrap();
    // The address octets start on a byte boundary, so no padding is needed.
    assert_eq!(packet.bit_len(), 176);
    assert_eq!(used, 22);
    assert_eq!(from_bytes::<Handshake>(&buf[..used]).unwrap(), packet);
}

#[test]
fn dispatch_on_the_discriminant() {
    let data = Data {
        packet_id: 7,
        sequence: Bounded::new(1000).unwrap(),
        payload: FixedBlob::from_slice(b"hello").unwrap(),
    };
    let mut buf = [0u8; 32];
    to_bytes(&data, &mut buf).unwrap();
    assert_eq!(dispatch(&buf).unwrap(), Packet::Data(data));

    let mut buf = [0u8; 32];
    to_bytes(&Ping { packet_id: 2 }, &mut buf).unwrap();
    assert_eq!(dispatch(&buf).unwrap(), Packet::Ping(Ping { packet_id: 2 }));

    let mut buf = [0u8; 64];
    to_bytes(&handshake(), &mut buf).unwrap();
    assert_eq!(dispatch(&buf).unwrap(), Packet::Handshake(handshake()));
}

#[test]
fn peek_then_decode() {
    let mut buf = [0u8; 4];
    to_bytes(&Ping { packet_id: 300 }, &mut buf).unwrap();

    let mut reader = BitReader::new(&buf);
    assert_eq!(reader.peek::<PacketKind>().unwrap(), Ping::KIND);
    assert_eq!(reader.bit_position(), 0);
    assert_eq!(Ping::decode(&mut reader).unwrap().packet_id, 300);
}

#[test]
fn wrong_kind_is_rejected_without_moving() {
    let mut buf = [0u8; 16];
    to_bytes(&Ping { packet_id: 5 }, &mut buf).unwrap();

    let mut reader = BitReader::new(&buf);
    assert_eq!(
        Data::decode(&mut reader),
        Err(CodecError::UnexpectedKind {
            expected: 2,
            found: 1
        })
    );
    assert_eq!(reader.bit_position(), 0);
}

#[test]
fn unknown_discriminant_decodes_to_sentinel() {
    // 0b111 is past every real kind.
    let buf = [0b1110_0000u8, 0, 0];
    let mut reader = BitReader::new(&buf);
    let kind = reader.read_enum::<PacketKind>().unwrap();
    assert_eq!(kind, PacketKind::Error);
    assert!(kind.is_error());

    assert!(matches!(dispatch(&buf), Err(CodecError::OutOfRange { .. })));
}

#[test]
fn truncated_packet_fails_cleanly() {
    let mut buf = [0u8; 32];
    let data = Data {
        packet_id: 1,
        sequence: Bounded::default(),
        payload: FixedBlob::from_slice(b"0123456789").unwrap(),
    };
    let used = to_bytes(&data, &mut buf).unwrap();

    let mut reader = BitReader::new(&buf[..used - 1]);
    assert!(matches!(
        Data::decode(&mut reader),
        Err(CodecError::ReadUnderflow { .. })
    ));
    assert_eq!(reader.bit_position(), 0);
}
