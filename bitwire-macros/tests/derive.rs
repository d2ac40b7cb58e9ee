//! Integration tests for derive macros.

use bitwire::{
    Address, BitReader, BitWriter, Bounded, CodecError, Decode, Encode, FixedBlob, Tagged,
    WireEnum, from_bytes, to_bytes,
};
use std::net::{Ipv4Addr, SocketAddrV4};

// =============================================================================
// Struct tests
// =============================================================================

#[derive(Encode, Decode, Debug, PartialEq)]
struct UnitStruct;

#[test]
fn test_derive_unit_struct() {
    let mut buf = [0u8; 0];
    assert_eq!(to_bytes(&UnitStruct, &mut buf).unwrap(), 0);
    assert_eq!(<UnitStruct as Encode>::MIN_BITS, 0);
    assert_eq!(from_bytes::<UnitStruct>(&buf).unwrap(), UnitStruct);
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct SimpleStruct {
    a: u32,
    b: u16,
}

#[test]
fn test_derive_simple_struct() {
    let mut buf = [0u8; 16];
    let value = SimpleStruct {
        a: 0x12345678,
        b: 0xABCD,
    };

    let written = to_bytes(&value, &mut buf).unwrap();
    assert_eq!(written, 6);
    assert_eq!(<SimpleStruct as Encode>::MIN_BITS, 48);
    assert_eq!(&buf[..6], &[0x12, 0x34, 0x56, 0x78, 0xAB, 0xCD]);

    assert_eq!(from_bytes::<SimpleStruct>(&buf).unwrap(), value);
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct TupleStruct(bool, u8);

#[test]
fn test_derive_tuple_struct() {
    let mut buf = [0u8; 2];
    let value = TupleStruct(true, 0xFF);

    let mut writer = BitWriter::new(&mut buf);
    value.encode(&mut writer).unwrap();
    assert_eq!(writer.bit_position(), 9);
    assert_eq!(buf, [0xFF, 0x80]);

    assert_eq!(from_bytes::<TupleStruct>(&buf).unwrap(), value);
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct Flags {
    ready: bool,
    level: Bounded<u8, 1, 6>,
    urgent: bool,
    #[wire(skip)]
    cached: u64,
}

#[test]
fn test_derive_packs_sub_byte_fields() {
    assert_eq!(<Flags as Encode>::MIN_BITS, 1 + 3 + 1);

    let value = Flags {
        ready: true,
        level: Bounded::new(6).unwrap(),
        urgent: true,
        cached: 99,
    };
    let mut buf = [0u8; 1];
    assert_eq!(to_bytes(&value, &mut buf).unwrap(), 1);
    // 1, 101 (6 - 1), 1
    assert_eq!(buf, [0b1101_1000]);

    let decoded: Flags = from_bytes(&buf).unwrap();
    assert!(decoded.ready && decoded.urgent);
    assert_eq!(decoded.level.get(), 6);
    assert_eq!(decoded.cached, 0);
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct Outer {
    header: TupleStruct,
    inner: SimpleStruct,
    trailer: [u8; 2],
}

#[test]
fn test_derive_nested_structs() {
    let value = Outer {
        header: TupleStruct(false, 1),
        inner: SimpleStruct { a: 2, b: 3 },
        trailer: [4, 5],
    };
    assert_eq!(<Outer as Encode>::MIN_BITS, 9 + 48 + 16);

    let mut buf = [0u8; 10];
    assert_eq!(to_bytes(&value, &mut buf).unwrap(), 10);
    assert_eq!(from_bytes::<Outer>(&buf).unwrap(), value);
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct Named {
    id: u8,
    name: FixedBlob<8>,
}

#[test]
fn test_derive_rolls_back_partial_writes() {
    let value = Named {
        id: 1,
        name: FixedBlob::from_slice(b"hello").unwrap(),
    };
    // Enough for the minimum size but not for the blob contents.
    let mut buf = [0u8; 4];
    let mut writer = BitWriter::new(&mut buf);
    writer.write_bool(true).unwrap();
    assert!(matches!(
        value.encode(&mut writer),
        Err(CodecError::WriteOverflow { .. })
    ));
    assert_eq!(writer.bit_position(), 1);
    assert_eq!(value.bit_len(), 8 + 16 + 40);
}

#[derive(Encode, Decode, Debug, PartialEq)]
struct Framed {
    a: bool,
    addr: Address,
    b: bool,
}

#[test]
fn test_derive_bit_len_includes_inner_padding() {
    let value = Framed {
        a: true,
        addr: Address::from(SocketAddrV4::new(Ipv4Addr::new(192, 0, 2, 1), 7)),
        b: true,
    };
    // 1, then 17 + 6 padding + 32, then 1.
    assert_eq!(value.bit_len(), 57);

    let mut buf = vec![0u8; bitwire::bytes_for_bits(value.bit_len())];
    assert_eq!(to_bytes(&value, &mut buf).unwrap(), buf.len());
    assert_eq!(from_bytes::<Framed>(&buf).unwrap(), value);
}

#[test]
fn test_derive_checks_min_size_before_decoding() {
    let buf = [0u8; 5];
    let mut reader = BitReader::new(&buf);
    reader.read_bits(20).unwrap();
    assert_eq!(
        SimpleStruct::decode(&mut reader),
        Err(CodecError::ReadUnderflow {
            needed: 48,
            available: 20
        })
    );
    assert_eq!(reader.bit_position(), 20);
}

// =============================================================================
// Enum tests
// =============================================================================

#[derive(WireEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    East,
    South,
    West,
    Error,
}

#[derive(WireEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Active,
    #[wire(error)]
    Unknown,
}

#[test]
fn test_derive_wire_enum_constants() {
    assert_eq!(Direction::COUNT, 4);
    assert_eq!(Direction::BITS, 3);
    assert_eq!(Direction::ERROR, Direction::Error);
    assert_eq!(Direction::West.to_raw(), 3);
    assert_eq!(Direction::Error.to_raw(), 4);
    assert_eq!(Direction::from_raw(2), Direction::South);
    assert_eq!(Direction::from_raw(17), Direction::Error);

    assert_eq!(Mode::COUNT, 2);
    assert_eq!(Mode::BITS, 2);
    assert_eq!(Mode::ERROR, Mode::Unknown);
    assert!(Mode::Unknown.is_error());
    assert_eq!(<Mode as Encode>::MIN_BITS, 2);
}

#[test]
fn test_derive_wire_enum_clamps_on_decode() {
    let mut buf = [0u8; 1];
    let mut writer = BitWriter::new(&mut buf);
    writer.write_bits(0b110, 3).unwrap();
    writer.write_bits(0b11, 2).unwrap();

    let mut reader = BitReader::new(&buf);
    assert_eq!(Direction::decode(&mut reader).unwrap(), Direction::Error);
    assert_eq!(Mode::decode(&mut reader).unwrap(), Mode::Unknown);
}

#[test]
fn test_derive_wire_enum_as_field() {
    #[derive(Encode, Decode, Debug, PartialEq)]
    struct Move {
        direction: Direction,
        steps: u8,
    }

    let value = Move {
        direction: Direction::South,
        steps: 9,
    };
    let mut buf = [0u8; 2];
    assert_eq!(to_bytes(&value, &mut buf).unwrap(), 2);
    assert_eq!(from_bytes::<Move>(&buf).unwrap(), value);
}

// =============================================================================
// Tagged struct tests
// =============================================================================

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = Mode::Active)]
struct Heartbeat {
    uptime: u32,
}

#[derive(Encode, Decode, Debug, PartialEq)]
#[wire(tag = Mode::Idle)]
struct Sleep;

#[test]
fn test_derive_tag_is_written_first() {
    assert_eq!(<Heartbeat as Encode>::MIN_BITS, 2 + 32);
    assert_eq!(Heartbeat::KIND, Mode::Active);

    let value = Heartbeat { uptime: u32::MAX };
    let mut buf = [0u8; 5];
    assert_eq!(to_bytes(&value, &mut buf).unwrap(), 5);
    assert_eq!(buf, [0b0111_1111, 0xFF, 0xFF, 0xFF, 0b1100_0000]);

    assert_eq!(from_bytes::<Heartbeat>(&buf).unwrap(), value);

    let mut reader = BitReader::new(&buf);
    assert_eq!(reader.read_enum::<Mode>().unwrap(), Mode::Active);
    assert_eq!(Heartbeat::decode_body(&mut reader).unwrap(), value);
}

#[test]
fn test_derive_tag_mismatch() {
    let mut buf = [0u8; 1];
    assert_eq!(to_bytes(&Sleep, &mut buf).unwrap(), 1);
    assert_eq!(<Sleep as Decode>::MIN_BITS, 2);

    let mut wide = [0u8; 8];
    wide[0] = buf[0];
    let mut reader = BitReader::new(&wide);
    assert_eq!(
        Heartbeat::decode(&mut reader),
        Err(CodecError::UnexpectedKind {
            expected: 1,
            found: 0
        })
    );
    assert_eq!(reader.bit_position(), 0);
    assert_eq!(Sleep::decode(&mut reader).unwrap(), Sleep);
}
