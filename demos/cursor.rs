use bitwire::{BitReader, BitWriter};

fn main() {
    let mut buf = [0u8; 4];
    let mut writer = BitWriter::new(&mut buf);
    writer.write_bool(true).unwrap();
    writer.write_bits(0b101, 3).unwrap();
    writer.write_uint(0x1234u16, 12).unwrap();
    println!("wrote {} bits: {:02x?}", writer.bit_position(), writer.written());

    let mut reader = BitReader::new(&buf);
    let flag = reader.read_bool().unwrap();
    let small = reader.read_bits(3).unwrap();
    let wide: u16 = reader.read_uint(12).unwrap();
    println!("read back: {flag} {small:#b} {wide:#x}");

    assert!(flag);
    assert_eq!(small, 0b101);
    assert_eq!(wide, 0x234);
}
